use crate::aspects::calculator::AspectCalculator;
use crate::chart::data::{BirthInput, Chart, ChartSummary};
use crate::chart::settings::ChartSettings;
use crate::ephemeris::adapter::ClosedFormEphemeris;
use crate::ephemeris::types::{Body, PrecisionTier};
use crate::western::signs::ZodiacSign;

/// Assembles charts from validated birth input.
#[derive(Debug, Clone, Default)]
pub struct ChartBuilder {
    pub settings: ChartSettings,
}

impl ChartBuilder {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    /// Build a complete chart. Infallible: the input was validated when it
    /// was constructed and every closed-form path is total.
    pub fn build(&self, input: &BirthInput) -> Chart {
        let jd = input.julian_day();
        let ephemeris = ClosedFormEphemeris::new(self.settings.tier, input.zodiac());

        let positions = ephemeris.calc_positions(jd, &self.settings.include_objects);
        let houses = ephemeris.calc_houses(jd, input.location(), input.house_system());

        let orb_preset = self.settings.effective_orb_preset();
        let aspects = AspectCalculator::new(orb_preset.table()).compute_aspects(&positions.longitudes());

        let sign_of = |body: Body| {
            positions
                .bodies
                .get(&body)
                .map(|pos| pos.sign)
                .unwrap_or(ZodiacSign::Aries)
        };
        let summary = ChartSummary {
            sun_sign: sign_of(Body::Sun),
            moon_sign: sign_of(Body::Moon),
            ascendant_sign: houses.ascendant().sign,
        };

        log::debug!(
            "Built {:?} chart at JD {:.5}: {} bodies, {} aspects",
            self.settings.tier,
            jd,
            positions.bodies.len(),
            aspects.len()
        );

        Chart {
            input: input.clone(),
            julian_day: jd,
            tier: self.settings.tier,
            ayanamsa: positions.ayanamsa,
            orb_preset,
            bodies: positions.bodies,
            houses,
            aspects,
            summary,
        }
    }
}

/// Build a chart with every body and the tier's default orb preset.
pub fn build_chart(input: &BirthInput, tier: PrecisionTier) -> Chart {
    ChartBuilder::new(ChartSettings::new(tier)).build(input)
}
