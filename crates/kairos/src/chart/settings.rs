use serde::{Deserialize, Serialize};

use crate::aspects::types::{OrbPreset, OrbTable};
use crate::ephemeris::types::{Body, PrecisionTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    pub tier: PrecisionTier,
    /// Orb preset override; by default the enhanced tier uses tight orbs
    /// and the basic tier standard ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orb_preset: Option<OrbPreset>,
    /// Bodies to place in the chart
    #[serde(default = "default_bodies")]
    pub include_objects: Vec<Body>,
}

fn default_bodies() -> Vec<Body> {
    Body::ALL.to_vec()
}

impl ChartSettings {
    pub fn new(tier: PrecisionTier) -> Self {
        Self {
            tier,
            orb_preset: None,
            include_objects: default_bodies(),
        }
    }

    pub fn with_orb_preset(mut self, preset: OrbPreset) -> Self {
        self.orb_preset = Some(preset);
        self
    }

    pub fn effective_orb_preset(&self) -> OrbPreset {
        self.orb_preset.unwrap_or(match self.tier {
            PrecisionTier::Enhanced => OrbPreset::Tight,
            PrecisionTier::Basic => OrbPreset::Standard,
        })
    }

    pub fn orbs(&self) -> OrbTable {
        self.effective_orb_preset().table()
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::new(PrecisionTier::default())
    }
}
