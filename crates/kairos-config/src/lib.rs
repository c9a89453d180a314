use anyhow::Context;
use kairos::chart::ChartSettings;
use kairos::ephemeris::{AyanamsaSystem, HouseSystem, PrecisionTier, Zodiac};
use kairos::rectification::search::DEFAULT_WINDOW_HOURS;
use kairos::rectification::{RectifierSettings, MAX_WINDOW_HOURS};
use kairos::OrbPreset;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const CONFIG_PATHS: [&str; 2] = ["configs/kairos.toml", "../../configs/kairos.toml"];

/// Defaults for chart construction, as written in `[chart]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub precision: String,
    pub house_system: String,
    /// Ayanamsa name, or "tropical"
    pub ayanamsa: String,
    pub orb_preset: Option<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            precision: "enhanced".to_string(),
            house_system: "placidus".to_string(),
            ayanamsa: "lahiri".to_string(),
            orb_preset: None,
        }
    }
}

impl ChartConfig {
    pub fn tier(&self) -> PrecisionTier {
        PrecisionTier::parse_or_default(&self.precision)
    }

    pub fn house_system(&self) -> HouseSystem {
        HouseSystem::parse_or_default(&self.house_system)
    }

    pub fn zodiac(&self) -> Zodiac {
        Zodiac::parse_or_default(&self.ayanamsa)
    }

    pub fn orb_preset(&self) -> anyhow::Result<Option<OrbPreset>> {
        match &self.orb_preset {
            None => Ok(None),
            Some(name) => OrbPreset::from_name(name)
                .map(Some)
                .ok_or_else(|| anyhow::anyhow!("chart.orb_preset must be \"tight\" or \"standard\", got {name:?}")),
        }
    }

    pub fn chart_settings(&self) -> anyhow::Result<ChartSettings> {
        let settings = ChartSettings::new(self.tier());
        Ok(match self.orb_preset()? {
            Some(preset) => settings.with_orb_preset(preset),
            None => settings,
        })
    }
}

/// Birth time search settings, as written in `[rectification]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RectificationConfig {
    pub window_hours: u32,
    pub ayanamsa: String,
    pub parallel: bool,
}

impl Default for RectificationConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            ayanamsa: "lahiri".to_string(),
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct KairosConfig {
    pub chart: ChartConfig,
    pub rectification: RectificationConfig,
}

impl KairosConfig {
    /// Rectifier settings; the precision tier comes from `[chart]`.
    pub fn rectifier_settings(&self) -> RectifierSettings {
        RectifierSettings {
            tier: self.chart.tier(),
            ayanamsa: AyanamsaSystem::parse_or_default(&self.rectification.ayanamsa),
            parallel: self.rectification.parallel,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.chart.orb_preset()?;
        if self.rectification.window_hours > MAX_WINDOW_HOURS {
            anyhow::bail!(
                "rectification.window_hours must be at most {}, got {}",
                MAX_WINDOW_HOURS,
                self.rectification.window_hours
            );
        }
        Ok(())
    }
}

pub fn parse_config(text: &str) -> anyhow::Result<KairosConfig> {
    let config: KairosConfig = toml::from_str(text).context("Failed to parse kairos.toml")?;
    config.validate()?;
    Ok(config)
}

pub fn load_from(path: &Path) -> anyhow::Result<KairosConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Try the common relative paths for `configs/kairos.toml`.
pub fn load() -> anyhow::Result<KairosConfig> {
    for p in &CONFIG_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return load_from(path);
        }
    }
    anyhow::bail!("Could not find kairos.toml in {:?}", CONFIG_PATHS);
}

/// Like [`load`], but a missing file yields the defaults. A file that exists
/// and fails to parse is still an error.
pub fn load_or_default() -> anyhow::Result<KairosConfig> {
    match CONFIG_PATHS.iter().map(Path::new).find(|p| p.exists()) {
        Some(path) => load_from(path),
        None => Ok(KairosConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = parse_config("").unwrap();
        assert_eq!(config, KairosConfig::default());
        assert_eq!(config.chart.tier(), PrecisionTier::Enhanced);
        assert_eq!(config.chart.house_system(), HouseSystem::PlacidusApprox);
        assert_eq!(config.chart.zodiac(), Zodiac::Sidereal(AyanamsaSystem::Lahiri));
        assert_eq!(config.rectification.window_hours, 4);
        assert_eq!(config.rectifier_settings(), RectifierSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[chart]
precision = "basic"
house_system = "whole"
ayanamsa = "tropical"
orb_preset = "tight"

[rectification]
window_hours = 2
ayanamsa = "krishnamurti"
parallel = false
"#
        )
        .unwrap();

        let config = load_from(file.path()).unwrap();
        assert_eq!(config.chart.house_system(), HouseSystem::WholeSign);
        assert_eq!(config.chart.zodiac(), Zodiac::Tropical);

        let chart = config.chart.chart_settings().unwrap();
        assert_eq!(chart.tier, PrecisionTier::Basic);
        assert_eq!(chart.effective_orb_preset(), OrbPreset::Tight);

        let rectifier = config.rectifier_settings();
        assert_eq!(rectifier.tier, PrecisionTier::Basic);
        assert_eq!(rectifier.ayanamsa, AyanamsaSystem::Krishnamurti);
        assert!(!rectifier.parallel);
        assert_eq!(config.rectification.window_hours, 2);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_config("[rectification]\nparallel = false\n").unwrap();
        assert_eq!(config.chart, ChartConfig::default());
        assert_eq!(config.rectification.window_hours, 4);
        assert!(!config.rectification.parallel);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_config("[chart]\norb_preset = \"loose\"\n").is_err());
        assert!(parse_config("[rectification]\nwindow_hours = 48\n").is_err());
        assert!(parse_config("[rectification]\nwindow_hours = 24\n").is_ok());
        assert!(parse_config("[rectification]\nwindow_hours = \"four\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("kairos.toml")).unwrap_err();
        assert!(err.to_string().contains("Could not read config file"));
    }
}
