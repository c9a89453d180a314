use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::types::Body;

/// The five canonical (Ptolemaic) aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub const fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How close an aspect is to exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectStrength {
    /// orb < 1°
    Exact,
    /// orb < 3°
    Close,
    Wide,
}

impl AspectStrength {
    pub fn from_orb(orb: f64) -> Self {
        if orb < 1.0 {
            AspectStrength::Exact
        } else if orb < 3.0 {
            AspectStrength::Close
        } else {
            AspectStrength::Wide
        }
    }
}

/// Named orb presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrbPreset {
    /// Used with the enhanced precision tier.
    Tight,
    #[default]
    Standard,
}

impl OrbPreset {
    pub fn from_name(name: &str) -> Option<OrbPreset> {
        match name.trim().to_lowercase().as_str() {
            "tight" => Some(OrbPreset::Tight),
            "standard" => Some(OrbPreset::Standard),
            _ => None,
        }
    }

    pub fn table(self) -> OrbTable {
        match self {
            OrbPreset::Tight => OrbTable::tight(),
            OrbPreset::Standard => OrbTable::standard(),
        }
    }
}

/// Orb tolerance in degrees per aspect type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbTable {
    pub conjunction: f64,
    pub sextile: f64,
    pub square: f64,
    pub trine: f64,
    pub opposition: f64,
}

impl OrbTable {
    /// Conjunction/opposition 6°, trine/square 5°, sextile 3°.
    pub const fn tight() -> Self {
        Self {
            conjunction: 6.0,
            sextile: 3.0,
            square: 5.0,
            trine: 5.0,
            opposition: 6.0,
        }
    }

    /// Conjunction/opposition 8°, trine/square 6°, sextile 4°.
    pub const fn standard() -> Self {
        Self {
            conjunction: 8.0,
            sextile: 4.0,
            square: 6.0,
            trine: 6.0,
            opposition: 8.0,
        }
    }

    /// Same orb for every aspect type.
    pub const fn uniform(orb: f64) -> Self {
        Self {
            conjunction: orb,
            sextile: orb,
            square: orb,
            trine: orb,
            opposition: orb,
        }
    }

    pub fn orb_for(&self, aspect_type: AspectType) -> f64 {
        match aspect_type {
            AspectType::Conjunction => self.conjunction,
            AspectType::Sextile => self.sextile,
            AspectType::Square => self.square,
            AspectType::Trine => self.trine,
            AspectType::Opposition => self.opposition,
        }
    }
}

impl Default for OrbTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// An aspect between two bodies. `body_a` comes first in chart order
/// (or from the first layer for cross-layer aspects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_type: AspectType,
    /// Deviation from the exact angle, always within the configured orb
    pub orb_degrees: f64,
    pub strength: AspectStrength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectSetKind {
    IntraLayer,
    InterLayer,
}

/// A set of aspects (intra-layer or inter-layer)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AspectSet {
    pub id: String,
    pub label: String,
    pub kind: AspectSetKind,
    pub layer_ids: Vec<String>,
    pub pairs: Vec<Aspect>,
}
