//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::types::{normalize_degrees, Body, LayerPositions};
use crate::vedic::types::{DashaLord, NakshatraLayer};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / NAKSHATRA_COUNT as f64;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name, period lord)
pub const NAKSHATRA_ORDER: [(&str, &str, DashaLord); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini", DashaLord::Ketu),
    ("bharani", "Bharani", DashaLord::Venus),
    ("krittika", "Krittika", DashaLord::Sun),
    ("rohini", "Rohini", DashaLord::Moon),
    ("mrigashira", "Mrigashira", DashaLord::Mars),
    ("ardra", "Ardra", DashaLord::Rahu),
    ("punarvasu", "Punarvasu", DashaLord::Jupiter),
    ("pushya", "Pushya", DashaLord::Saturn),
    ("ashlesha", "Ashlesha", DashaLord::Mercury),
    ("magha", "Magha", DashaLord::Ketu),
    ("purva_phalguni", "Purva Phalguni", DashaLord::Venus),
    ("uttara_phalguni", "Uttara Phalguni", DashaLord::Sun),
    ("hasta", "Hasta", DashaLord::Moon),
    ("chitra", "Chitra", DashaLord::Mars),
    ("swati", "Swati", DashaLord::Rahu),
    ("vishakha", "Vishakha", DashaLord::Jupiter),
    ("anuradha", "Anuradha", DashaLord::Saturn),
    ("jyeshtha", "Jyeshtha", DashaLord::Mercury),
    ("mula", "Mula", DashaLord::Ketu),
    ("purva_ashadha", "Purva Ashadha", DashaLord::Venus),
    ("uttara_ashadha", "Uttara Ashadha", DashaLord::Sun),
    ("shravana", "Shravana", DashaLord::Moon),
    ("dhanishta", "Dhanishta", DashaLord::Mars),
    ("shatabhisha", "Shatabhisha", DashaLord::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", DashaLord::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", DashaLord::Saturn),
    ("revati", "Revati", DashaLord::Mercury),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: DashaLord,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    /// Degrees past the start of the nakshatra
    pub offset: f64,
    /// Fraction of the nakshatra already traversed, in [0, 1)
    pub progress: f64,
    pub pada: u8,
    pub pada_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub body: Body,
    pub longitude: f64,
    pub nakshatra_id: String,
    pub nakshatra_name: String,
    pub start_degree: f64,
    pub end_degree: f64,
    pub lord: DashaLord,
    pub pada: u8,
    pub pada_fraction: f64,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// `⌊longitude / (360/27)⌋`, always in 0..27.
pub fn nakshatra_index(longitude: f64) -> usize {
    let lon = normalize_degrees(longitude);
    ((lon / NAKSHATRA_SEGMENT_SIZE) as usize).min(NAKSHATRA_COUNT - 1)
}

/// Period lord of the nakshatra containing `longitude`.
pub fn nakshatra_lord(longitude: f64) -> DashaLord {
    NAKSHATRA_ORDER[nakshatra_index(longitude)].2
}

/// Fraction of its nakshatra that `longitude` has traversed, in [0, 1).
pub fn nakshatra_progress(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    let fraction = (lon % NAKSHATRA_SEGMENT_SIZE) / NAKSHATRA_SEGMENT_SIZE;
    fraction.clamp(0.0, 1.0)
}

/// Return metadata for the nakshatra containing the given longitude.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let entry = &NAKSHATRA_TABLE[nakshatra_index(lon)];

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SIZE) as u8).min(3) + 1;
    let pada_offset = offset - f64::from(pada - 1) * PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}

fn build_placement(body: Body, longitude: f64) -> NakshatraPlacement {
    let metadata = get_nakshatra_for_longitude(longitude);
    NakshatraPlacement {
        body,
        longitude: normalize_degrees(longitude),
        nakshatra_id: metadata.base.id,
        nakshatra_name: metadata.base.name,
        start_degree: metadata.base.start,
        end_degree: metadata.base.end,
        lord: metadata.base.lord,
        pada: metadata.pada,
        pada_fraction: metadata.pada_fraction,
    }
}

/// Annotate every body of a layer with its nakshatra placement, using the
/// layer's own zodiac (sidereal when an ayanamsa was applied).
pub fn annotate_layer_nakshatras(layer_id: &str, layer_positions: &LayerPositions) -> NakshatraLayer {
    let placements: BTreeMap<Body, NakshatraPlacement> = layer_positions
        .bodies
        .iter()
        .map(|(body, pos)| (*body, build_placement(*body, pos.longitude())))
        .collect();

    NakshatraLayer {
        layer_id: layer_id.to_string(),
        placements,
    }
}
