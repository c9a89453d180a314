//! Vedic period lords and the layer-level nakshatra record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ephemeris::types::Body;
use crate::vedic::nakshatra::NakshatraPlacement;

/// One of the nine Vimshottari period lords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLord {
    Ketu,
    Venus,
    Sun,
    Moon,
    Mars,
    Rahu,
    Jupiter,
    Saturn,
    Mercury,
}

impl DashaLord {
    /// Lords in Vimshottari cycle order, starting from Ketu.
    pub const SEQUENCE: [DashaLord; 9] = [
        DashaLord::Ketu,
        DashaLord::Venus,
        DashaLord::Sun,
        DashaLord::Moon,
        DashaLord::Mars,
        DashaLord::Rahu,
        DashaLord::Jupiter,
        DashaLord::Saturn,
        DashaLord::Mercury,
    ];

    /// Length of this lord's mahadasha in years. The nine lengths sum to 120.
    pub const fn years(self) -> f64 {
        match self {
            DashaLord::Ketu => 7.0,
            DashaLord::Venus => 20.0,
            DashaLord::Sun => 6.0,
            DashaLord::Moon => 10.0,
            DashaLord::Mars => 7.0,
            DashaLord::Rahu => 18.0,
            DashaLord::Jupiter => 16.0,
            DashaLord::Saturn => 19.0,
            DashaLord::Mercury => 17.0,
        }
    }

    /// Position in [`DashaLord::SEQUENCE`].
    pub fn sequence_index(self) -> usize {
        match self {
            DashaLord::Ketu => 0,
            DashaLord::Venus => 1,
            DashaLord::Sun => 2,
            DashaLord::Moon => 3,
            DashaLord::Mars => 4,
            DashaLord::Rahu => 5,
            DashaLord::Jupiter => 6,
            DashaLord::Saturn => 7,
            DashaLord::Mercury => 8,
        }
    }

    /// The lord that follows this one in the cycle.
    pub fn next(self) -> DashaLord {
        Self::SEQUENCE[(self.sequence_index() + 1) % Self::SEQUENCE.len()]
    }

    pub fn id(self) -> &'static str {
        match self {
            DashaLord::Ketu => "ketu",
            DashaLord::Venus => "venus",
            DashaLord::Sun => "sun",
            DashaLord::Moon => "moon",
            DashaLord::Mars => "mars",
            DashaLord::Rahu => "rahu",
            DashaLord::Jupiter => "jupiter",
            DashaLord::Saturn => "saturn",
            DashaLord::Mercury => "mercury",
        }
    }

    /// The chart body for this lord; the lunar nodes have none.
    pub fn body(self) -> Option<Body> {
        match self {
            DashaLord::Sun => Some(Body::Sun),
            DashaLord::Moon => Some(Body::Moon),
            DashaLord::Mars => Some(Body::Mars),
            DashaLord::Mercury => Some(Body::Mercury),
            DashaLord::Jupiter => Some(Body::Jupiter),
            DashaLord::Venus => Some(Body::Venus),
            DashaLord::Saturn => Some(Body::Saturn),
            DashaLord::Rahu | DashaLord::Ketu => None,
        }
    }
}

impl fmt::Display for DashaLord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraLayer {
    pub layer_id: String,
    pub placements: BTreeMap<Body, NakshatraPlacement>,
}
