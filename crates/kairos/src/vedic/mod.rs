pub mod dashas;
pub mod nakshatra;
pub mod types;

pub use dashas::{
    active_period_lord, compute_vimshottari_dasha, correlated_lords, find_active_period,
    DashaLevel, DashaPeriod, VimshottariResponse,
};
pub use nakshatra::{annotate_layer_nakshatras, get_nakshatra_for_longitude, NakshatraMetadata, NakshatraPlacement};
pub use types::{DashaLord, NakshatraLayer};
