pub mod scoring;
pub mod search;
pub mod types;

pub use scoring::{
    is_major_aspect, prepare_events, score_ascendant_traits, score_candidate, score_dasha_events,
    score_house_events, score_transit_timing, sign_traits, EventContext,
};
pub use search::{
    generate_candidates, generate_recommendations, rank_candidates, rectify_birth_time,
    BirthTimeRectifier, RectifierSettings,
};
pub use types::{
    CandidateChart, Confidence, EventCategory, LifeEvent, MethodScores, RectificationCandidate,
    RectificationRequest, RectificationResult, SearchState, MAX_WINDOW_HOURS,
};
