pub mod adapter;
pub mod ayanamsa;
pub mod bodies;
pub mod houses;
pub mod time;
pub mod types;

pub use adapter::ClosedFormEphemeris;
pub use ayanamsa::{
    ayanamsa, format_ayanamsa, sidereal_to_tropical, tropical_to_sidereal, AyanamsaSystem, Zodiac,
};
pub use bodies::{body_longitude, moon_longitude, planet_longitude, sun_longitude};
pub use houses::{approximate_ascendant, compute_houses, local_sidereal_time_degrees};
pub use time::{centuries_since_j2000, date_to_julian_day, parse_timestamp, to_julian_day, J2000_JD};
pub use types::{
    normalize_degrees, Body, BodyPosition, GeoLocation, HouseCusp, HousePositions, HouseSystem,
    LayerPositions, PrecisionTier,
};
