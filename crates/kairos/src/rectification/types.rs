use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::ephemeris::ayanamsa::AyanamsaSystem;
use crate::ephemeris::types::{Body, GeoLocation};
use crate::error::{validate_coordinates, AstroError};
use crate::western::signs::ZodiacSign;

/// Importance used when an event does not state one.
pub const DEFAULT_EVENT_IMPORTANCE: f64 = 0.7;
/// Fewest life events a rectification will accept.
pub const MIN_LIFE_EVENTS: usize = 3;
/// Widest search window, in hours, a rectification will accept.
pub const MAX_WINDOW_HOURS: u32 = 24;

/// Life event category. Unrecognized names are kept as `Other` and score
/// neutrally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventCategory {
    Marriage,
    Career,
    Education,
    Children,
    Health,
    Travel,
    Property,
    DeathFamily,
    Accident,
    Spiritual,
    Other(String),
}

impl EventCategory {
    pub fn parse(name: &str) -> EventCategory {
        match name.trim().to_lowercase().as_str() {
            "marriage" => EventCategory::Marriage,
            "career" => EventCategory::Career,
            "education" => EventCategory::Education,
            "children" => EventCategory::Children,
            "health" => EventCategory::Health,
            "travel" => EventCategory::Travel,
            "property" => EventCategory::Property,
            "death_family" => EventCategory::DeathFamily,
            "accident" => EventCategory::Accident,
            "spiritual" => EventCategory::Spiritual,
            other => EventCategory::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            EventCategory::Marriage => "marriage",
            EventCategory::Career => "career",
            EventCategory::Education => "education",
            EventCategory::Children => "children",
            EventCategory::Health => "health",
            EventCategory::Travel => "travel",
            EventCategory::Property => "property",
            EventCategory::DeathFamily => "death_family",
            EventCategory::Accident => "accident",
            EventCategory::Spiritual => "spiritual",
            EventCategory::Other(name) => name,
        }
    }

    /// Categories timed by a transiting Jupiter aspect.
    pub fn is_jupiter_favorable(&self) -> bool {
        matches!(
            self,
            EventCategory::Marriage
                | EventCategory::Career
                | EventCategory::Education
                | EventCategory::Children
        )
    }

    /// Categories timed by a transiting Saturn aspect.
    pub fn is_saturn_challenging(&self) -> bool {
        matches!(
            self,
            EventCategory::Career
                | EventCategory::Health
                | EventCategory::DeathFamily
                | EventCategory::Property
        )
    }

    /// Houses traditionally activated by this kind of event.
    pub fn correlated_houses(&self) -> &'static [u8] {
        match self {
            EventCategory::Marriage => &[7, 1],
            EventCategory::Career => &[10, 6],
            EventCategory::Education => &[5, 9],
            EventCategory::Children => &[5],
            EventCategory::Health => &[6, 8],
            EventCategory::Property => &[4],
            EventCategory::Travel => &[9, 3],
            _ => &[],
        }
    }
}

impl From<String> for EventCategory {
    fn from(value: String) -> Self {
        EventCategory::parse(&value)
    }
}

impl From<EventCategory> for String {
    fn from(value: EventCategory) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dated life event supplied for rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub event_date: NaiveDate,
    pub event_type: EventCategory,
    #[serde(default = "default_importance")]
    pub importance: f64,
}

fn default_importance() -> f64 {
    DEFAULT_EVENT_IMPORTANCE
}

impl LifeEvent {
    pub fn new(event_date: NaiveDate, event_type: EventCategory) -> Self {
        Self {
            event_date,
            event_type,
            importance: DEFAULT_EVENT_IMPORTANCE,
        }
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }
}

/// Inputs to a rectification search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectificationRequest {
    pub approx_time: DateTime<FixedOffset>,
    pub location: GeoLocation,
    pub life_events: Vec<LifeEvent>,
    pub time_window_hours: u32,
    /// Trait keyword to whether the person has it
    #[serde(default)]
    pub personality: BTreeMap<String, bool>,
}

impl RectificationRequest {
    pub fn new(
        approx_time: DateTime<FixedOffset>,
        latitude: f64,
        longitude: f64,
        life_events: Vec<LifeEvent>,
        time_window_hours: u32,
    ) -> Self {
        Self {
            approx_time,
            location: GeoLocation {
                lat: latitude,
                lon: longitude,
            },
            life_events,
            time_window_hours,
            personality: BTreeMap::new(),
        }
    }

    pub fn with_personality(mut self, personality: BTreeMap<String, bool>) -> Self {
        self.personality = personality;
        self
    }

    /// Check coordinates, window width, event count and event importance.
    pub fn validate(&self) -> Result<(), AstroError> {
        validate_coordinates(self.location.lat, self.location.lon)?;

        if self.time_window_hours > MAX_WINDOW_HOURS {
            return Err(AstroError::InvalidTimeWindow {
                hours: self.time_window_hours,
                max: MAX_WINDOW_HOURS,
            });
        }

        if self.life_events.len() < MIN_LIFE_EVENTS {
            return Err(AstroError::InsufficientEvents {
                required: MIN_LIFE_EVENTS,
                provided: self.life_events.len(),
            });
        }

        for (index, event) in self.life_events.iter().enumerate() {
            if !(0.0..=1.0).contains(&event.importance) {
                return Err(AstroError::InvalidImportance {
                    index,
                    value: event.importance,
                });
            }
        }
        Ok(())
    }
}

/// Reduced sidereal chart used to score one candidate time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateChart {
    pub julian_day: f64,
    pub ayanamsa_system: AyanamsaSystem,
    pub ayanamsa: f64,
    /// Sidereal longitudes for the Sun, Moon and Mercury through Saturn
    pub bodies: BTreeMap<Body, f64>,
    /// `(LST + latitude / 4) mod 360`
    pub ascendant: f64,
    pub ascendant_sign: ZodiacSign,
}

impl CandidateChart {
    pub fn body(&self, body: Body) -> f64 {
        self.bodies.get(&body).copied().unwrap_or(0.0)
    }

    pub fn moon_longitude(&self) -> f64 {
        self.body(Body::Moon)
    }
}

/// Per-method scores, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodScores {
    pub dasha_events: f64,
    pub transit_timing: f64,
    pub ascendant_traits: f64,
    pub house_events: f64,
}

impl MethodScores {
    pub const DASHA_WEIGHT: f64 = 0.35;
    pub const TRANSIT_WEIGHT: f64 = 0.25;
    pub const TRAITS_WEIGHT: f64 = 0.20;
    pub const HOUSES_WEIGHT: f64 = 0.20;

    pub fn composite(&self) -> f64 {
        self.dasha_events * Self::DASHA_WEIGHT
            + self.transit_timing * Self::TRANSIT_WEIGHT
            + self.ascendant_traits * Self::TRAITS_WEIGHT
            + self.house_events * Self::HOUSES_WEIGHT
    }

    pub fn as_array(&self) -> [f64; 4] {
        [
            self.dasha_events,
            self.transit_timing,
            self.ascendant_traits,
            self.house_events,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const HIGH_THRESHOLD: f64 = 0.85;
    pub const MEDIUM_THRESHOLD: f64 = 0.65;
    pub const CONSISTENCY_VARIANCE: f64 = 0.05;
    pub const CONSISTENCY_BONUS: f64 = 0.1;

    /// Classify a composite score. Consistent method scores (low variance
    /// around the composite) earn a bonus for the comparison only.
    pub fn classify(composite: f64, scores: &MethodScores) -> Confidence {
        let values = scores.as_array();
        let variance = values.iter().map(|s| (s - composite).powi(2)).sum::<f64>() / values.len() as f64;

        let bonus = if variance < Self::CONSISTENCY_VARIANCE {
            Self::CONSISTENCY_BONUS
        } else {
            0.0
        };
        let adjusted = composite + bonus;

        if adjusted >= Self::HIGH_THRESHOLD {
            Confidence::High
        } else if adjusted >= Self::MEDIUM_THRESHOLD {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectificationCandidate {
    pub candidate_timestamp: DateTime<FixedOffset>,
    pub chart: CandidateChart,
    pub scores: MethodScores,
    pub composite_score: f64,
    pub confidence: Confidence,
}

/// Phases of a rectification search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchState {
    ValidatingInput,
    GeneratingCandidates,
    ScoringCandidates,
    Ranking,
    Done,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectificationResult {
    pub success: bool,
    pub state: SearchState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rectified_time: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<RectificationCandidate>,
    pub alternatives: Vec<RectificationCandidate>,
    pub total_candidates_tested: usize,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AstroError>,
}

impl RectificationResult {
    pub fn failed(error: AstroError) -> Self {
        let recommendations = match &error {
            AstroError::InsufficientEvents { required, .. } => {
                vec![format!("Please provide at least {} significant life events", required)]
            }
            _ => Vec::new(),
        };
        Self {
            success: false,
            state: SearchState::Failed,
            rectified_time: None,
            best: None,
            alternatives: Vec::new(),
            total_candidates_tested: 0,
            recommendations,
            error: Some(error),
        }
    }
}
