//! Stay and move events of a travel narrative.

use crate::{Annotation, Coordinates, NEUTRAL_SCORE};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Transport means recorded when the narrative does not name one.
pub const UNKNOWN_MEANS: &str = "unknown";

/// Which resolution tier produced a stay's coordinates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResolutionSource {
    /// Free-text provider scoped by the region hint
    Primary,
    /// Exact address search keyed by place name
    Secondary,
    /// The narrative model's own coordinate estimate
    ModelEstimate,
}

/// Coordinates together with the tier that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved position
    pub coordinates: Coordinates,
    /// Tier that produced it
    pub source: ResolutionSource,
}

/// Dwelling at a place.
///
/// # Examples
///
/// ```
/// use itinera_core::{Coordinates, Stay};
///
/// let stay = Stay::new(0, "湯畑")
///     .with_experience_text("湯畑を散策しました。")
///     .with_estimated_coordinates(Coordinates::new(36.6214, 138.5968));
///
/// assert_eq!(stay.place(), "湯畑");
/// assert_eq!(*stay.sentiment_score(), 0.5);
/// assert!(!stay.is_resolved());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct Stay {
    /// Index of the raw record in the extracted sequence
    #[setters(skip)]
    position: usize,
    /// Place name as narrated
    #[setters(skip)]
    place: String,
    /// Resolved coordinates, absent until resolution succeeds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(skip)]
    coordinates: Option<Coordinates>,
    /// Tier that produced `coordinates`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(skip)]
    resolution: Option<ResolutionSource>,
    /// The narrative model's coordinate guess, last-resort fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    estimated_coordinates: Option<Coordinates>,
    /// Why the model placed the stay where it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option)]
    narrative_reasoning: Option<String>,
    /// What happened at the place
    #[serde(default)]
    experience_text: String,
    /// Sentiment in [0.0, 1.0]
    #[serde(default = "default_score")]
    #[setters(skip)]
    sentiment_score: f64,
    /// Category tags
    #[serde(default)]
    #[setters(skip)]
    tags: BTreeSet<String>,
}

fn default_score() -> f64 {
    NEUTRAL_SCORE
}

impl Stay {
    /// Create an unresolved stay with neutral sentiment and no tags.
    pub fn new(position: usize, place: impl Into<String>) -> Self {
        Self {
            position,
            place: place.into(),
            coordinates: None,
            resolution: None,
            estimated_coordinates: None,
            narrative_reasoning: None,
            experience_text: String::new(),
            sentiment_score: NEUTRAL_SCORE,
            tags: BTreeSet::new(),
        }
    }

    /// Resolved iff coordinates are present and not the sentinel.
    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some_and(|c| !c.is_sentinel())
    }

    /// Record a successful resolution.
    ///
    /// A sentinel coordinate is never stored; the stay is left unresolved.
    pub fn resolve(&mut self, resolution: Resolution) {
        if resolution.coordinates.is_sentinel() {
            self.clear_resolution();
            return;
        }
        self.coordinates = Some(resolution.coordinates);
        self.resolution = Some(resolution.source);
    }

    /// Drop any resolved coordinates.
    pub fn clear_resolution(&mut self) {
        self.coordinates = None;
        self.resolution = None;
    }

    /// Copy a place annotation onto this stay.
    pub fn apply_annotation(&mut self, annotation: &Annotation) {
        self.sentiment_score = *annotation.score();
        self.tags = annotation.tags().clone();
    }
}

/// Transit between two stays.
///
/// # Examples
///
/// ```
/// use itinera_core::Move;
///
/// let walk = Move::new(1, "").with_experience_text("歩いて移動");
/// assert_eq!(walk.means(), "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", into)]
pub struct Move {
    /// Index of the raw record in the extracted sequence
    #[setters(skip)]
    position: usize,
    /// Transport means, ideally from the transport vocabulary
    #[setters(skip)]
    means: String,
    /// What happened on the way
    #[serde(default)]
    experience_text: String,
}

impl Move {
    /// Create a move; blank `means` becomes `"unknown"`.
    pub fn new(position: usize, means: impl Into<String>) -> Self {
        let means = means.into();
        let means = if means.trim().is_empty() {
            UNKNOWN_MEANS.to_string()
        } else {
            means.trim().to_string()
        };
        Self {
            position,
            means,
            experience_text: String::new(),
        }
    }
}

/// One entry of an itinerary timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::From)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// Dwelling at a place
    Stay(Stay),
    /// Transit between stays
    Move(Move),
}

impl Event {
    /// Ordinal position in the extracted sequence.
    pub fn position(&self) -> usize {
        match self {
            Event::Stay(stay) => *stay.position(),
            Event::Move(mv) => *mv.position(),
        }
    }

    /// Borrow as a stay.
    pub fn as_stay(&self) -> Option<&Stay> {
        match self {
            Event::Stay(stay) => Some(stay),
            Event::Move(_) => None,
        }
    }

    /// Mutably borrow as a stay.
    pub fn as_stay_mut(&mut self) -> Option<&mut Stay> {
        match self {
            Event::Stay(stay) => Some(stay),
            Event::Move(_) => None,
        }
    }

    /// Borrow as a move.
    pub fn as_move(&self) -> Option<&Move> {
        match self {
            Event::Move(mv) => Some(mv),
            Event::Stay(_) => None,
        }
    }
}
