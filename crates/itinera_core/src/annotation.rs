//! Sentiment and category annotation attached to stays.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentiment score given to a place nobody has annotated yet.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Result of annotating the combined narrative of one place.
///
/// # Examples
///
/// ```
/// use itinera_core::Annotation;
///
/// let annotation = Annotation::new(1.7, ["景色鑑賞"]);
/// assert_eq!(*annotation.score(), 1.0);
/// assert!(annotation.tags().contains("景色鑑賞"));
///
/// assert_eq!(*Annotation::neutral().score(), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Annotation {
    /// Sentiment in [0.0, 1.0], 1.0 most positive
    score: f64,
    /// Category tags from the closed vocabulary
    tags: BTreeSet<String>,
}

impl Annotation {
    /// Create an annotation, clamping the score into [0.0, 1.0].
    ///
    /// A non-finite score is replaced by the neutral score.
    pub fn new<I, S>(score: f64, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            score: clamp_score(score),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// The default `{0.5, ∅}` annotation.
    pub fn neutral() -> Self {
        Self {
            score: NEUTRAL_SCORE,
            tags: BTreeSet::new(),
        }
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Clamp a sentiment score into [0.0, 1.0], mapping NaN/inf to neutral.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        NEUTRAL_SCORE
    }
}
