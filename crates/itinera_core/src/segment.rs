//! Derived route segments.

use crate::{Move, Stay};
use serde::Serialize;

/// A physically plausible connection between two consecutive resolved stays.
///
/// Borrowed from the itinerary it was computed from and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedSegment<'a> {
    /// Departure stay
    pub from: &'a Stay,
    /// Arrival stay
    pub to: &'a Stay,
    /// First move narrated between the two stays, if any
    pub via: Option<&'a Move>,
    /// Great-circle distance between the stays
    pub distance_km: f64,
}

impl ResolvedSegment<'_> {
    /// Transport means of the attached move, if any.
    pub fn means(&self) -> Option<&str> {
        self.via.map(|mv| mv.means().as_str())
    }
}
