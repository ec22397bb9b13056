//! Per-document itinerary.

use crate::{Event, Move, Stay};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The resolved itinerary of one source document.
///
/// Owns its ordered event list. The serialized form is the cache record
/// `{document_id, events, color, region_hint}`.
///
/// # Examples
///
/// ```
/// use itinera_core::{Event, Itinerary, Move, Stay};
///
/// let itinerary = Itinerary::new(
///     "1234",
///     vec![
///         Event::from(Stay::new(0, "草津温泉")),
///         Event::from(Move::new(1, "バス")),
///         Event::from(Stay::new(2, "湯畑")),
///     ],
///     "blue",
///     "群馬県",
/// );
///
/// assert_eq!(itinerary.stays().count(), 2);
/// assert_eq!(itinerary.moves().count(), 1);
/// assert_eq!(itinerary.resolved_stays().count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Itinerary {
    /// Identifier of the source document
    document_id: String,
    /// Events in narrative order
    events: Vec<Event>,
    /// Render color assigned by the batch
    color: String,
    /// Locality used to scope primary geocoding
    region_hint: String,
}

impl Itinerary {
    /// Assemble an itinerary from already-resolved events.
    pub fn new(
        document_id: impl Into<String>,
        events: Vec<Event>,
        color: impl Into<String>,
        region_hint: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            events,
            color: color.into(),
            region_hint: region_hint.into(),
        }
    }

    /// All stays, resolved or not.
    pub fn stays(&self) -> impl Iterator<Item = &Stay> {
        self.events.iter().filter_map(Event::as_stay)
    }

    /// Stays with usable coordinates.
    pub fn resolved_stays(&self) -> impl Iterator<Item = &Stay> {
        self.stays().filter(|stay| stay.is_resolved())
    }

    /// Stays kept for audit only.
    pub fn unresolved_stays(&self) -> impl Iterator<Item = &Stay> {
        self.stays().filter(|stay| !stay.is_resolved())
    }

    /// All moves.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        self.events.iter().filter_map(Event::as_move)
    }
}
