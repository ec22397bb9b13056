//! Renderer input: resolved stays, moves and segments per itinerary.

use crate::segment;
use chrono::{DateTime, TimeZone};
use itinera_core::{Coordinates, Itinerary, Move, ResolvedSegment, Stay};
use itinera_error::{ItineraResult, JsonError, SourceError, SourceErrorKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Map center used when nothing was resolved (Tokyo Station).
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 35.6812,
    longitude: 139.7671,
};

/// From this many itineraries on, output files are named by timestamp.
pub const TIMESTAMP_NAME_THRESHOLD: usize = 4;

/// One itinerary as the map renderer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedItinerary<'a> {
    /// Identifier of the source document
    pub document_id: &'a str,
    /// Line and marker color
    pub color: &'a str,
    /// Locality the itinerary was resolved in
    pub region_hint: &'a str,
    /// Stays with coordinates, in narrative order
    pub stays: Vec<&'a Stay>,
    /// Every move, in narrative order
    pub moves: Vec<&'a Move>,
    /// Distance-gated connections between consecutive stays
    pub segments: Vec<ResolvedSegment<'a>>,
}

/// Complete renderer input for one batch.
///
/// # Examples
///
/// ```
/// use itinera_narrative::{RenderPayload, DEFAULT_CENTER};
///
/// let payload = RenderPayload::new(&[], 100.0);
/// assert_eq!(payload.center, DEFAULT_CENTER);
/// assert!(payload.itineraries.is_empty());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct RenderPayload<'a> {
    /// Initial map center
    pub center: Coordinates,
    /// Rendered itineraries in batch order
    pub itineraries: Vec<RenderedItinerary<'a>>,
}

impl<'a> RenderPayload<'a> {
    /// Build the payload, dropping unresolved stays and over-long segments.
    ///
    /// The center is the first resolved stay of the first itinerary.
    pub fn new(itineraries: &'a [Itinerary], max_distance_km: f64) -> Self {
        let center = itineraries
            .first()
            .and_then(|itinerary| itinerary.resolved_stays().next())
            .and_then(|stay| *stay.coordinates())
            .unwrap_or(DEFAULT_CENTER);

        let itineraries = itineraries
            .iter()
            .map(|itinerary| RenderedItinerary {
                document_id: itinerary.document_id(),
                color: itinerary.color(),
                region_hint: itinerary.region_hint(),
                stays: itinerary.resolved_stays().collect(),
                moves: itinerary.moves().collect(),
                segments: segment(itinerary.events(), max_distance_km),
            })
            .collect();

        Self {
            center,
            itineraries,
        }
    }
}

/// Output file name for a rendered batch.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use itinera_narrative::output_file_name;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
/// assert_eq!(output_file_name(&["12", "34"], &now), "trace_map_12_34.json");
/// assert_eq!(
///     output_file_name(&["1", "2", "3", "4"], &now),
///     "trace_map_20240501_093000.json"
/// );
/// ```
pub fn output_file_name<S, Tz>(document_ids: &[S], now: &DateTime<Tz>) -> String
where
    S: AsRef<str>,
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if document_ids.len() >= TIMESTAMP_NAME_THRESHOLD {
        format!("trace_map_{}.json", now.format("%Y%m%d_%H%M%S"))
    } else {
        let ids: Vec<&str> = document_ids.iter().map(AsRef::as_ref).collect();
        format!("trace_map_{}.json", ids.join("_"))
    }
}

/// Write `payload` as pretty JSON to `output_dir/file_name`.
#[tracing::instrument(skip(payload), fields(itineraries = payload.itineraries.len()))]
pub fn write_payload(
    output_dir: &Path,
    file_name: &str,
    payload: &RenderPayload<'_>,
) -> ItineraResult<PathBuf> {
    let body = serde_json::to_string_pretty(payload)
        .map_err(|e| JsonError::new(format!("Failed to serialize render payload: {}", e)))?;

    std::fs::create_dir_all(output_dir).map_err(|e| {
        SourceError::new(SourceErrorKind::Write(format!(
            "{}: {}",
            output_dir.display(),
            e
        )))
    })?;

    let path = output_dir.join(file_name);
    std::fs::write(&path, body)
        .map_err(|e| SourceError::new(SourceErrorKind::Write(format!("{}: {}", path.display(), e))))?;

    tracing::info!(path = %path.display(), "Wrote render payload");
    Ok(path)
}
