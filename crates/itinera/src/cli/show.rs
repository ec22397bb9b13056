//! Cache inspection command handlers.

use crate::{open_cache, ItineraConfig};
use itinera_error::{ItineraResult, JsonError};
use itinera_interface::ItineraryStore;
use itinera_narrative::segment;
use serde_json::json;

/// Pretty JSON of the cached itinerary for `document_id`, if any.
pub fn show_itinerary(config: &ItineraConfig, document_id: &str) -> ItineraResult<Option<String>> {
    let Some(itinerary) = open_cache(config)?.load(document_id)? else {
        return Ok(None);
    };
    let text = serde_json::to_string_pretty(&itinerary)
        .map_err(|e| JsonError::new(format!("Failed to serialize itinerary: {}", e)))?;
    Ok(Some(text))
}

/// One line per segment of the cached itinerary for `document_id`.
///
/// `max_km` overrides the configured distance limit.
pub fn show_segments(
    config: &ItineraConfig,
    document_id: &str,
    max_km: Option<f64>,
) -> ItineraResult<Option<Vec<String>>> {
    let Some(itinerary) = open_cache(config)?.load(document_id)? else {
        return Ok(None);
    };

    let max_km = max_km.unwrap_or(config.engine.max_segment_km);
    let lines = segment(itinerary.events(), max_km)
        .iter()
        .map(|segment| {
            json!({
                "from": segment.from.place(),
                "to": segment.to.place(),
                "means": segment.means(),
                "distance_km": (segment.distance_km * 100.0).round() / 100.0,
            })
            .to_string()
        })
        .collect();
    Ok(Some(lines))
}
