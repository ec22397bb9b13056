//! Normalization of heterogeneous extracted records into typed events.

use itinera_core::{clamp_score, Annotation, Coordinates, Event, Move, Stay, NEUTRAL_SCORE};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const KIND_KEYS: &[&str] = &["type", "kind", "event_type"];
const LATITUDE_KEYS: &[&str] = &["latitude", "lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lon", "lng"];
const SCORE_KEYS: &[&str] = &["sentiment_score", "emotion_score"];
const EXPERIENCE_KEYS: &[&str] = &["experience", "experience_text", "description"];
const REASONING_KEYS: &[&str] = &["reasoning", "narrative_reasoning"];
const MEANS_KEYS: &[&str] = &["means", "transport"];

/// Why a raw record was dropped.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
enum Rejection {
    #[display("record is not a JSON object")]
    NotAnObject,
    #[display("unknown event kind '{}'", _0)]
    UnknownKind(String),
    #[display("stay without a place name")]
    MissingPlace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stay,
    Move,
}

/// Turn raw extractor records into events, preserving their order.
///
/// Each event's position is the index of its raw record. Malformed records
/// are dropped with a warning; the rest are kept.
///
/// # Examples
///
/// ```
/// use itinera_narrative::canonicalize;
/// use serde_json::json;
///
/// let raw = vec![
///     json!({"place": "湯畑", "latitude": "36.6214", "longitude": 138.5968}),
///     json!({"type": "move", "transport": "徒歩"}),
///     json!({"type": "stay"}),
/// ];
///
/// let events = canonicalize(&raw);
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].position(), 1);
/// ```
pub fn canonicalize(raw: &[Value]) -> Vec<Event> {
    let events: Vec<Event> = raw
        .iter()
        .enumerate()
        .filter_map(|(position, record)| match canonicalize_record(position, record) {
            Ok(event) => Some(event),
            Err(reason) => {
                warn!(position, %reason, "Dropping malformed event record");
                None
            }
        })
        .collect();

    debug!(raw = raw.len(), kept = events.len(), "Canonicalized event records");
    events
}

fn canonicalize_record(position: usize, record: &Value) -> Result<Event, Rejection> {
    let object = record.as_object().ok_or(Rejection::NotAnObject)?;

    match kind_of(object)? {
        Kind::Stay => stay_from(position, object).map(Event::from),
        Kind::Move => Ok(Event::from(move_from(position, object))),
    }
}

fn kind_of(object: &Map<String, Value>) -> Result<Kind, Rejection> {
    if let Some(label) = first_string(object, KIND_KEYS) {
        return match label.trim().to_lowercase().as_str() {
            "stay" | "visit" | "place" => Ok(Kind::Stay),
            "move" | "transit" | "travel" => Ok(Kind::Move),
            _ => Err(Rejection::UnknownKind(label.to_string())),
        };
    }

    let has = |key: &str| object.get(key).is_some_and(|v| !v.is_null());
    if has("place") {
        Ok(Kind::Stay)
    } else if MEANS_KEYS.iter().any(|key| has(key)) {
        Ok(Kind::Move)
    } else {
        Err(Rejection::MissingPlace)
    }
}

fn stay_from(position: usize, object: &Map<String, Value>) -> Result<Stay, Rejection> {
    let place = object
        .get("place")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|place| !place.is_empty())
        .ok_or(Rejection::MissingPlace)?;

    let mut stay = Stay::new(position, place).with_experience_text(experience_of(object));

    if let Some(coordinates) = coordinates_of(object) {
        stay = stay.with_estimated_coordinates(coordinates);
    }
    if let Some(reasoning) = first_string(object, REASONING_KEYS) {
        stay = stay.with_narrative_reasoning(reasoning.trim());
    }

    let score = SCORE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(as_number))
        .map(clamp_score)
        .unwrap_or(NEUTRAL_SCORE);
    stay.apply_annotation(&Annotation::new(score, tags_of(object)));

    Ok(stay)
}

fn move_from(position: usize, object: &Map<String, Value>) -> Move {
    let means = first_string(object, MEANS_KEYS).unwrap_or_default();
    Move::new(position, means).with_experience_text(experience_of(object))
}

fn first_string<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
}

/// Number or numeric string.
fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn coordinates_of(object: &Map<String, Value>) -> Option<Coordinates> {
    let latitude = LATITUDE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(as_number));
    let longitude = LONGITUDE_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(as_number));

    if let (Some(latitude), Some(longitude)) = (latitude, longitude) {
        return Some(Coordinates::new(latitude, longitude));
    }

    // [lat, lon] pair
    match object.get("coordinates").and_then(Value::as_array)?.as_slice() {
        [lat, lon, ..] => Some(Coordinates::new(as_number(lat)?, as_number(lon)?)),
        _ => None,
    }
}

fn experience_of(object: &Map<String, Value>) -> String {
    EXPERIENCE_KEYS
        .iter()
        .find_map(|key| match object.get(*key)? {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Array(parts) => Some(
                parts
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

fn tags_of(object: &Map<String, Value>) -> Vec<String> {
    match object.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(list)) => list
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}
