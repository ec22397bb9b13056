//! Scripted collaborators for engine tests.
#![allow(dead_code)]

use async_trait::async_trait;
use itinera_core::{Annotation, Coordinates, Event, Resolution, ResolutionSource, Stay};
use itinera_error::{
    AnnotationError, AnnotationErrorKind, GeocodeError, GeocodeErrorKind, GeocodeResult,
    ItineraResult,
};
use itinera_interface::{Annotator, Geocoder, NarrativeExtractor};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Geocoder answering from a table keyed by exact query.
#[derive(Clone, Default)]
pub struct TableGeocoder {
    name: &'static str,
    table: HashMap<String, Coordinates>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl TableGeocoder {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn with(mut self, query: &str, coordinates: Coordinates) -> Self {
        self.table.insert(query.to_string(), coordinates);
        self
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, query: &str) -> GeocodeResult<Coordinates> {
        self.queries.lock().unwrap().push(query.to_string());
        self.table
            .get(query)
            .copied()
            .ok_or_else(|| GeocodeError::new(GeocodeErrorKind::NoResults(query.to_string())))
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

/// How the mock annotator answers one place.
#[derive(Clone)]
pub enum Answer {
    Annotate(Annotation),
    Fail(AnnotationErrorKind),
}

/// Annotator answering per place and recording `(place, text)` calls.
#[derive(Clone, Default)]
pub struct MockAnnotator {
    answers: HashMap<String, Answer>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answering(mut self, place: &str, annotation: Annotation) -> Self {
        self.answers
            .insert(place.to_string(), Answer::Annotate(annotation));
        self
    }

    pub fn failing(mut self, place: &str, kind: AnnotationErrorKind) -> Self {
        self.answers.insert(place.to_string(), Answer::Fail(kind));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Annotator for MockAnnotator {
    async fn annotate(&self, place: &str, text: &str) -> ItineraResult<Annotation> {
        self.calls
            .lock()
            .unwrap()
            .push((place.to_string(), text.to_string()));
        match self.answers.get(place) {
            Some(Answer::Annotate(annotation)) => Ok(annotation.clone()),
            Some(Answer::Fail(kind)) => Err(AnnotationError::new(kind.clone()).into()),
            None => Ok(Annotation::neutral()),
        }
    }
}

/// Extractor returning canned records for every narrative.
#[derive(Clone)]
pub struct MockExtractor {
    hint: String,
    records: Vec<Value>,
    narratives: Arc<Mutex<Vec<String>>>,
}

impl MockExtractor {
    pub fn new(hint: &str, records: Vec<Value>) -> Self {
        Self {
            hint: hint.to_string(),
            records,
            narratives: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of extraction calls.
    pub fn call_count(&self) -> usize {
        self.narratives.lock().unwrap().len()
    }

    pub fn narratives(&self) -> Vec<String> {
        self.narratives.lock().unwrap().clone()
    }
}

#[async_trait]
impl NarrativeExtractor for MockExtractor {
    async fn region_hint(&self, _narrative: &str) -> ItineraResult<String> {
        Ok(self.hint.clone())
    }

    async fn extract_events(
        &self,
        narrative: &str,
        _region_hint: &str,
    ) -> ItineraResult<Vec<Value>> {
        self.narratives.lock().unwrap().push(narrative.to_string());
        Ok(self.records.clone())
    }
}

/// Write `{dir}/{id}.tra.json` with the given fragments in a single entry.
pub fn write_source(dir: &Path, document_id: &str, fragments: &[&str]) {
    let body = serde_json::json!([{ "text": fragments }]);
    std::fs::write(
        dir.join(format!("{}.tra.json", document_id)),
        body.to_string(),
    )
    .unwrap();
}

/// A stay resolved at `(latitude, longitude)`.
pub fn resolved_stay(position: usize, place: &str, latitude: f64, longitude: f64) -> Event {
    let mut stay = Stay::new(position, place);
    stay.resolve(Resolution {
        coordinates: Coordinates::new(latitude, longitude),
        source: ResolutionSource::Primary,
    });
    Event::from(stay)
}
