//! Scripted geocoders for resolution chain tests.

use async_trait::async_trait;
use itinera_core::Coordinates;
use itinera_error::{GeocodeError, GeocodeErrorKind, GeocodeResult};
use itinera_interface::Geocoder;
use std::sync::{Arc, Mutex};

/// Geocoder returning a fixed answer and recording every query.
#[derive(Clone)]
pub struct MockGeocoder {
    name: &'static str,
    answer: Option<Coordinates>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockGeocoder {
    /// Always answers `coordinates`.
    pub fn hit(name: &'static str, coordinates: Coordinates) -> Self {
        Self {
            name,
            answer: Some(coordinates),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always reports no results.
    pub fn miss(name: &'static str) -> Self {
        Self {
            name,
            answer: None,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of lookups performed.
    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Queries received, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn geocode(&self, query: &str) -> GeocodeResult<Coordinates> {
        self.queries.lock().unwrap().push(query.to_string());
        self.answer
            .ok_or_else(|| GeocodeError::new(GeocodeErrorKind::NoResults(query.to_string())))
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}
