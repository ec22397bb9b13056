//! Capability traits for external collaborators.

use async_trait::async_trait;
use itinera_core::{Annotation, Coordinates, GenerateRequest, GenerateResponse, Itinerary};
use itinera_error::{GeocodeError, GeocodeErrorKind, GeocodeResult, ItineraResult};

/// A single geocoding provider.
///
/// Implementors only provide [`Geocoder::geocode`]; [`Geocoder::resolve`]
/// turns every failure into `None` so a provider error never escapes the
/// adapter boundary.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up `query`, reporting why the lookup failed.
    async fn geocode(&self, query: &str) -> GeocodeResult<Coordinates>;

    /// Provider name used in logs (e.g., "nominatim", "gsi").
    fn provider_name(&self) -> &'static str;

    /// Look up `query`, swallowing provider errors.
    ///
    /// Never returns the `(0.0, 0.0)` sentinel or an out-of-range pair.
    async fn resolve(&self, query: &str) -> Option<Coordinates> {
        let result = self.geocode(query).await.and_then(|coordinates| {
            if coordinates.is_sentinel() {
                Err(GeocodeError::new(GeocodeErrorKind::Sentinel(
                    query.to_string(),
                )))
            } else if !coordinates.is_valid() {
                Err(GeocodeError::new(GeocodeErrorKind::OutOfRange(
                    coordinates.to_string(),
                )))
            } else {
                Ok(coordinates)
            }
        });

        match result {
            Ok(coordinates) => {
                tracing::debug!(
                    provider = self.provider_name(),
                    query,
                    %coordinates,
                    "Geocoding hit"
                );
                Some(coordinates)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.provider_name(),
                    query,
                    error = %e.kind,
                    "Geocoding failed"
                );
                None
            }
        }
    }
}

/// Core trait for the chat-completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generate a completion for `req`.
    async fn generate(&self, req: &GenerateRequest) -> ItineraResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;
}

/// Sentiment and category annotation of a place's narrative.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Annotate the combined experience text of one place.
    ///
    /// Malformed model output yields [`Annotation::neutral`]; only transport
    /// and credential failures are reported as errors.
    async fn annotate(&self, place: &str, text: &str) -> ItineraResult<Annotation>;
}

/// Region-hint inference and raw event extraction from a narrative.
#[async_trait]
pub trait NarrativeExtractor: Send + Sync {
    /// The locality (usually a prefecture) the narrative most likely describes.
    async fn region_hint(&self, narrative: &str) -> ItineraResult<String>;

    /// Heterogeneous raw event records, in narrative order.
    ///
    /// `region_hint` scopes the model's coordinate estimates.
    async fn extract_events(
        &self,
        narrative: &str,
        region_hint: &str,
    ) -> ItineraResult<Vec<serde_json::Value>>;
}

/// Per-document persistence of resolved itineraries.
///
/// A present entry is authoritative: callers short-circuit on it.
pub trait ItineraryStore: Send + Sync {
    /// Load the itinerary cached for `document_id`, if any.
    fn load(&self, document_id: &str) -> ItineraResult<Option<Itinerary>>;

    /// Persist a freshly built itinerary. Refuses to overwrite an entry.
    fn store(&self, itinerary: &Itinerary) -> ItineraResult<()>;
}
