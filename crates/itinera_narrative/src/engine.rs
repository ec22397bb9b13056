//! Per-document resolution: cache, source, extraction, geocoding, annotation.

use crate::{aggregate_and_annotate, canonicalize, read_narrative};
use itinera_core::{Event, Itinerary};
use itinera_error::ItineraResult;
use itinera_geocode::ResolutionChain;
use itinera_interface::{Annotator, ItineraryStore, NarrativeExtractor};
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};

/// What happened to one document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentOutcome {
    /// Returned unchanged from the cache; no external call was made
    Cached(Itinerary),
    /// Built from the source document and stored
    Built(Itinerary),
    /// Could not be built; the batch moves on
    Skipped {
        /// Identifier of the skipped document
        document_id: String,
        /// Human-readable cause
        reason: String,
    },
}

impl DocumentOutcome {
    /// The itinerary, unless the document was skipped.
    pub fn itinerary(&self) -> Option<&Itinerary> {
        match self {
            DocumentOutcome::Cached(itinerary) | DocumentOutcome::Built(itinerary) => {
                Some(itinerary)
            }
            DocumentOutcome::Skipped { .. } => None,
        }
    }

    /// Consume the outcome, yielding the itinerary if there is one.
    pub fn into_itinerary(self) -> Option<Itinerary> {
        match self {
            DocumentOutcome::Cached(itinerary) | DocumentOutcome::Built(itinerary) => {
                Some(itinerary)
            }
            DocumentOutcome::Skipped { .. } => None,
        }
    }

    fn skipped(document_id: &str, reason: impl Into<String>) -> Self {
        DocumentOutcome::Skipped {
            document_id: document_id.to_string(),
            reason: reason.into(),
        }
    }
}

/// Turns a document id into a resolved itinerary.
///
/// All external calls are awaited one at a time. Recoverable failures turn
/// into [`DocumentOutcome::Skipped`]; only fatal errors are returned as `Err`.
pub struct ItineraryEngine {
    extractor: Box<dyn NarrativeExtractor>,
    annotator: Box<dyn Annotator>,
    chain: ResolutionChain,
    store: Box<dyn ItineraryStore>,
    source_dir: PathBuf,
    source_suffix: String,
}

impl ItineraryEngine {
    /// Wire an engine from its collaborators.
    pub fn new(
        extractor: Box<dyn NarrativeExtractor>,
        annotator: Box<dyn Annotator>,
        chain: ResolutionChain,
        store: Box<dyn ItineraryStore>,
        source_dir: impl Into<PathBuf>,
        source_suffix: impl Into<String>,
    ) -> Self {
        Self {
            extractor,
            annotator,
            chain,
            store,
            source_dir: source_dir.into(),
            source_suffix: source_suffix.into(),
        }
    }

    /// The itinerary store backing this engine.
    pub fn store(&self) -> &dyn ItineraryStore {
        self.store.as_ref()
    }

    /// Resolve one document, consulting the cache first.
    #[instrument(skip(self))]
    pub async fn resolve_document(
        &self,
        document_id: &str,
        color: &str,
    ) -> ItineraResult<DocumentOutcome> {
        match self.store.load(document_id) {
            Ok(Some(itinerary)) => {
                info!("Using cached itinerary");
                return Ok(DocumentOutcome::Cached(itinerary));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "Unusable cache entry");
                return Ok(DocumentOutcome::skipped(document_id, e.to_string()));
            }
        }

        match self.build(document_id, color).await {
            Ok(Some(itinerary)) => {
                if let Err(e) = self.store.store(&itinerary) {
                    warn!(error = %e, "Failed to cache itinerary");
                }
                Ok(DocumentOutcome::Built(itinerary))
            }
            Ok(None) => Ok(DocumentOutcome::skipped(document_id, "no events extracted")),
            Err(e) if e.is_fatal() => {
                error!(error = %e, "Fatal failure while building itinerary");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Skipping document");
                Ok(DocumentOutcome::skipped(document_id, e.to_string()))
            }
        }
    }

    async fn build(&self, document_id: &str, color: &str) -> ItineraResult<Option<Itinerary>> {
        let narrative = read_narrative(&self.source_dir, document_id, &self.source_suffix)?;

        let region_hint = self.extractor.region_hint(&narrative).await?;
        debug!(region_hint = %region_hint, "Region hint");

        let raw = self.extractor.extract_events(&narrative, &region_hint).await?;
        let mut events = canonicalize(&raw);
        if events.is_empty() {
            warn!(raw = raw.len(), "No usable events in extraction");
            return Ok(None);
        }

        let resolved = self.geocode(&mut events, &region_hint).await;
        debug!(resolved, "Geocoded stays");

        let report = aggregate_and_annotate(&mut events, self.annotator.as_ref()).await?;
        debug!(
            places = report.places,
            annotated = report.annotated,
            failed = report.failed,
            "Annotated places"
        );

        let itinerary = Itinerary::new(document_id, events, color, region_hint);
        info!(
            events = itinerary.events().len(),
            resolved = itinerary.resolved_stays().count(),
            unresolved = itinerary.unresolved_stays().count(),
            "Built itinerary"
        );

        Ok(Some(itinerary))
    }

    /// Resolve every stay in order, returning how many succeeded.
    async fn geocode(&self, events: &mut [Event], region_hint: &str) -> usize {
        let mut resolved = 0;
        for stay in events.iter_mut().filter_map(Event::as_stay_mut) {
            let fallback = *stay.estimated_coordinates();
            let resolution = self
                .chain
                .resolve_place(stay.place(), region_hint, fallback)
                .await;
            match resolution {
                Some(resolution) => {
                    stay.resolve(resolution);
                    resolved += 1;
                }
                None => stay.clear_resolution(),
            }
        }
        resolved
    }
}

impl std::fmt::Debug for ItineraryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryEngine")
            .field("source_dir", &self.source_dir)
            .field("source_suffix", &self.source_suffix)
            .finish_non_exhaustive()
    }
}
