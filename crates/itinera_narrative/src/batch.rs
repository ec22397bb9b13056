//! Sequential batch driver.

use crate::{DocumentOutcome, ItineraryEngine};
use itinera_core::{color_for, Itinerary};
use tracing::{error, info, instrument};

/// A document the batch could not build.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct SkippedDocument {
    document_id: String,
    reason: String,
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Itineraries in batch order, cached and freshly built alike
    pub itineraries: Vec<Itinerary>,
    /// Documents skipped after a recoverable failure
    pub skipped: Vec<SkippedDocument>,
    /// Cause of a fatal stop, if the batch ended early
    pub aborted: Option<String>,
}

impl BatchReport {
    /// Whether every document was attempted.
    pub fn completed(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Runs the engine over a list of document ids, one at a time.
#[derive(Debug)]
pub struct BatchRunner {
    engine: ItineraryEngine,
    palette: Vec<String>,
}

impl BatchRunner {
    /// Create a runner that colors documents from `palette`.
    pub fn new(engine: ItineraryEngine, palette: Vec<String>) -> Self {
        Self { engine, palette }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &ItineraryEngine {
        &self.engine
    }

    /// Resolve `document_ids` in order.
    ///
    /// The document at batch index `i` gets `palette[i % len]`. A fatal
    /// error stops the run; everything completed before it is kept.
    #[instrument(skip(self, document_ids), fields(documents = document_ids.len()))]
    pub async fn run(&self, document_ids: &[String]) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, document_id) in document_ids.iter().enumerate() {
            let color = color_for(&self.palette, index).unwrap_or_default();

            match self.engine.resolve_document(document_id, color).await {
                Ok(DocumentOutcome::Skipped { document_id, reason }) => {
                    report.skipped.push(SkippedDocument {
                        document_id,
                        reason,
                    });
                }
                Ok(outcome) => {
                    if let Some(itinerary) = outcome.into_itinerary() {
                        report.itineraries.push(itinerary);
                    }
                }
                Err(e) => {
                    error!(
                        document_id = %document_id,
                        remaining = document_ids.len() - index - 1,
                        error = %e,
                        "Aborting batch"
                    );
                    report.aborted = Some(e.to_string());
                    break;
                }
            }
        }

        info!(
            itineraries = report.itineraries.len(),
            skipped = report.skipped.len(),
            aborted = report.aborted.is_some(),
            "Batch finished"
        );
        report
    }
}
