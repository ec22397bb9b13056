//! Batch run command handler.

use crate::{build_runner, ItineraConfig};
use chrono::Local;
use itinera_error::ItineraResult;
use itinera_narrative::{output_file_name, read_document_ids, write_payload, RenderPayload};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Load configuration from `path`, or from the layered search when absent.
pub fn load_config(path: Option<&Path>) -> ItineraResult<ItineraConfig> {
    match path {
        Some(path) => ItineraConfig::from_file(path),
        None => ItineraConfig::load(),
    }
}

/// What a batch run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Path of the renderer payload, if anything was rendered
    pub payload: Option<PathBuf>,
    /// False when a fatal error stopped the batch early
    pub completed: bool,
}

/// Resolve every document listed in `ids_file` and write the renderer payload.
///
/// A fatal error stops the batch, but documents completed before it are
/// still rendered.
pub async fn run_batch(
    config: &ItineraConfig,
    ids_file: &Path,
    output_dir: Option<&Path>,
) -> ItineraResult<RunSummary> {
    let document_ids = read_document_ids(ids_file)?;
    info!(documents = document_ids.len(), "Starting batch");

    let runner = build_runner(config)?;
    let report = runner.run(&document_ids).await;

    for skipped in &report.skipped {
        warn!(document_id = %skipped.document_id(), reason = %skipped.reason(), "Skipped");
    }
    if let Some(reason) = &report.aborted {
        error!(reason = %reason, "Batch aborted, rendering completed documents only");
    }

    if report.itineraries.is_empty() {
        warn!("No itineraries to render");
        return Ok(RunSummary {
            payload: None,
            completed: report.completed(),
        });
    }

    let rendered_ids: Vec<&str> = report
        .itineraries
        .iter()
        .map(|itinerary| itinerary.document_id().as_str())
        .collect();
    let file_name = output_file_name(rendered_ids.as_slice(), &Local::now());
    let payload = RenderPayload::new(&report.itineraries, config.engine.max_segment_km);
    let output_dir = output_dir.unwrap_or(config.engine.output_dir.as_path());

    let path = write_payload(output_dir, &file_name, &payload)?;
    Ok(RunSummary {
        payload: Some(path),
        completed: report.completed(),
    })
}
