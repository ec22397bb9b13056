//! Itinera - travel narratives to map-ready itineraries
//!
//! Itinera reads free-text travel documents, asks a language model for the
//! places visited and the moves between them, geocodes stays through an ordered
//! fallback chain, annotates each resolved place once and caches the result per
//! document. The resolved itineraries are written as a renderer payload.
//!
//! # Architecture
//!
//! - `itinera_core` - Data model (Stay, Move, Itinerary, Coordinates)
//! - `itinera_error` - Error types
//! - `itinera_interface` - Capability traits (Geocoder, Annotator, ...)
//! - `itinera_rate_limit` - Configuration, rate limiting and retry
//! - `itinera_geocode` - Nominatim and GSI adapters, resolution chain
//! - `itinera_models` - OpenAI-compatible client, annotator, extractor
//! - `itinera_cache` - Per-document itinerary cache
//! - `itinera_narrative` - Canonicalization, aggregation, segmentation, batch
//!
//! This crate re-exports everything for convenience and wires the production
//! collaborators together.

pub mod cli;

pub use itinera_cache::*;
pub use itinera_core::*;
pub use itinera_error::*;
pub use itinera_geocode::*;
pub use itinera_interface::*;
pub use itinera_models::{ExtractionSettings, LlmAnnotator, LlmNarrativeExtractor, OpenAiCompatClient};
pub use itinera_narrative::*;
pub use itinera_rate_limit::{ItineraConfig, PostCallDelay, RateLimiter, Tier};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `info,itinera=debug` when
/// `verbose` is true.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info,itinera=debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

/// Open the on-disk cache named by the configuration.
pub fn open_cache(config: &ItineraConfig) -> ItineraResult<FileItineraryCache> {
    FileItineraryCache::new(&config.engine.cache_dir)
}

/// Build the production engine: model-backed extraction and annotation,
/// Nominatim then GSI geocoding, and the file cache.
///
/// # Errors
///
/// Fails if the API key variable is unset or an HTTP client cannot be built.
pub fn build_engine(config: &ItineraConfig) -> ItineraResult<ItineraryEngine> {
    let model = OpenAiCompatClient::from_config(&config.annotation)?;

    let annotator = LlmAnnotator::new(
        model.clone(),
        &config.annotation.annotation_model,
        config.annotation.annotation_temperature,
        config.vocabulary.clone(),
    );
    let extractor = LlmNarrativeExtractor::new(
        model,
        ExtractionSettings::from_config(&config.annotation, &config.engine.default_region_hint),
    );
    let chain = ResolutionChain::new(
        Box::new(NominatimGeocoder::new(&config.geocoding.primary)?),
        Box::new(GsiGeocoder::new(&config.geocoding.secondary)?),
    );

    Ok(ItineraryEngine::new(
        Box::new(extractor),
        Box::new(annotator),
        chain,
        Box::new(open_cache(config)?),
        &config.engine.source_dir,
        &config.engine.source_suffix,
    ))
}

/// Build a batch runner coloring documents from the configured palette.
pub fn build_runner(config: &ItineraConfig) -> ItineraResult<BatchRunner> {
    Ok(BatchRunner::new(
        build_engine(config)?,
        config.engine.palette.clone(),
    ))
}
