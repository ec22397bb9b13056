//! Itinerary resolution engine.
//!
//! Turns a travel narrative into an ordered list of [`Event`](itinera_core::Event)s:
//! raw extractor records are canonicalized, geocoded through a fixed fallback
//! chain, annotated once per distinct resolved place and cached per document. Resolved
//! stays are then joined into distance-gated segments for rendering.
//!
//! # Pipeline
//!
//! ```text
//! document id ─► cache? ─► source text ─► region hint ─► raw events
//!                  │                                        │
//!                  ▼                                        ▼
//!               Cached                              canonicalize
//!                                                           │
//!                                  geocode each stay ◄──────┘
//!                                           │
//!                               annotate resolved places ─► store ─► Built
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;
mod batch;
mod canonicalize;
mod engine;
mod render;
mod segment;
mod source;

pub use aggregate::{aggregate_and_annotate, group_by_place, AggregationReport, PlaceGroup};
pub use batch::{BatchReport, BatchRunner, SkippedDocument};
pub use canonicalize::canonicalize;
pub use engine::{DocumentOutcome, ItineraryEngine};
pub use render::{
    output_file_name, write_payload, RenderPayload, RenderedItinerary, DEFAULT_CENTER,
    TIMESTAMP_NAME_THRESHOLD,
};
pub use segment::{segment, DEFAULT_MAX_SEGMENT_KM};
pub use source::{
    parse_document_ids, parse_narrative, read_document_ids, read_narrative, source_path,
};
