//! Trait definitions for the Itinera itinerary resolution engine.
//!
//! Every external collaborator of the engine sits behind one of these traits:
//! geocoding providers, the language model, the annotation and extraction
//! capabilities built on it, and the per-document itinerary store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Annotator, Geocoder, ItineraryStore, LanguageModel, NarrativeExtractor};
