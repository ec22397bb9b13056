//! Per-document itinerary cache.
//!
//! A cached itinerary is authoritative: the engine returns it without any
//! external call. There is no expiry; delete a record to force a rebuild.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod file;
mod key;
mod memory;

pub use file::FileItineraryCache;
pub use key::validate_document_id;
pub use memory::InMemoryItineraryCache;
