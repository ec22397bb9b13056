//! Error types for the Itinera itinerary resolution engine.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! Only authentication and quota failures of the annotation capability are
//! fatal to a batch ([`ItineraError::is_fatal`]); everything else is recovered
//! by the caller with a documented default.
//!
//! # Examples
//!
//! ```
//! use itinera_error::{ItineraResult, HttpError};
//!
//! fn fetch_data() -> ItineraResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotation;
mod cache;
mod config;
mod error;
mod geocode;
mod http;
mod json;
mod source;

pub use annotation::{AnnotationError, AnnotationErrorKind, RetryableError};
pub use cache::{CacheError, CacheErrorKind};
pub use config::ConfigError;
pub use error::{ItineraError, ItineraErrorKind, ItineraResult};
pub use geocode::{GeocodeError, GeocodeErrorKind, GeocodeResult};
pub use http::HttpError;
pub use json::JsonError;
pub use source::{SourceError, SourceErrorKind};
