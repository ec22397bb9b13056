//! Geocoding provider error types.

/// Specific failure conditions for a single geocoding provider call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GeocodeErrorKind {
    /// Request could not be sent or timed out
    #[display("Geocoding request failed: {}", _0)]
    Http(String),
    /// Provider answered with a non-success status
    #[display("Geocoding provider returned HTTP {}: {}", status, message)]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },
    /// Response body did not have the expected shape
    #[display("Malformed geocoding response: {}", _0)]
    Malformed(String),
    /// Provider returned an empty result set
    #[display("No geocoding results for '{}'", _0)]
    NoResults(String),
    /// Provider returned the (0.0, 0.0) placeholder
    #[display("Provider returned sentinel coordinates for '{}'", _0)]
    Sentinel(String),
    /// Provider returned coordinates outside the valid range
    #[display("Provider returned out-of-range coordinates: {}", _0)]
    OutOfRange(String),
}

/// Geocoding error with location tracking.
///
/// # Examples
///
/// ```
/// use itinera_error::{GeocodeError, GeocodeErrorKind};
///
/// let err = GeocodeError::new(GeocodeErrorKind::NoResults("湯畑".to_string()));
/// assert!(format!("{}", err).contains("湯畑"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Geocode Error: {} at line {} in {}", kind, line, file)]
pub struct GeocodeError {
    /// The kind of error that occurred
    pub kind: GeocodeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GeocodeError {
    /// Create a new geocoding error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeocodeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for a single geocoding provider call.
pub type GeocodeResult<T> = Result<T, GeocodeError>;
