//! Top-level error wrapper types.

use crate::{
    AnnotationError, CacheError, ConfigError, GeocodeError, HttpError, JsonError, SourceError,
};

/// Every error the engine can surface, one variant per concern.
///
/// # Examples
///
/// ```
/// use itinera_error::{ItineraError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: ItineraError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ItineraErrorKind {
    /// HTTP client error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Geocoding provider error
    #[from(GeocodeError)]
    Geocode(GeocodeError),
    /// Annotation capability error
    #[from(AnnotationError)]
    Annotation(AnnotationError),
    /// Itinerary cache error
    #[from(CacheError)]
    Cache(CacheError),
    /// Source document error
    #[from(SourceError)]
    Source(SourceError),
}

/// Itinera error with kind discrimination.
///
/// # Examples
///
/// ```
/// use itinera_error::{ItineraResult, ConfigError};
///
/// fn might_fail() -> ItineraResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Itinera Error: {}", _0)]
pub struct ItineraError(Box<ItineraErrorKind>);

impl ItineraError {
    /// Create a new error from a kind.
    pub fn new(kind: ItineraErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ItineraErrorKind {
        &self.0
    }

    /// Whether this error must abort the remaining documents of a batch.
    ///
    /// # Examples
    ///
    /// ```
    /// use itinera_error::{AnnotationError, AnnotationErrorKind, ItineraError};
    ///
    /// let quota: ItineraError =
    ///     AnnotationError::new(AnnotationErrorKind::QuotaExceeded("no credit".into())).into();
    /// assert!(quota.is_fatal());
    ///
    /// let parse: ItineraError =
    ///     AnnotationError::new(AnnotationErrorKind::Parse("bad json".into())).into();
    /// assert!(!parse.is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        match self.kind() {
            ItineraErrorKind::Annotation(err) => err.kind.is_fatal(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to ItineraErrorKind
impl<T> From<T> for ItineraError
where
    T: Into<ItineraErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Itinera operations.
pub type ItineraResult<T> = std::result::Result<T, ItineraError>;
