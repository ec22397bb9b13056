//! Itinerary cache error types.

/// Kinds of cache errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CacheErrorKind {
    /// Failed to create cache directory
    #[display("Failed to create cache directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write cache record
    #[display("Failed to write cache record: {}", _0)]
    FileWrite(String),
    /// Failed to read cache record
    #[display("Failed to read cache record: {}", _0)]
    FileRead(String),
    /// Cache record could not be encoded
    #[display("Failed to serialize itinerary: {}", _0)]
    Serialization(String),
    /// Cache record exists but is not a valid itinerary
    #[display("Corrupt cache record: {}", _0)]
    Corrupt(String),
    /// An entry already exists for this document
    #[display("Cache entry already exists for document '{}'", _0)]
    AlreadyExists(String),
    /// Document identifier cannot be used as a cache key
    #[display("Invalid document id: '{}'", _0)]
    InvalidDocumentId(String),
}

/// Cache error with location tracking.
///
/// # Examples
///
/// ```
/// use itinera_error::{CacheError, CacheErrorKind};
///
/// let err = CacheError::new(CacheErrorKind::AlreadyExists("10423".to_string()));
/// assert!(format!("{}", err).contains("10423"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Cache Error: {} at line {} in {}", kind, line, file)]
pub struct CacheError {
    /// The kind of error that occurred
    pub kind: CacheErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CacheError {
    /// Create a new cache error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CacheErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
