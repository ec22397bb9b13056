//! Source document error types.

/// Specific error conditions when reading source documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SourceErrorKind {
    /// Source file does not exist
    #[display("Source document not found: {}", _0)]
    NotFound(String),
    /// Source file could not be read
    #[display("Failed to read source document: {}", _0)]
    Read(String),
    /// Source file is not in the expected format
    #[display("Failed to parse source document: {}", _0)]
    Parse(String),
    /// Source document contains no narrative text
    #[display("Source document has no text: {}", _0)]
    Empty(String),
    /// Output file could not be written
    #[display("Failed to write output: {}", _0)]
    Write(String),
    /// Document id list is unreadable or empty
    #[display("Invalid document id list: {}", _0)]
    IdList(String),
}

/// Error type for source document loading.
///
/// # Examples
///
/// ```
/// use itinera_error::{SourceError, SourceErrorKind};
///
/// let err = SourceError::new(SourceErrorKind::NotFound("data/1.tra.json".into()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Source Error: {} at line {} in {}", kind, line, file)]
pub struct SourceError {
    /// The specific error condition
    pub kind: SourceErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SourceError {
    /// Create a new SourceError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SourceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
