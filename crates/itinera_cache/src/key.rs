//! Document id validation.

use itinera_error::{CacheError, CacheErrorKind, ItineraResult};

/// Check that `document_id` can safely name a cache entry.
///
/// Rejects empty ids, `.`/`..`, path separators and control characters.
///
/// # Examples
///
/// ```
/// use itinera_cache::validate_document_id;
///
/// assert!(validate_document_id("10423").is_ok());
/// assert!(validate_document_id("../etc/passwd").is_err());
/// assert!(validate_document_id("").is_err());
/// ```
pub fn validate_document_id(document_id: &str) -> ItineraResult<()> {
    let trimmed = document_id.trim();
    let invalid = trimmed.is_empty()
        || trimmed != document_id
        || document_id == "."
        || document_id == ".."
        || document_id
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_control());

    if invalid {
        return Err(CacheError::new(CacheErrorKind::InvalidDocumentId(
            document_id.to_string(),
        ))
        .into());
    }
    Ok(())
}
