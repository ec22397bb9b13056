//! Annotation capability errors and retry classification.

/// Failure conditions reported by the narrative annotation capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum AnnotationErrorKind {
    /// API key environment variable not set
    #[display("{} environment variable not set", _0)]
    MissingApiKey(String),
    /// Network failure or timeout while calling the capability
    #[display("Annotation request failed: {}", _0)]
    Http(String),
    /// API rejected the credentials (HTTP 401/403)
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Account quota or credit is exhausted
    #[display("Quota exhausted: {}", _0)]
    QuotaExceeded(String),
    /// Transient request-rate limit (HTTP 429 without quota exhaustion)
    #[display("Rate limited: {}", _0)]
    RateLimited(String),
    /// Any other non-success response
    #[display("HTTP {} error: {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
    /// Response carried no message content
    #[display("Annotation response was empty")]
    EmptyResponse,
    /// Response content could not be parsed
    #[display("Failed to parse annotation response: {}", _0)]
    Parse(String),
}

impl AnnotationErrorKind {
    /// Whether this failure must stop the remaining documents of a batch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnnotationErrorKind::MissingApiKey(_)
                | AnnotationErrorKind::Authentication(_)
                | AnnotationErrorKind::QuotaExceeded(_)
        )
    }

    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnnotationErrorKind::Http(_) | AnnotationErrorKind::RateLimited(_) => true,
            AnnotationErrorKind::Api { status, .. } => {
                matches!(*status, 408 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            AnnotationErrorKind::RateLimited(_) => (5000, 3, 40),
            AnnotationErrorKind::Api { status, .. } => match *status {
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                _ => (2000, 4, 30),
            },
            _ => (2000, 3, 30),
        }
    }
}

/// Annotation error with source location tracking.
///
/// # Examples
///
/// ```
/// use itinera_error::{AnnotationError, AnnotationErrorKind};
///
/// let err = AnnotationError::new(AnnotationErrorKind::Authentication("invalid key".into()));
/// assert!(err.kind.is_fatal());
/// assert!(format!("{}", err).contains("invalid key"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Annotation Error: {} at line {} in {}", kind, line, file)]
pub struct AnnotationError {
    /// The kind of error that occurred
    pub kind: AnnotationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AnnotationError {
    /// Create a new AnnotationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AnnotationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// Transient errors like 503, 429 or network timeouts return true from
/// `is_retryable`. Permanent errors like 401 or 400 return false.
///
/// # Examples
///
/// ```
/// use itinera_error::{AnnotationError, AnnotationErrorKind, RetryableError};
///
/// let err = AnnotationError::new(AnnotationErrorKind::Api {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Get retry strategy parameters for this error.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 3, 30)
    }
}

impl RetryableError for AnnotationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
