//! OpenAI-compatible chat-completions client.

use crate::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use itinera_core::{GenerateRequest, GenerateResponse};
use itinera_error::{AnnotationError, AnnotationErrorKind, HttpError, ItineraResult};
use itinera_interface::LanguageModel;
use itinera_rate_limit::{AnnotationConfig, RateLimiter, TierConfig};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Map a non-success status and body to an annotation error kind.
///
/// 401/403 are authentication failures. A 429 whose body mentions
/// `insufficient_quota` means the account is out of credit; any other 429
/// is a transient rate limit.
///
/// # Examples
///
/// ```
/// use itinera_error::AnnotationErrorKind;
/// use itinera_models::classify_status;
///
/// assert!(matches!(classify_status(401, ""), AnnotationErrorKind::Authentication(_)));
/// assert!(matches!(
///     classify_status(429, r#"{"error":{"code":"insufficient_quota"}}"#),
///     AnnotationErrorKind::QuotaExceeded(_)
/// ));
/// assert!(matches!(classify_status(429, "slow down"), AnnotationErrorKind::RateLimited(_)));
/// ```
pub fn classify_status(status: u16, body: &str) -> AnnotationErrorKind {
    match status {
        401 | 403 => AnnotationErrorKind::Authentication(body.to_string()),
        429 if body.contains("insufficient_quota") => {
            AnnotationErrorKind::QuotaExceeded(body.to_string())
        }
        429 => AnnotationErrorKind::RateLimited(body.to_string()),
        _ => AnnotationErrorKind::Api {
            status,
            message: body.to_string(),
        },
    }
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Requests pass through a [`RateLimiter`] that retries transient failures.
#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    api_key: String,
    endpoint: String,
    limiter: RateLimiter<TierConfig>,
}

impl std::fmt::Debug for OpenAiCompatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatClient")
            .field("endpoint", &self.endpoint)
            .field("tier", &self.limiter.inner().name)
            .finish_non_exhaustive()
    }
}

impl OpenAiCompatClient {
    /// Create a client with an explicit API key.
    ///
    /// `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    #[instrument(skip(api_key, tier), fields(base_url = %base_url.as_ref()))]
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
        timeout: Duration,
        tier: TierConfig,
    ) -> ItineraResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/chat/completions",
            base_url.as_ref().trim_end_matches('/')
        );
        debug!(endpoint = %endpoint, "Creating OpenAI-compatible client");

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
            limiter: RateLimiter::new(tier),
        })
    }

    /// Create a client from configuration, reading the key from `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`AnnotationErrorKind::MissingApiKey`] if the variable is unset.
    pub fn from_config(config: &AnnotationConfig) -> ItineraResult<Self> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            AnnotationError::new(AnnotationErrorKind::MissingApiKey(
                config.api_key_env.clone(),
            ))
        })?;

        let client = Self::new(
            api_key,
            &config.base_url,
            config.timeout(),
            config.tier.clone(),
        )?;
        Ok(match config.max_retries {
            Some(max_retries) => Self {
                limiter: client.limiter.with_max_retries(max_retries),
                ..client
            },
            None => client,
        })
    }

    /// Send one chat-completions request without retry.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AnnotationError> {
        debug!("Sending chat-completions request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat-completions request");
                AnnotationError::new(AnnotationErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Chat-completions API returned error");
            return Err(AnnotationError::new(classify_status(status.as_u16(), &body)));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            AnnotationError::new(AnnotationErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %req.model))]
    async fn generate(&self, req: &GenerateRequest) -> ItineraResult<GenerateResponse> {
        let request = ChatCompletionRequest::from(req);
        let request = &request;
        let response = self.limiter.execute(move || self.complete(request)).await?;

        let text = response
            .first_text()
            .ok_or_else(|| AnnotationError::new(AnnotationErrorKind::EmptyResponse))?;

        debug!(response_length = text.len(), "Received completion");
        Ok(GenerateResponse {
            text: text.to_string(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_is_authentication() {
        assert!(matches!(
            classify_status(403, "forbidden"),
            AnnotationErrorKind::Authentication(_)
        ));
    }

    #[test]
    fn server_errors_keep_status() {
        let kind = classify_status(503, "overloaded");
        assert!(kind.is_retryable());
        assert!(!kind.is_fatal());
    }

    #[test]
    fn quota_exhaustion_is_fatal() {
        let kind = classify_status(
            429,
            r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota"}}"#,
        );
        assert!(kind.is_fatal());
        assert!(!kind.is_retryable());
    }
}
