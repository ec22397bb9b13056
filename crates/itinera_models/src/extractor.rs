//! Region-hint inference and event extraction through a chat model.

use crate::{extract_json, parse_json, prompts};
use async_trait::async_trait;
use itinera_core::GenerateRequestBuilder;
use itinera_error::{AnnotationError, AnnotationErrorKind, ItineraResult};
use itinera_interface::{LanguageModel, NarrativeExtractor};
use itinera_rate_limit::AnnotationConfig;
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Parse an extraction answer into raw event records.
///
/// Anything other than a JSON array of objects yields an empty list.
///
/// # Examples
///
/// ```
/// use itinera_models::parse_event_list;
///
/// let answer = "```json\n[{\"place\": \"湯畑\", \"latitude\": 36.62}]\n```";
/// assert_eq!(parse_event_list(answer).len(), 1);
/// assert!(parse_event_list("[1, 2, 3]").is_empty());
/// assert!(parse_event_list("見つかりませんでした").is_empty());
/// ```
pub fn parse_event_list(answer: &str) -> Vec<Value> {
    let Ok(json) = extract_json(answer) else {
        return Vec::new();
    };

    match parse_json::<Value>(&json) {
        Ok(Value::Array(items)) if items.iter().all(Value::is_object) => items,
        _ => Vec::new(),
    }
}

/// Model names and temperatures for the two extraction tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// Model for event extraction
    pub extraction_model: String,
    /// Sampling temperature for event extraction
    pub extraction_temperature: f32,
    /// Model for region-hint inference
    pub hint_model: String,
    /// Sampling temperature for region-hint inference
    pub hint_temperature: f32,
    /// Region hint used when inference fails
    pub default_region_hint: String,
}

impl ExtractionSettings {
    /// Settings from the annotation section plus the engine's default hint.
    pub fn from_config(config: &AnnotationConfig, default_region_hint: impl Into<String>) -> Self {
        Self {
            extraction_model: config.extraction_model.clone(),
            extraction_temperature: config.extraction_temperature,
            hint_model: config.hint_model.clone(),
            hint_temperature: config.hint_temperature,
            default_region_hint: default_region_hint.into(),
        }
    }
}

/// [`NarrativeExtractor`] backed by any [`LanguageModel`].
pub struct LlmNarrativeExtractor<M: LanguageModel> {
    model: M,
    settings: ExtractionSettings,
}

impl<M: LanguageModel> LlmNarrativeExtractor<M> {
    /// Create an extractor.
    pub fn new(model: M, settings: ExtractionSettings) -> Self {
        Self { model, settings }
    }

    async fn ask(
        &self,
        model: &str,
        temperature: f32,
        messages: Vec<itinera_core::Message>,
    ) -> ItineraResult<String> {
        let request = GenerateRequestBuilder::default()
            .model(model)
            .messages(messages)
            .temperature(Some(temperature))
            .build()
            .map_err(|e| AnnotationError::new(AnnotationErrorKind::Parse(e.to_string())))?;

        Ok(self.model.generate(&request).await?.text)
    }
}

#[async_trait]
impl<M: LanguageModel> NarrativeExtractor for LlmNarrativeExtractor<M> {
    #[instrument(skip(self, narrative), fields(narrative_len = narrative.len()))]
    async fn region_hint(&self, narrative: &str) -> ItineraResult<String> {
        let fallback = &self.settings.default_region_hint;
        if narrative.trim().is_empty() {
            return Ok(fallback.clone());
        }

        let answer = self
            .ask(
                &self.settings.hint_model,
                self.settings.hint_temperature,
                prompts::region_hint_messages(narrative),
            )
            .await;

        match answer {
            Ok(hint) if !hint.trim().is_empty() => {
                let hint = hint.trim().to_string();
                debug!(region_hint = %hint, "Inferred region hint");
                Ok(hint)
            }
            Ok(_) => Ok(fallback.clone()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(error = %e, fallback = %fallback, "Region hint inference failed");
                Ok(fallback.clone())
            }
        }
    }

    #[instrument(skip(self, narrative), fields(narrative_len = narrative.len(), region_hint = %region_hint))]
    async fn extract_events(&self, narrative: &str, region_hint: &str) -> ItineraResult<Vec<Value>> {
        let answer = self
            .ask(
                &self.settings.extraction_model,
                self.settings.extraction_temperature,
                prompts::extraction_messages(narrative, region_hint),
            )
            .await?;

        let records = parse_event_list(&answer);
        if records.is_empty() {
            warn!(answer_len = answer.len(), "Extraction answer held no event records");
        } else {
            debug!(records = records.len(), "Extracted raw event records");
        }
        Ok(records)
    }
}
