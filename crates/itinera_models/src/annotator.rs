//! Sentiment and tag annotation through a chat model.

use crate::{extract_json, prompts};
use async_trait::async_trait;
use itinera_core::{Annotation, GenerateRequestBuilder, TagVocabulary, NEUTRAL_SCORE};
use itinera_error::{AnnotationError, AnnotationErrorKind, ItineraResult};
use itinera_interface::{Annotator, LanguageModel};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Parse a model answer into an annotation.
///
/// Accepts `emotion_score` (or `sentiment_score`) as a number or numeric
/// string and tags from `move_tags`, `action_tags` and `tags`. Tags outside
/// `vocabulary` are discarded. Returns `None` when the answer holds no JSON
/// object.
///
/// # Examples
///
/// ```
/// use itinera_core::TagVocabulary;
/// use itinera_models::parse_annotation;
///
/// let answer = r#"{"emotion_score": 0.8, "action_tags": ["景色鑑賞", "宇宙旅行"]}"#;
/// let annotation = parse_annotation(answer, &TagVocabulary::default()).unwrap();
/// assert_eq!(*annotation.score(), 0.8);
/// assert_eq!(annotation.tags().len(), 1);
/// ```
pub fn parse_annotation(answer: &str, vocabulary: &TagVocabulary) -> Option<Annotation> {
    let json = extract_json(answer).ok()?;
    let value: Value = serde_json::from_str(&json).ok()?;
    let object = value.as_object()?;

    let score = ["emotion_score", "sentiment_score"]
        .iter()
        .find_map(|key| object.get(*key))
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .unwrap_or(NEUTRAL_SCORE);

    let tags = ["move_tags", "action_tags", "tags"]
        .iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_array)
        .flatten()
        .filter_map(Value::as_str);

    Some(Annotation::new(score, vocabulary.filter(tags)))
}

/// [`Annotator`] backed by any [`LanguageModel`].
pub struct LlmAnnotator<M: LanguageModel> {
    model: M,
    model_name: String,
    temperature: f32,
    vocabulary: TagVocabulary,
}

impl<M: LanguageModel> LlmAnnotator<M> {
    /// Annotate with `model_name` at `temperature`, restricted to `vocabulary`.
    pub fn new(
        model: M,
        model_name: impl Into<String>,
        temperature: f32,
        vocabulary: TagVocabulary,
    ) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            temperature,
            vocabulary,
        }
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }
}

#[async_trait]
impl<M: LanguageModel> Annotator for LlmAnnotator<M> {
    #[instrument(skip(self, text), fields(place = %place, text_len = text.len()))]
    async fn annotate(&self, place: &str, text: &str) -> ItineraResult<Annotation> {
        if text.trim().is_empty() {
            debug!("Empty experience text, using neutral annotation");
            return Ok(Annotation::neutral());
        }

        let request = GenerateRequestBuilder::default()
            .model(self.model_name.clone())
            .messages(prompts::annotation_messages(text, &self.vocabulary))
            .temperature(Some(self.temperature))
            .json_mode(true)
            .build()
            .map_err(|e| AnnotationError::new(AnnotationErrorKind::Parse(e.to_string())))?;

        let response = self.model.generate(&request).await?;

        match parse_annotation(&response.text, &self.vocabulary) {
            Some(annotation) => {
                debug!(
                    score = *annotation.score(),
                    tags = annotation.tags().len(),
                    "Annotated place"
                );
                Ok(annotation)
            }
            None => {
                warn!("Unparseable annotation answer, using neutral annotation");
                Ok(Annotation::neutral())
            }
        }
    }
}
