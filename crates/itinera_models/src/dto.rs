//! Chat-completions wire types.

use derive_builder::Builder;
use derive_getters::Getters;
use itinera_core::{GenerateRequest, Message};
use serde::{Deserialize, Serialize};

/// `response_format` field of a chat-completions request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    /// Format type, `"json_object"` for JSON mode
    #[serde(rename = "type")]
    pub format_type: String,
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<Message>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Output constraint
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

impl From<&GenerateRequest> for ChatCompletionRequest {
    fn from(req: &GenerateRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: req.messages.clone(),
            temperature: req.temperature,
            max_tokens: req.max_tokens,
            response_format: req.json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }
}

/// Message inside a completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChoiceMessage {
    /// Generated text; absent for refusals and tool calls
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Choice {
    /// Generated message
    message: ChoiceMessage,
}

/// Chat-completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Completion choices, first one used
    #[serde(default)]
    choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if non-empty.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
