//! Chat message and request types for the language model capability.

use serde::{Deserialize, Serialize};

/// Roles of chat participants.
///
/// # Examples
///
/// ```
/// use itinera_core::Role;
///
/// assert_eq!(Role::System.to_string(), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions for the model
    #[display("system")]
    System,
    /// Input from the caller
    #[display("user")]
    User,
    /// Model output
    #[display("assistant")]
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender role
    pub role: Role,
    /// Text content
    pub content: String,
}

impl Message {
    /// System message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// User message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request.
///
/// # Examples
///
/// ```
/// use itinera_core::{GenerateRequestBuilder, Message};
///
/// let request = GenerateRequestBuilder::default()
///     .model("gpt-4o-mini")
///     .messages(vec![Message::user("こんにちは")])
///     .temperature(Some(0.2))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.model, "gpt-4o-mini");
/// assert_eq!(request.temperature, Some(0.2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<Message>,
    /// Sampling temperature
    #[builder(default)]
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    #[builder(default)]
    pub max_tokens: Option<u32>,
    /// Ask the backend to constrain output to a JSON object
    #[builder(default)]
    pub json_mode: bool,
}

/// Text returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Content of the first choice
    pub text: String,
}
