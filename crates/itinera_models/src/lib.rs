//! OpenAI-compatible annotation and extraction capabilities.
//!
//! [`OpenAiCompatClient`] implements [`itinera_interface::LanguageModel`] over
//! any `/chat/completions` endpoint. [`LlmAnnotator`] and
//! [`LlmNarrativeExtractor`] turn it into the engine's annotation, region
//! hint and event extraction capabilities.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod annotator;
mod client;
mod dto;
mod extraction;
mod extractor;
mod prompts;

pub use annotator::{parse_annotation, LlmAnnotator};
pub use client::{classify_status, OpenAiCompatClient};
pub use dto::{
    ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse, Choice,
    ChoiceMessage, ResponseFormat,
};
pub use extraction::{extract_json, parse_json};
pub use extractor::{parse_event_list, ExtractionSettings, LlmNarrativeExtractor};
pub use prompts::{annotation_messages, extraction_messages, region_hint_messages};
