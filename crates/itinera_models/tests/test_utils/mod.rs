//! Scripted language model for capability tests.

use async_trait::async_trait;
use itinera_core::{GenerateRequest, GenerateResponse};
use itinera_error::{AnnotationError, AnnotationErrorKind, ItineraResult};
use itinera_interface::LanguageModel;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One scripted reply.
#[derive(Clone)]
pub enum Reply {
    /// Answer with this text
    Text(String),
    /// Fail with this error kind
    Fail(AnnotationErrorKind),
}

/// Language model replaying scripted replies and recording requests.
#[derive(Clone, Default)]
pub struct MockLanguageModel {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockLanguageModel {
    /// Model answering with `replies` in order.
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Model always answering `text` once.
    pub fn answering(text: &str) -> Self {
        Self::new([Reply::Text(text.to_string())])
    }

    /// Number of generate calls.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn generate(&self, req: &GenerateRequest) -> ItineraResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Text(text)) => Ok(GenerateResponse { text }),
            Some(Reply::Fail(kind)) => Err(AnnotationError::new(kind).into()),
            None => Err(AnnotationError::new(AnnotationErrorKind::EmptyResponse).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
