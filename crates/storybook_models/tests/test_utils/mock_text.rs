//! Mock text backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use storybook_core::{GenerateRequest, GenerateResponse};
use storybook_error::{StorybookResult, TransportError, TransportErrorKind};
use storybook_interface::TextGenerator;

/// Mock text backend that returns a fixed reply or a fixed error.
pub struct MockTextGenerator {
    reply: Result<String, TransportErrorKind>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockTextGenerator {
    /// Always reply with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Always fail with `error`.
    #[allow(dead_code)]
    pub fn new_error(error: TransportErrorKind) -> Self {
        Self {
            reply: Err(error),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Requests received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, req: &GenerateRequest) -> StorybookResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match &self.reply {
            Ok(text) => Ok(GenerateResponse::from_text(text.clone())),
            Err(kind) => Err(TransportError::new(kind.clone()).into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-text"
    }
}
