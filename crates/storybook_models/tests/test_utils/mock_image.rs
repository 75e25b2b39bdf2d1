//! Mock image backend.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use storybook_core::{GenerationJob, ImageRequest};
use storybook_error::{AuthError, StorybookResult, TransportError, TransportErrorKind};
use storybook_interface::ImageGenerator;

/// A single scripted poll result.
#[derive(Debug, Clone)]
pub enum PollResponse {
    /// Job still running
    Pending,
    /// Job finished with these URLs
    Ready(Vec<String>),
    /// Poll request failed
    Error(TransportErrorKind),
    /// Credential rejected
    Unauthorized,
}

/// Mock image backend that replays a script of poll results.
///
/// Once the script runs out the last entry repeats.
pub struct MockImageGenerator {
    script: Mutex<VecDeque<PollResponse>>,
    last: Mutex<PollResponse>,
    image_bytes: Vec<u8>,
    poll_count: Arc<Mutex<usize>>,
    submitted: Arc<Mutex<Vec<ImageRequest>>>,
    downloaded: Arc<Mutex<Vec<String>>>,
}

impl MockImageGenerator {
    /// Replay `script`, serving `image_bytes` on download.
    pub fn new(script: Vec<PollResponse>, image_bytes: impl Into<Vec<u8>>) -> Self {
        let last = script.last().cloned().unwrap_or(PollResponse::Pending);
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            image_bytes: image_bytes.into(),
            poll_count: Arc::new(Mutex::new(0)),
            submitted: Arc::new(Mutex::new(Vec::new())),
            downloaded: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Ready on the first poll with one URL.
    #[allow(dead_code)]
    pub fn ready(url: &str, image_bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(vec![PollResponse::Ready(vec![url.to_string()])], image_bytes)
    }

    /// Number of poll calls made.
    pub fn poll_count(&self) -> usize {
        *self.poll_count.lock().unwrap()
    }

    /// Requests submitted so far.
    #[allow(dead_code)]
    pub fn submitted(&self) -> Vec<ImageRequest> {
        self.submitted.lock().unwrap().clone()
    }

    /// URLs downloaded so far.
    #[allow(dead_code)]
    pub fn downloaded(&self) -> Vec<String> {
        self.downloaded.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn submit(&self, req: &ImageRequest) -> StorybookResult<GenerationJob> {
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(req.clone());
        Ok(GenerationJob::new(format!("job-{}", submitted.len())))
    }

    async fn poll(&self, _job: &GenerationJob) -> StorybookResult<Vec<String>> {
        *self.poll_count.lock().unwrap() += 1;
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.last.lock().unwrap().clone());

        match next {
            PollResponse::Pending => Ok(Vec::new()),
            PollResponse::Ready(urls) => Ok(urls),
            PollResponse::Error(kind) => Err(TransportError::new(kind).into()),
            PollResponse::Unauthorized => Err(AuthError::new("LEONARDO_API_KEY").into()),
        }
    }

    async fn download(&self, url: &str) -> StorybookResult<Vec<u8>> {
        self.downloaded.lock().unwrap().push(url.to_string());
        Ok(self.image_bytes.clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
