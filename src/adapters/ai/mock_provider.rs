//! Mock AI Provider for testing.
//!
//! Configurable mock implementation of the AiProvider port, letting tests
//! exercise the full analysis flow without calling real AI APIs.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_response("{\"recommendation\": ...}");
//!
//! let response = provider.complete(request).await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

/// Mock AI provider for testing.
///
/// Responses are consumed in FIFO order; every received request is captured
/// for verification.
#[derive(Debug, Clone, Default)]
pub struct MockAiProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion with this content.
    Success(String),
    /// Return an error.
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    /// Simulate a non-success provider status.
    Status { status: u16, message: String },
    /// Simulate provider unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::Status { status, message } => AiError::Status { status, message },
            MockError::Unavailable { message } => AiError::unavailable(message),
            MockError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockError::Network { message } => AiError::network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

impl MockAiProvider {
    /// Creates a new mock provider with no queued responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .expect("mock lock poisoned")
            .push_back(MockResponse::Error(error));
        self
    }

    /// Number of completion calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock lock poisoned").len()
    }

    /// Requests received, in order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        let next = self
            .responses
            .lock()
            .expect("mock lock poisoned")
            .pop_front();

        match next {
            Some(MockResponse::Success(content)) => Ok(CompletionResponse {
                content,
                model: "mock-model-1".to_string(),
                usage: Some(TokenUsage::new(100, 50)),
            }),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Err(AiError::unavailable("mock has no queued responses")),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
