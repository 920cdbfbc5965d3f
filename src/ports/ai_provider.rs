//! AI Provider Port - Interface for LLM provider integrations.
//!
//! This port abstracts all interactions with chat-completion providers,
//! letting the analysis flow obtain raw model text without coupling to any
//! specific provider's payload shape. Each adapter normalizes its provider's
//! response to one common [`CompletionResponse`] before the shared extractor
//! runs.
//!
//! One completion is one request/response interaction: no streaming, and no
//! retry inside the port - a failed call surfaces to the caller as-is.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for AI/LLM provider interactions.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a single completion and return the top message's text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Messages to send (for analysis this is a single user message).
    pub messages: Vec<Message>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature for response randomness.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a request carrying one user message.
    pub fn user_prompt(prompt: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            messages: vec![Message::user(prompt)],
            max_tokens,
            temperature,
        }
    }
}

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text of the single top choice/message.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
    /// Token usage, when the provider reports it.
    pub usage: Option<TokenUsage>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Creates new token usage.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
        }
    }

    /// Total tokens (prompt + completion).
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "anthropic").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider returned a non-success status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error details from the response body.
        message: String,
    },

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Response body lacked the expected message/choice field.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl AiError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a shape error.
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Message safe to surface to an end user.
    ///
    /// Status messages come from the provider and are shown verbatim; the
    /// rest collapse to a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AiError::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => "Failed to analyze decision. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_prompt_builds_single_user_message() {
        let request = CompletionRequest::user_prompt("Analyze this", 1500, 0.7);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.messages[0].content, "Analyze this");
        assert_eq!(request.max_tokens, 1500);
    }

    #[test]
    fn token_usage_totals() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total(), 150);
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::User).unwrap(),
            "\"user\""
        );
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn status_message_is_user_visible() {
        let err = AiError::Status {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        assert_eq!(err.user_message(), "Rate limit exceeded");
    }

    #[test]
    fn other_errors_get_generic_user_message() {
        let err = AiError::network("connection reset");
        assert_eq!(
            err.user_message(),
            "Failed to analyze decision. Please try again."
        );

        let err = AiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            err.user_message(),
            "Failed to analyze decision. Please try again."
        );
    }

    #[test]
    fn errors_display_with_context() {
        let err = AiError::Timeout { timeout_secs: 120 };
        assert_eq!(err.to_string(), "request timed out after 120s");

        let err = AiError::shape("no choices in response");
        assert_eq!(
            err.to_string(),
            "unexpected response shape: no choices in response"
        );
    }
}
