//! AI Provider Adapters.
//!
//! Implementations of the AiProvider port for the supported providers.
//!
//! ## Available Adapters
//!
//! - `MockAiProvider` - Configurable mock for testing
//! - `OpenAiProvider` - OpenAI-compatible chat-completions APIs
//! - `AnthropicProvider` - Anthropic messages API

mod anthropic_provider;
mod mock_provider;
mod openai_provider;

pub use anthropic_provider::{AnthropicConfig, AnthropicProvider};
pub use mock_provider::{MockAiProvider, MockError, MockResponse};
pub use openai_provider::{OpenAiConfig, OpenAiProvider};
