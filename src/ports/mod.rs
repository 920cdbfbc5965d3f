//! Ports: capability interfaces the application layer depends on.

mod ai_provider;

pub use ai_provider::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    ProviderInfo, TokenUsage,
};
