//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::decision::PromptTone;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI-compatible API key
    pub openai_api_key: Option<String>,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Which provider handles analysis requests
    #[serde(default = "default_provider")]
    pub provider: AiProvider,

    /// Model identifier passed to the provider
    pub model: Option<String>,

    /// Base URL override (OpenAI-compatible gateways)
    pub base_url: Option<String>,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens the model may generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Prompt tone for the regret analysis
    #[serde(default)]
    pub tone: PromptTone,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    Anthropic,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an OpenAI-compatible key is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Anthropic is configured
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_openai() && !self.has_anthropic() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        // The selected provider must have an API key
        match self.provider {
            AiProvider::OpenAI if !self.has_openai() => {
                return Err(ValidationError::MissingRequired("OPENAI_API_KEY"));
            }
            AiProvider::Anthropic if !self.has_anthropic() => {
                return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
            }
            _ => {}
        }

        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            provider: default_provider(),
            model: None,
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            tone: PromptTone::default(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::OpenAI
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    120
}
