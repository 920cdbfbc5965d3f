//! Regret Minimizer server binary.
//!
//! Loads configuration from the environment, selects the configured AI
//! provider, and serves the analysis API.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use regret_minimizer::adapters::ai::{
    AnthropicConfig, AnthropicProvider, OpenAiConfig, OpenAiProvider,
};
use regret_minimizer::adapters::http::{routes, AppState};
use regret_minimizer::application::handlers::AnalysisSettings;
use regret_minimizer::config::{AiProvider as ConfiguredProvider, AppConfig};
use regret_minimizer::ports::AiProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));
    if config.server.is_production() {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let provider = build_provider(&config)?;
    tracing::info!(
        provider = %provider.provider_info().name,
        model = %provider.provider_info().model,
        "AI provider configured"
    );

    let settings = AnalysisSettings {
        max_tokens: config.ai.max_tokens,
        temperature: config.ai.temperature,
        tone: config.ai.tone,
    };

    let state = AppState::new(provider, settings);
    let app = routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(build_cors(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the configured provider behind the port.
fn build_provider(
    config: &AppConfig,
) -> Result<Arc<dyn AiProvider>, Box<dyn std::error::Error>> {
    match config.ai.provider {
        ConfiguredProvider::OpenAI => {
            let api_key = config
                .ai
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required for the openai provider")?;
            let mut provider_config =
                OpenAiConfig::new(api_key).with_timeout(config.ai.timeout());
            if let Some(model) = &config.ai.model {
                provider_config = provider_config.with_model(model);
            }
            if let Some(base_url) = &config.ai.base_url {
                provider_config = provider_config.with_base_url(base_url);
            }
            Ok(Arc::new(OpenAiProvider::new(provider_config)?))
        }
        ConfiguredProvider::Anthropic => {
            let api_key = config
                .ai
                .anthropic_api_key
                .clone()
                .ok_or("ANTHROPIC_API_KEY is required for the anthropic provider")?;
            let mut provider_config =
                AnthropicConfig::new(api_key).with_timeout(config.ai.timeout());
            if let Some(model) = &config.ai.model {
                provider_config = provider_config.with_model(model);
            }
            Ok(Arc::new(AnthropicProvider::new(provider_config)?))
        }
    }
}

/// Builds the CORS layer from configuration.
///
/// With no configured origins the layer is permissive, which suits local
/// development; production deployments set explicit origins.
fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
            .allow_origin(parsed)
    }
}
