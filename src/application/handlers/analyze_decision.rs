//! AnalyzeDecision command handler.
//!
//! Orchestrates one decision analysis end to end: validate input, build the
//! prompt, call the provider, extract and validate the response. All state
//! for a run lives in the command and the result, so each request is an
//! independent, immutable flow with no shared mutable state.
//!
//! Every failure kind is terminal for the request: nothing is retried, and
//! no partial result is ever produced.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::decision::{
    DecisionAnalysis, DecisionRequest, ExtractionError, PromptBuilder, PromptTone,
    ResponseExtractor,
};
use crate::domain::foundation::ValidationError;
use crate::ports::{AiError, AiProvider, CompletionRequest};

/// Command to analyze a decision.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionCommand {
    /// The situation being decided.
    pub situation: String,
    /// Candidate options, in order.
    pub options: Vec<String>,
}

impl AnalyzeDecisionCommand {
    /// Creates a new command.
    pub fn new(situation: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            situation: situation.into(),
            options,
        }
    }
}

/// Errors that can occur when analyzing a decision.
///
/// Exactly four kinds; each maps to one user-visible notification.
#[derive(Debug, Clone, Error)]
pub enum AnalyzeError {
    /// User input incomplete; reported before any network call.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Transport or provider-side failure.
    #[error("analysis failed: {message}")]
    AnalysisFailed {
        /// Message safe to show the user.
        message: String,
    },

    /// Provider text could not be parsed as JSON after fence-stripping.
    #[error("malformed provider response")]
    MalformedResponse {
        /// Diagnostic detail including the raw text; logged, never displayed.
        detail: String,
    },

    /// Parsed JSON does not satisfy the analysis schema or its invariants.
    #[error("provider response violates the analysis schema: {detail}")]
    SchemaViolation {
        /// What was violated.
        detail: String,
    },
}

impl From<AiError> for AnalyzeError {
    fn from(err: AiError) -> Self {
        AnalyzeError::AnalysisFailed {
            message: err.user_message(),
        }
    }
}

impl From<ExtractionError> for AnalyzeError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::Malformed { message, raw } => AnalyzeError::MalformedResponse {
                detail: format!("{}; raw response: {}", message, raw),
            },
            ExtractionError::Schema(detail) => AnalyzeError::SchemaViolation { detail },
            ExtractionError::Invariant(violation) => AnalyzeError::SchemaViolation {
                detail: violation.to_string(),
            },
        }
    }
}

/// Result of a completed analysis.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Identifier for this analysis run (tracing / client correlation).
    pub request_id: Uuid,
    /// The validated analysis.
    pub analysis: DecisionAnalysis,
    /// Model that produced it.
    pub model: String,
    /// When the analysis completed.
    pub analyzed_at: DateTime<Utc>,
}

/// Sampling parameters for the provider call.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisSettings {
    /// Maximum tokens the model may generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Prompt tone.
    pub tone: PromptTone,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_tokens: 1500,
            temperature: 0.7,
            tone: PromptTone::default(),
        }
    }
}

/// Handles AnalyzeDecision commands.
pub struct AnalyzeDecisionHandler {
    provider: Arc<dyn AiProvider>,
    prompt_builder: PromptBuilder,
    extractor: ResponseExtractor,
    settings: AnalysisSettings,
}

impl AnalyzeDecisionHandler {
    /// Creates a handler with the given provider and settings.
    pub fn new(provider: Arc<dyn AiProvider>, settings: AnalysisSettings) -> Self {
        Self {
            provider,
            prompt_builder: PromptBuilder::with_tone(settings.tone),
            extractor: ResponseExtractor::new(),
            settings,
        }
    }

    /// Runs one analysis.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzeError::Validation` for incomplete input (no provider
    /// call is made), `AnalysisFailed` for transport/provider failures,
    /// `MalformedResponse` for unparseable provider text, and
    /// `SchemaViolation` when the parsed payload breaks the contract.
    pub async fn handle(
        &self,
        command: AnalyzeDecisionCommand,
    ) -> Result<AnalysisOutcome, AnalyzeError> {
        let request_id = Uuid::new_v4();
        let request = DecisionRequest::new(command.situation, command.options)?;

        tracing::info!(
            %request_id,
            options = request.option_count(),
            provider = %self.provider.provider_info().name,
            "starting decision analysis"
        );

        let prompt = self.prompt_builder.build(&request);
        let completion = self
            .provider
            .complete(CompletionRequest::user_prompt(
                prompt,
                self.settings.max_tokens,
                self.settings.temperature,
            ))
            .await
            .map_err(|err| {
                tracing::warn!(%request_id, error = %err, "provider call failed");
                AnalyzeError::from(err)
            })?;

        tracing::debug!(%request_id, raw = %completion.content, "provider response received");

        let analysis = self
            .extractor
            .extract(&request, &completion.content)
            .map_err(|err| {
                tracing::warn!(%request_id, error = %err, "response extraction failed");
                AnalyzeError::from(err)
            })?;

        tracing::info!(
            %request_id,
            recommended = %analysis.recommendation.option,
            "decision analysis complete"
        );

        Ok(AnalysisOutcome {
            request_id,
            analysis,
            model: completion.model,
            analyzed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};
    use crate::domain::decision::OptionLabel;

    const WELL_FORMED: &str = r#"{
        "recommendation": {"option": "B", "title": "Leave", "reason": "Growth beats comfort."},
        "analysis": [
            {
                "option": "A", "title": "Stay", "regretRisk": "high",
                "regretPercentage": 65,
                "summary": "Compounding what-ifs.",
                "pros": ["stability"], "cons": ["stagnation"]
            },
            {
                "option": "B", "title": "Leave", "regretRisk": "low",
                "regretPercentage": 20,
                "summary": "Hard now, at peace later.",
                "pros": ["growth"], "cons": ["stress"]
            }
        ]
    }"#;

    fn command() -> AnalyzeDecisionCommand {
        AnalyzeDecisionCommand::new(
            "Take the new job?",
            vec!["Stay".to_string(), "Leave".to_string()],
        )
    }

    fn handler(provider: MockAiProvider) -> AnalyzeDecisionHandler {
        AnalyzeDecisionHandler::new(Arc::new(provider), AnalysisSettings::default())
    }

    #[tokio::test]
    async fn well_formed_response_produces_outcome() {
        let provider = MockAiProvider::new().with_response(WELL_FORMED);
        let outcome = handler(provider.clone()).handle(command()).await.unwrap();

        assert_eq!(outcome.analysis.recommendation.option, OptionLabel::B);
        assert_eq!(outcome.analysis.analysis.len(), 2);
        assert_eq!(outcome.model, "mock-model-1");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn fenced_response_produces_same_analysis() {
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        let bare_outcome = handler(MockAiProvider::new().with_response(WELL_FORMED))
            .handle(command())
            .await
            .unwrap();
        let fenced_outcome = handler(MockAiProvider::new().with_response(fenced))
            .handle(command())
            .await
            .unwrap();

        assert_eq!(bare_outcome.analysis, fenced_outcome.analysis);
    }

    #[tokio::test]
    async fn invalid_input_fails_before_provider_call() {
        let provider = MockAiProvider::new();
        let result = handler(provider.clone())
            .handle(AnalyzeDecisionCommand::new("", vec![]))
            .await;

        assert!(matches!(result, Err(AnalyzeError::Validation(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_error_is_analysis_failed() {
        let provider = MockAiProvider::new().with_error(MockError::Status {
            status: 503,
            message: "overloaded".to_string(),
        });
        let result = handler(provider).handle(command()).await;

        assert!(matches!(result, Err(AnalyzeError::AnalysisFailed { .. })));
    }

    #[tokio::test]
    async fn unparseable_text_is_malformed_response() {
        let provider = MockAiProvider::new().with_response("I cannot answer in JSON, sorry.");
        let result = handler(provider).handle(command()).await;

        match result {
            Err(AnalyzeError::MalformedResponse { detail }) => {
                assert!(detail.contains("I cannot answer in JSON"));
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn short_analysis_is_schema_violation() {
        let one_entry = r#"{
            "recommendation": {"option": "A", "title": "Stay", "reason": "r"},
            "analysis": [
                {"option": "A", "title": "Stay", "regretRisk": "low",
                 "regretPercentage": 10, "summary": "s", "pros": [], "cons": []}
            ]
        }"#;
        let provider = MockAiProvider::new().with_response(one_entry);
        let result = handler(provider).handle(command()).await;

        assert!(matches!(result, Err(AnalyzeError::SchemaViolation { .. })));
    }

    #[tokio::test]
    async fn prompt_sent_to_provider_contains_options() {
        let provider = MockAiProvider::new().with_response(WELL_FORMED);
        handler(provider.clone()).handle(command()).await.unwrap();

        let sent = &provider.calls()[0].messages[0].content;
        assert!(sent.contains("A. Stay"));
        assert!(sent.contains("B. Leave"));
        assert!(sent.contains("Take the new job?"));
    }
}
