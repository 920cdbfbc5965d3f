//! HTTP handlers for the analysis endpoints.
//!
//! These handlers connect axum routes to the application layer. Each of the
//! four failure kinds becomes exactly one error envelope; diagnostic detail
//! (including raw model text) stays in the logs.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    AnalysisSettings, AnalyzeDecisionCommand, AnalyzeDecisionHandler, AnalyzeError,
};
use crate::domain::decision::tips::{tip_at, THINKING_TIPS, TIP_ROTATION_INTERVAL};
use crate::ports::AiProvider;

use super::dto::{AnalyzeRequest, AnalyzeResponse, ErrorResponse, TipsResponse};

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AppState {
    pub ai_provider: Arc<dyn AiProvider>,
    pub settings: AnalysisSettings,
}

impl AppState {
    pub fn new(ai_provider: Arc<dyn AiProvider>, settings: AnalysisSettings) -> Self {
        Self {
            ai_provider,
            settings,
        }
    }

    pub fn analyze_handler(&self) -> AnalyzeDecisionHandler {
        AnalyzeDecisionHandler::new(self.ai_provider.clone(), self.settings)
    }
}

/// Analyze a decision.
///
/// POST /api/analyze
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let command = AnalyzeDecisionCommand::new(req.situation, req.options);
    let handler = state.analyze_handler();

    let outcome = handler.handle(command).await.map_err(error_envelope)?;

    Ok(Json(AnalyzeResponse::from(outcome)))
}

/// Maps an analysis error to its HTTP envelope.
fn error_envelope(err: AnalyzeError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        AnalyzeError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("VALIDATION_ERROR", e.to_string())),
        ),
        AnalyzeError::AnalysisFailed { message } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new("ANALYSIS_FAILED", message)),
        ),
        AnalyzeError::MalformedResponse { .. } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(
                "MALFORMED_RESPONSE",
                "The analysis service returned an unreadable response. Please try again.",
            )),
        ),
        AnalyzeError::SchemaViolation { .. } => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::new(
                "SCHEMA_VIOLATION",
                "The analysis service returned an incomplete analysis. Please try again.",
            )),
        ),
    }
}

/// Thinking tips for the loading state.
///
/// GET /api/tips
pub async fn tips() -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: (0..THINKING_TIPS.len()).map(tip_at).collect(),
        rotation_interval_ms: TIP_ROTATION_INTERVAL.as_millis() as u64,
    })
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}
