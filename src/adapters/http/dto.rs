//! HTTP DTOs for the analysis endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution. All model-supplied text in responses has already been
//! sanitized by the extractor, and serialization to JSON is the escaping
//! boundary for the client.

use serde::{Deserialize, Serialize};

use crate::application::handlers::AnalysisOutcome;
use crate::domain::decision::{DecisionAnalysis, OptionAnalysis, Recommendation};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to analyze a decision.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub situation: String,
    #[serde(default)]
    pub options: Vec<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a completed analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub request_id: String,
    pub model: String,
    pub analyzed_at: String,
    pub recommendation: RecommendationDto,
    pub analysis: Vec<OptionAnalysisDto>,
}

/// The recommended option.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationDto {
    pub option: String,
    pub title: String,
    pub reason: String,
}

/// Per-option regret analysis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAnalysisDto {
    pub option: String,
    pub title: String,
    pub regret_risk: String,
    pub regret_percentage: u8,
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub recommended: bool,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let AnalysisOutcome {
            request_id,
            analysis,
            model,
            analyzed_at,
        } = outcome;
        let DecisionAnalysis {
            recommendation,
            analysis: entries,
        } = analysis;

        let recommended_option = recommendation.option;

        Self {
            request_id: request_id.to_string(),
            model,
            analyzed_at: analyzed_at.to_rfc3339(),
            recommendation: RecommendationDto::from(recommendation),
            analysis: entries
                .into_iter()
                .map(|entry| {
                    let recommended = entry.option == recommended_option;
                    OptionAnalysisDto::from_entry(entry, recommended)
                })
                .collect(),
        }
    }
}

impl From<Recommendation> for RecommendationDto {
    fn from(r: Recommendation) -> Self {
        Self {
            option: r.option.to_string(),
            title: r.title,
            reason: r.reason,
        }
    }
}

impl OptionAnalysisDto {
    fn from_entry(entry: OptionAnalysis, recommended: bool) -> Self {
        Self {
            option: entry.option.to_string(),
            title: entry.title,
            regret_risk: entry.regret_risk.to_string(),
            regret_percentage: entry.regret_percentage.value(),
            summary: entry.summary,
            pros: entry.pros,
            cons: entry.cons,
            recommended,
        }
    }
}

/// Response for the thinking-tips endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<&'static str>,
    pub rotation_interval_ms: u64,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
