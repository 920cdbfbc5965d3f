//! Decision analysis result model.
//!
//! These types mirror the JSON schema the prompt dictates to the provider.
//! Wire field names are camelCase (`regretRisk`, `regretPercentage`) so a
//! schema-shaped model response deserializes directly.
//!
//! The model is a non-deterministic generator, so none of the schema
//! invariants are assumed: [`DecisionAnalysis::validate_for`] checks them
//! against the originating request before a result is released.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::request::{DecisionRequest, OptionLabel};
use crate::domain::foundation::Percentage;

/// Anticipated regret level for an option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegretRisk {
    Low,
    Medium,
    High,
}

impl fmt::Display for RegretRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Per-option regret analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAnalysis {
    /// Which option this analysis covers.
    pub option: OptionLabel,
    /// The option's name as echoed by the model.
    pub title: String,
    /// Qualitative regret level.
    pub regret_risk: RegretRisk,
    /// Likelihood of future regret, 0-100 (lower is better).
    pub regret_percentage: Percentage,
    /// Short regret-potential summary.
    pub summary: String,
    /// Reasons to choose this option.
    pub pros: Vec<String>,
    /// Potential regrets.
    pub cons: Vec<String>,
}

/// The recommended option and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Label of the recommended option.
    pub option: OptionLabel,
    /// The option's name.
    pub title: String,
    /// Why this choice minimizes future regret.
    pub reason: String,
}

/// Complete analysis of one decision request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionAnalysis {
    /// The recommended choice.
    pub recommendation: Recommendation,
    /// One entry per submitted option, in submission order.
    pub analysis: Vec<OptionAnalysis>,
}

/// Ways a parsed payload can violate the analysis schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("expected {expected} analysis entries, got {actual}")]
    WrongAnalysisCount { expected: usize, actual: usize },

    #[error("analysis entry {position} has label {actual}, expected {expected}")]
    OutOfOrderEntry {
        position: usize,
        expected: OptionLabel,
        actual: OptionLabel,
    },

    #[error("recommendation references option {0}, which has no analysis entry")]
    DanglingRecommendation(OptionLabel),
}

impl DecisionAnalysis {
    /// Checks this analysis against the request it was produced for.
    ///
    /// Verifies that there is exactly one entry per submitted option, that
    /// entries are labeled `A..` in submission order, and that the
    /// recommendation points at one of those entries.
    pub fn validate_for(&self, request: &DecisionRequest) -> Result<(), SchemaViolation> {
        if self.analysis.len() != request.option_count() {
            return Err(SchemaViolation::WrongAnalysisCount {
                expected: request.option_count(),
                actual: self.analysis.len(),
            });
        }

        for (position, (entry, expected)) in
            self.analysis.iter().zip(request.labels()).enumerate()
        {
            if entry.option != *expected {
                return Err(SchemaViolation::OutOfOrderEntry {
                    position,
                    expected: *expected,
                    actual: entry.option,
                });
            }
        }

        if !self
            .analysis
            .iter()
            .any(|entry| entry.option == self.recommendation.option)
        {
            return Err(SchemaViolation::DanglingRecommendation(
                self.recommendation.option,
            ));
        }

        Ok(())
    }

    /// Returns the analysis entry for the recommended option, if present.
    pub fn recommended_entry(&self) -> Option<&OptionAnalysis> {
        self.analysis
            .iter()
            .find(|entry| entry.option == self.recommendation.option)
    }
}
