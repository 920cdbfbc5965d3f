//! Application command handlers.

mod analyze_decision;

pub use analyze_decision::{
    AnalysisOutcome, AnalysisSettings, AnalyzeDecisionCommand, AnalyzeDecisionHandler,
    AnalyzeError,
};
