//! Decision analysis domain: request model, prompt construction, and
//! response extraction for the regret minimization framework.

mod analysis;
mod extractor;
mod prompt;
mod request;
pub mod tips;

pub use analysis::{DecisionAnalysis, OptionAnalysis, Recommendation, RegretRisk, SchemaViolation};
pub use extractor::{ExtractionError, ResponseExtractor, MAX_FIELD_LENGTH};
pub use prompt::{PromptBuilder, PromptTone};
pub use request::{DecisionRequest, OptionLabel, MAX_OPTIONS, MIN_OPTIONS};
