//! Response extraction and validation.
//!
//! Turns the provider's raw text into a validated [`DecisionAnalysis`]:
//!
//! 1. Unwrap markdown code fences (with optional language tag), falling back
//!    to the first balanced JSON object when prose surrounds it.
//! 2. Parse as JSON; unparseable text is [`ExtractionError::Malformed`] and
//!    carries the offending raw text for diagnostics (logged, never shown to
//!    the end user).
//! 3. Sanitize every string field. Model output is untrusted: HTML tags and
//!    control characters are stripped here so no consumer of the typed
//!    payload can forget to.
//! 4. Type and validate against the originating request; any shape or
//!    invariant violation is [`ExtractionError::Schema`].

use thiserror::Error;

use super::analysis::{DecisionAnalysis, SchemaViolation};
use super::request::DecisionRequest;

/// Maximum length for individual string fields in extracted data (10KB).
pub const MAX_FIELD_LENGTH: usize = 10_000;

/// Errors that can occur while extracting an analysis from provider text.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExtractionError {
    /// The text was not parseable JSON after fence stripping.
    #[error("response is not valid JSON: {message}")]
    Malformed {
        message: String,
        /// The offending raw text, kept for diagnostic context.
        raw: String,
    },

    /// The JSON parsed but does not satisfy the analysis schema.
    #[error("response violates analysis schema: {0}")]
    Schema(String),

    /// The JSON parsed but breaks a cross-field invariant.
    #[error(transparent)]
    Invariant(#[from] SchemaViolation),
}

/// Extracts and validates a [`DecisionAnalysis`] from raw provider text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Runs the full unwrap / parse / sanitize / validate pipeline.
    pub fn extract(
        &self,
        request: &DecisionRequest,
        response: &str,
    ) -> Result<DecisionAnalysis, ExtractionError> {
        let json_str = self.unwrap_response(response);

        let value: serde_json::Value =
            serde_json::from_str(&json_str).map_err(|e| ExtractionError::Malformed {
                message: e.to_string(),
                raw: response.to_string(),
            })?;

        let sanitized = self.sanitize_json_strings(&value);

        let analysis: DecisionAnalysis = serde_json::from_value(sanitized)
            .map_err(|e| ExtractionError::Schema(e.to_string()))?;

        analysis.validate_for(request)?;

        Ok(analysis)
    }

    /// Recovers the innermost JSON text from a possibly fenced or
    /// prose-wrapped response. Idempotent: already-bare JSON passes through
    /// unchanged.
    fn unwrap_response(&self, response: &str) -> String {
        let trimmed = response.trim();

        if let Some(json) = self.extract_from_code_block(trimmed) {
            return json;
        }

        if let Some(start) = trimmed.find('{') {
            if let Some(json) = self.extract_balanced_object(trimmed, start) {
                return json;
            }
        }

        // Let the JSON parser produce the error for whatever this is
        trimmed.to_string()
    }

    fn extract_from_code_block(&self, s: &str) -> Option<String> {
        // ```json ... ``` or ``` ... ```, tolerating CRLF
        let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

        for pattern in patterns {
            if let Some(start) = s.find(pattern) {
                let json_start = start + pattern.len();
                if let Some(end) = s[json_start..].find("```") {
                    return Some(s[json_start..json_start + end].trim().to_string());
                }
            }
        }
        None
    }

    fn extract_balanced_object(&self, s: &str, start: usize) -> Option<String> {
        let mut depth = 0;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in s[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                _ if in_string => {}
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(s[start..start + i + 1].to_string());
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Recursively sanitizes all string values in JSON.
    fn sanitize_json_strings(&self, value: &serde_json::Value) -> serde_json::Value {
        match value {
            serde_json::Value::String(s) => {
                serde_json::Value::String(self.sanitize_string_field(s))
            }
            serde_json::Value::Array(arr) => serde_json::Value::Array(
                arr.iter().map(|v| self.sanitize_json_strings(v)).collect(),
            ),
            serde_json::Value::Object(obj) => serde_json::Value::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), self.sanitize_json_strings(v)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn sanitize_string_field(&self, s: &str) -> String {
        let no_html = self.strip_html_tags(s);
        let clean: String = no_html
            .chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect();

        if clean.len() > MAX_FIELD_LENGTH {
            let mut cut = MAX_FIELD_LENGTH;
            while !clean.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...[truncated]", &clean[..cut])
        } else {
            clean
        }
    }

    /// Basic HTML tag stripping.
    fn strip_html_tags(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        let mut in_tag = false;

        for c in s.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => result.push(c),
                _ => {}
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{OptionLabel, RegretRisk};

    fn request() -> DecisionRequest {
        DecisionRequest::new(
            "Take the new job?",
            vec!["Stay".to_string(), "Leave".to_string()],
        )
        .unwrap()
    }

    const WELL_FORMED: &str = r#"{
        "recommendation": {"option": "B", "title": "Leave", "reason": "Growth beats comfort."},
        "analysis": [
            {
                "option": "A", "title": "Stay", "regretRisk": "high",
                "regretPercentage": 65,
                "summary": "The what-if feeling compounds.",
                "pros": ["stability"], "cons": ["stagnation", "wondering"]
            },
            {
                "option": "B", "title": "Leave", "regretRisk": "low",
                "regretPercentage": 20,
                "summary": "Hard now, at peace later.",
                "pros": ["growth", "new network"], "cons": ["short-term stress"]
            }
        ]
    }"#;

    #[test]
    fn extracts_bare_json() {
        let result = ResponseExtractor::new().extract(&request(), WELL_FORMED).unwrap();
        assert_eq!(result.recommendation.option, OptionLabel::B);
        assert_eq!(result.analysis.len(), 2);
        assert_eq!(result.analysis[0].regret_risk, RegretRisk::High);
    }

    #[test]
    fn fenced_json_equals_unfenced() {
        let extractor = ResponseExtractor::new();
        let fenced = format!("```json\n{}\n```", WELL_FORMED);
        let from_fenced = extractor.extract(&request(), &fenced).unwrap();
        let from_bare = extractor.extract(&request(), WELL_FORMED).unwrap();
        assert_eq!(from_fenced, from_bare);
    }

    #[test]
    fn fence_without_language_tag_unwraps() {
        let fenced = format!("```\n{}\n```", WELL_FORMED);
        let result = ResponseExtractor::new().extract(&request(), &fenced);
        assert!(result.is_ok());
    }

    #[test]
    fn json_with_surrounding_prose_unwraps() {
        let wrapped = format!("Here is my analysis:\n\n{}\n\nGood luck!", WELL_FORMED);
        let result = ResponseExtractor::new().extract(&request(), &wrapped);
        assert!(result.is_ok());
    }

    #[test]
    fn not_json_is_malformed() {
        let result = ResponseExtractor::new().extract(&request(), "not json");
        match result {
            Err(ExtractionError::Malformed { raw, .. }) => assert_eq!(raw, "not json"),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn truncated_json_is_malformed() {
        let truncated = &WELL_FORMED[..WELL_FORMED.len() / 2];
        let result = ResponseExtractor::new().extract(&request(), truncated);
        assert!(matches!(result, Err(ExtractionError::Malformed { .. })));
    }

    #[test]
    fn missing_field_is_schema_error() {
        let missing = r#"{"recommendation": {"option": "A", "title": "Stay", "reason": "r"}}"#;
        let result = ResponseExtractor::new().extract(&request(), missing);
        assert!(matches!(result, Err(ExtractionError::Schema(_))));
    }

    #[test]
    fn unknown_risk_level_is_schema_error() {
        let bad = WELL_FORMED.replace("\"high\"", "\"catastrophic\"");
        let result = ResponseExtractor::new().extract(&request(), &bad);
        assert!(matches!(result, Err(ExtractionError::Schema(_))));
    }

    #[test]
    fn percentage_above_100_is_schema_error() {
        let bad = WELL_FORMED.replace("65", "165");
        let result = ResponseExtractor::new().extract(&request(), &bad);
        assert!(matches!(result, Err(ExtractionError::Schema(_))));
    }

    #[test]
    fn wrong_entry_count_is_invariant_error() {
        let three = DecisionRequest::new(
            "Choose",
            vec!["One".to_string(), "Two".to_string(), "Three".to_string()],
        )
        .unwrap();
        let result = ResponseExtractor::new().extract(&three, WELL_FORMED);
        assert_eq!(
            result,
            Err(ExtractionError::Invariant(
                SchemaViolation::WrongAnalysisCount {
                    expected: 3,
                    actual: 2
                }
            ))
        );
    }

    #[test]
    fn dangling_recommendation_is_invariant_error() {
        let bad = WELL_FORMED.replacen("\"option\": \"B\"", "\"option\": \"C\"", 1);
        let result = ResponseExtractor::new().extract(&request(), &bad);
        assert!(matches!(
            result,
            Err(ExtractionError::Invariant(
                SchemaViolation::DanglingRecommendation(OptionLabel::C)
            ))
        ));
    }

    #[test]
    fn html_in_model_strings_is_stripped() {
        let tainted = WELL_FORMED.replace(
            "Growth beats comfort.",
            "<script>alert('xss')</script>Growth beats comfort.",
        );
        let result = ResponseExtractor::new().extract(&request(), &tainted).unwrap();
        assert!(!result.recommendation.reason.contains("<script>"));
        assert!(result.recommendation.reason.contains("Growth beats comfort."));
    }

    #[test]
    fn unwrapping_is_idempotent_on_bare_json() {
        let extractor = ResponseExtractor::new();
        let once = extractor.unwrap_response(WELL_FORMED);
        let twice = extractor.unwrap_response(&once);
        assert_eq!(once, twice);
    }
}
