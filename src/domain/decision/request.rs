//! Decision request model.
//!
//! A `DecisionRequest` captures one user submission: the situation being
//! decided and two or three candidate options. Construction validates, so a
//! request that exists is always well-formed and no provider call is made
//! for incomplete input.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum number of candidate options.
pub const MIN_OPTIONS: usize = 2;

/// Maximum number of candidate options.
pub const MAX_OPTIONS: usize = 3;

/// Positional label for a candidate option (A, B, or C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionLabel {
    A,
    B,
    C,
}

impl OptionLabel {
    /// All labels, in positional order.
    pub const ALL: [Self; MAX_OPTIONS] = [Self::A, Self::B, Self::C];

    /// Returns the label for a zero-based option index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the zero-based index of this label.
    pub fn index(&self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Returns the letter for this label.
    pub fn as_char(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }

    /// Parses a label from model output, tolerating lowercase and
    /// surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            other => Err(ValidationError::InvalidOptionLabel(other.to_string())),
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl TryFrom<String> for OptionLabel {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<OptionLabel> for String {
    fn from(label: OptionLabel) -> Self {
        label.as_char().to_string()
    }
}

/// A validated decision submission: one situation, 2-3 options.
///
/// Immutable once constructed; one instance per user submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    situation: String,
    options: Vec<String>,
}

impl DecisionRequest {
    /// Creates a request from raw input, trimming all fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the situation is empty, any option is
    /// empty, or the option count is outside 2-3.
    pub fn new(
        situation: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let situation = situation.into().trim().to_string();
        if situation.is_empty() {
            return Err(ValidationError::empty("situation"));
        }

        let options: Vec<String> = options.into_iter().map(|o| o.trim().to_string()).collect();
        if !(MIN_OPTIONS..=MAX_OPTIONS).contains(&options.len()) {
            return Err(ValidationError::WrongOptionCount {
                min: MIN_OPTIONS,
                max: MAX_OPTIONS,
                actual: options.len(),
            });
        }
        if options.iter().any(|o| o.is_empty()) {
            return Err(ValidationError::empty("option"));
        }

        Ok(Self { situation, options })
    }

    /// The situation text.
    pub fn situation(&self) -> &str {
        &self.situation
    }

    /// The candidate options, in submission order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Number of candidate options (2 or 3).
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Labels valid for this request, in order.
    pub fn labels(&self) -> &[OptionLabel] {
        &OptionLabel::ALL[..self.options.len()]
    }

    /// Iterates `(label, option text)` pairs in order.
    pub fn labeled_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        self.labels()
            .iter()
            .copied()
            .zip(self.options.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn builds_with_two_options() {
        let req = DecisionRequest::new("Take the new job?", opts(&["Stay", "Leave"])).unwrap();
        assert_eq!(req.situation(), "Take the new job?");
        assert_eq!(req.option_count(), 2);
        assert_eq!(req.labels(), &[OptionLabel::A, OptionLabel::B]);
    }

    #[test]
    fn builds_with_three_options() {
        let req =
            DecisionRequest::new("Where to live?", opts(&["City", "Suburbs", "Country"])).unwrap();
        assert_eq!(req.option_count(), 3);
        assert_eq!(
            req.labels(),
            &[OptionLabel::A, OptionLabel::B, OptionLabel::C]
        );
    }

    #[test]
    fn trims_situation_and_options() {
        let req = DecisionRequest::new("  Move?  ", opts(&[" Yes ", " No "])).unwrap();
        assert_eq!(req.situation(), "Move?");
        assert_eq!(req.options(), &["Yes", "No"]);
    }

    #[test]
    fn rejects_empty_situation() {
        let result = DecisionRequest::new("   ", opts(&["A", "B"]));
        assert_eq!(result, Err(ValidationError::empty("situation")));
    }

    #[test]
    fn rejects_single_option() {
        let result = DecisionRequest::new("Choose", opts(&["Only one"]));
        assert!(matches!(
            result,
            Err(ValidationError::WrongOptionCount { actual: 1, .. })
        ));
    }

    #[test]
    fn rejects_four_options() {
        let result = DecisionRequest::new("Choose", opts(&["1", "2", "3", "4"]));
        assert!(matches!(
            result,
            Err(ValidationError::WrongOptionCount { actual: 4, .. })
        ));
    }

    #[test]
    fn rejects_blank_option() {
        let result = DecisionRequest::new("Choose", opts(&["Real", "  "]));
        assert_eq!(result, Err(ValidationError::empty("option")));
    }

    #[test]
    fn labeled_options_pair_in_order() {
        let req = DecisionRequest::new("Choose", opts(&["First", "Second"])).unwrap();
        let pairs: Vec<_> = req.labeled_options().collect();
        assert_eq!(
            pairs,
            vec![(OptionLabel::A, "First"), (OptionLabel::B, "Second")]
        );
    }

    #[test]
    fn label_parse_tolerates_case_and_whitespace() {
        assert_eq!(OptionLabel::parse(" a ").unwrap(), OptionLabel::A);
        assert_eq!(OptionLabel::parse("B").unwrap(), OptionLabel::B);
        assert!(OptionLabel::parse("D").is_err());
        assert!(OptionLabel::parse("AB").is_err());
    }

    #[test]
    fn label_round_trips_through_serde() {
        let json = serde_json::to_string(&OptionLabel::B).unwrap();
        assert_eq!(json, "\"B\"");
        let back: OptionLabel = serde_json::from_str("\"b\"").unwrap();
        assert_eq!(back, OptionLabel::B);
    }

    #[test]
    fn label_from_index_covers_range() {
        assert_eq!(OptionLabel::from_index(0), Some(OptionLabel::A));
        assert_eq!(OptionLabel::from_index(2), Some(OptionLabel::C));
        assert_eq!(OptionLabel::from_index(3), None);
    }
}
