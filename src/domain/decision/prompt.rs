//! Prompt construction for the regret minimization framework.
//!
//! Rendering is deterministic: the same request and tone always produce the
//! same prompt string, which makes the builder directly testable.

use serde::{Deserialize, Serialize};

use super::request::DecisionRequest;

/// Tone of the analysis prompt.
///
/// The service shipped in two variants which differed only in provider and
/// prompt tone; both tones request the identical response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTone {
    /// Future-self framing: what will you be at peace with at 80?
    #[default]
    Reflective,
    /// Terser, outcome-focused framing.
    Pragmatic,
}

/// Builds the analysis instruction string for a decision request.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder {
    tone: PromptTone,
}

impl PromptBuilder {
    /// Creates a builder with the default (reflective) tone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the given tone.
    pub fn with_tone(tone: PromptTone) -> Self {
        Self { tone }
    }

    /// The configured tone.
    pub fn tone(&self) -> PromptTone {
        self.tone
    }

    /// Renders the full prompt for a request.
    ///
    /// The prompt contains the framing instructions, the situation verbatim,
    /// one `"<Letter>. <text>"` line per option, and the literal JSON schema
    /// the provider must respond with.
    pub fn build(&self, request: &DecisionRequest) -> String {
        let options_list = request
            .labeled_options()
            .map(|(label, text)| format!("{}. {}", label, text))
            .collect::<Vec<_>>()
            .join("\n");

        let framing = match self.tone {
            PromptTone::Reflective => REFLECTIVE_FRAMING,
            PromptTone::Pragmatic => PRAGMATIC_FRAMING,
        };

        format!(
            "{framing}\n\n\
             A user is facing this decision:\n\
             \"{situation}\"\n\n\
             Their options are:\n\
             {options_list}\n\n\
             {lens}\n\n\
             Respond in this exact JSON format (no markdown, just pure JSON):\n\
             {schema}\n\n\
             Important: regretPercentage should reflect likelihood of future regret \
             (lower is better). Be thoughtful and nuanced.",
            framing = framing,
            situation = request.situation(),
            options_list = options_list,
            lens = match self.tone {
                PromptTone::Reflective => REFLECTIVE_LENS,
                PromptTone::Pragmatic => PRAGMATIC_LENS,
            },
            schema = RESPONSE_SCHEMA,
        )
    }
}

const REFLECTIVE_FRAMING: &str = "You are an expert decision advisor using the \
Regret Minimization Framework (popularized by Jeff Bezos).";

const PRAGMATIC_FRAMING: &str = "You are a pragmatic decision advisor applying the \
Regret Minimization Framework. Keep the analysis grounded and direct.";

const REFLECTIVE_LENS: &str = "Analyze each option through the lens of FUTURE REGRET - \
not what feels best now, but what they'll be most at peace with later. Consider:\n\
- What would they regret NOT doing when they're 80?\n\
- Which choice aligns with their authentic self?\n\
- What are the long-term emotional consequences?\n\
- Which option minimizes the \"what if\" feeling?";

const PRAGMATIC_LENS: &str = "Weigh each option by the regret it is likely to produce \
over the long run, not by its short-term appeal. Consider:\n\
- Which irreversible doors does each option close?\n\
- Which option keeps the most valuable future paths open?\n\
- Where would inaction itself become the biggest regret?";

// The schema is spelled out literally so the provider's output is
// schema-shaped. Field names here must match the DecisionAnalysis wire
// format exactly.
const RESPONSE_SCHEMA: &str = r#"{
    "recommendation": {
        "option": "The letter of the recommended option (A, B, or C)",
        "title": "The name of the recommended option",
        "reason": "A compelling 2-3 sentence explanation of why this minimizes future regret"
    },
    "analysis": [
        {
            "option": "A",
            "title": "Option name",
            "regretRisk": "low|medium|high",
            "regretPercentage": 25,
            "summary": "1-2 sentence analysis of regret potential",
            "pros": ["pro 1", "pro 2"],
            "cons": ["con 1", "con 2"]
        }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn request(situation: &str, options: &[&str]) -> DecisionRequest {
        DecisionRequest::new(situation, options.iter().map(|s| s.to_string()).collect())
            .unwrap()
    }

    #[test]
    fn prompt_contains_situation_verbatim() {
        let req = request("Take the new job?", &["Stay", "Leave"]);
        let prompt = PromptBuilder::new().build(&req);
        assert!(prompt.contains("\"Take the new job?\""));
    }

    #[test]
    fn prompt_enumerates_two_options_with_letters() {
        let req = request("Take the new job?", &["Stay", "Leave"]);
        let prompt = PromptBuilder::new().build(&req);
        assert!(prompt.contains("A. Stay\nB. Leave"));
        assert!(!prompt.contains("C. "));
    }

    #[test]
    fn prompt_enumerates_three_options_with_letters() {
        let req = request("Where to live?", &["City", "Suburbs", "Country"]);
        let prompt = PromptBuilder::new().build(&req);
        assert!(prompt.contains("A. City\nB. Suburbs\nC. Country"));
    }

    #[test]
    fn prompt_spells_out_response_schema() {
        let req = request("Choose", &["One", "Two"]);
        let prompt = PromptBuilder::new().build(&req);
        assert!(prompt.contains("\"regretRisk\": \"low|medium|high\""));
        assert!(prompt.contains("\"regretPercentage\": 25"));
        assert!(prompt.contains("\"recommendation\""));
        assert!(prompt.contains("no markdown, just pure JSON"));
    }

    #[test]
    fn tones_share_schema_but_differ_in_framing() {
        let req = request("Choose", &["One", "Two"]);
        let reflective = PromptBuilder::with_tone(PromptTone::Reflective).build(&req);
        let pragmatic = PromptBuilder::with_tone(PromptTone::Pragmatic).build(&req);

        assert_ne!(reflective, pragmatic);
        assert!(reflective.contains("when they're 80"));
        assert!(pragmatic.contains("irreversible doors"));
        for prompt in [&reflective, &pragmatic] {
            assert!(prompt.contains(RESPONSE_SCHEMA));
        }
    }

    #[test]
    fn build_is_deterministic() {
        let req = request("Choose", &["One", "Two"]);
        let builder = PromptBuilder::new();
        assert_eq!(builder.build(&req), builder.build(&req));
    }

    proptest! {
        // For any valid request with N options, the prompt contains exactly
        // N lines of the form "<Letter>. <text>" with letters A..Nth in order.
        #[test]
        fn option_lines_match_request(
            situation in "[a-zA-Z0-9 ?]{1,60}",
            options in proptest::collection::vec("[a-zA-Z0-9 ]{1,30}", 2..=3),
        ) {
            // Filter inputs the constructor would reject after trimming
            prop_assume!(!situation.trim().is_empty());
            prop_assume!(options.iter().all(|o| !o.trim().is_empty()));

            let req = DecisionRequest::new(situation.clone(), options.clone()).unwrap();
            let prompt = PromptBuilder::new().build(&req);

            let lines: Vec<&str> = prompt.lines().collect();
            let letters = ['A', 'B', 'C'];
            let mut found = 0;
            for (i, option) in req.options().iter().enumerate() {
                let expected = format!("{}. {}", letters[i], option);
                prop_assert!(lines.contains(&expected.as_str()));
                found += 1;
            }
            prop_assert_eq!(found, req.option_count());
            prop_assert!(prompt.contains(req.situation()));
        }
    }
}
