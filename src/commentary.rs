//! Optional AI risk commentary around a scenario
//!
//! The text generator is an external, fallible collaborator. Nothing here feeds
//! back into the projection: every failure resolves to a fixed fallback.

use crate::deal::ScenarioInputs;
use crate::error::Result;
use log::warn;

/// Returned when the generator fails
pub const RISK_ANALYSIS_FALLBACK: &str = "Unable to generate risk analysis.";

/// Returned when the generator answers with nothing
pub const RISK_ANALYSIS_EMPTY: &str = "Analysis unavailable.";

/// Used when a highlight list cannot be obtained or parsed
pub const DEFAULT_HIGHLIGHTS: [&str; 2] = [
    "Review exit cap assumptions manually",
    "Stress test debt service coverage",
];

/// A text generation backend (LLM API, local model, canned responses in tests)
pub trait CommentaryProvider {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Prompt asking for a short qualitative risk assessment of the inputs
pub fn risk_assessment_prompt(inputs: &ScenarioInputs) -> Result<String> {
    let json = serde_json::to_string(inputs)?;
    Ok(format!(
        "You are a Real Estate Underwriting Expert.\n\
         The user is running a 'What-If' scenario for a Commercial Real Estate deal.\n\n\
         Here are the input parameters (JSON): {}\n\n\
         Provide a short, 3-sentence qualitative risk assessment.\n\
         Focus on how the Interest Rate and Exit Cap Rate combination affects the exit strategy.",
        json
    ))
}

/// Prompt asking for risk highlights as a JSON array of strings
pub fn risk_highlights_prompt(inputs: &ScenarioInputs) -> Result<String> {
    let json = serde_json::to_string(inputs)?;
    Ok(format!(
        "You are a Real Estate Underwriting Expert.\n\
         Based on the following deal scenario JSON, list 3 specific risks to monitor.\n\
         Return ONLY a JSON array of strings.\n\n\
         Scenario: {}",
        json
    ))
}

/// Qualitative risk commentary; never fails
pub fn risk_commentary<P: CommentaryProvider + ?Sized>(provider: &P, inputs: &ScenarioInputs) -> String {
    let prompt = match risk_assessment_prompt(inputs) {
        Ok(prompt) => prompt,
        Err(e) => {
            warn!("Could not build risk prompt: {}", e);
            return RISK_ANALYSIS_FALLBACK.to_string();
        }
    };

    match provider.generate(&prompt) {
        Ok(text) if text.trim().is_empty() => RISK_ANALYSIS_EMPTY.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Risk commentary unavailable: {:#}", e);
            RISK_ANALYSIS_FALLBACK.to_string()
        }
    }
}

/// Risk highlights as a list; falls back to [`DEFAULT_HIGHLIGHTS`]
pub fn risk_highlights<P: CommentaryProvider + ?Sized>(provider: &P, inputs: &ScenarioInputs) -> Vec<String> {
    let reply = risk_highlights_prompt(inputs)
        .map_err(anyhow::Error::from)
        .and_then(|prompt| provider.generate(&prompt));

    match reply {
        Ok(text) => parse_string_list(&text).unwrap_or_else(|| {
            warn!("Risk highlights reply was not a JSON string array");
            default_highlights()
        }),
        Err(e) => {
            warn!("Risk highlights unavailable: {:#}", e);
            default_highlights()
        }
    }
}

/// Parse a JSON array of strings, tolerating a surrounding markdown code fence
pub fn parse_string_list(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed)
        .trim();

    if body.is_empty() {
        return None;
    }
    serde_json::from_str::<Vec<String>>(body).ok()
}

fn default_highlights() -> Vec<String> {
    DEFAULT_HIGHLIGHTS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;

    struct Canned(&'static str);

    impl CommentaryProvider for Canned {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl CommentaryProvider for Failing {
        fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    struct Recording(RefCell<Vec<String>>);

    impl CommentaryProvider for Recording {
        fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.0.borrow_mut().push(prompt.to_string());
            Ok("Fine.".to_string())
        }
    }

    #[test]
    fn test_prompt_embeds_json_inputs() {
        let prompt = risk_assessment_prompt(&ScenarioInputs::base_case()).unwrap();
        assert!(prompt.contains("\"exitCapRate\":5.5"));
        assert!(prompt.contains("3-sentence"));
    }

    #[test]
    fn test_commentary_passthrough() {
        let provider = Recording(RefCell::new(Vec::new()));
        let text = risk_commentary(&provider, &ScenarioInputs::base_case());
        assert_eq!(text, "Fine.");
        assert_eq!(provider.0.borrow().len(), 1);
    }

    #[test]
    fn test_commentary_fallbacks() {
        let inputs = ScenarioInputs::base_case();
        assert_eq!(risk_commentary(&Failing, &inputs), RISK_ANALYSIS_FALLBACK);
        assert_eq!(risk_commentary(&Canned("  \n"), &inputs), RISK_ANALYSIS_EMPTY);
    }

    #[test]
    fn test_highlights_parsed() {
        let provider = Canned(r#"["Refinance risk", "Cap rate expansion", "Capex overrun"]"#);
        let items = risk_highlights(&provider, &ScenarioInputs::base_case());
        assert_eq!(items, vec!["Refinance risk", "Cap rate expansion", "Capex overrun"]);
    }

    #[test]
    fn test_highlights_fallback() {
        let inputs = ScenarioInputs::base_case();
        assert_eq!(risk_highlights(&Failing, &inputs), default_highlights());
        assert_eq!(risk_highlights(&Canned("not json"), &inputs), default_highlights());
    }

    #[test]
    fn test_parse_fenced_list() {
        let text = "```json\n[\"a\", \"b\"]\n```";
        assert_eq!(parse_string_list(text), Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(parse_string_list(""), None);
        assert_eq!(parse_string_list("[1, 2]"), None);
    }
}
