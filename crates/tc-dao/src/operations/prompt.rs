//! Simulated prompt processing.

use serde_json::Value;

use crate::error::HandlerError;
use crate::registry::{Params, Payload};

use super::{required_str, utc_timestamp};

/// Operation name for prompt generation.
pub const PROMPT_GENERATE: &str = "/prompt/generate";

/// Longest accepted prompt, in characters.
pub const MAX_PROMPT_CHARS: usize = 10_000;

const PROCESSED_SUFFIX: &str = " [AI-processed]";

/// Upper-cases `text` and tags it as processed.
pub(super) fn generate(params: &Params) -> Result<Payload, HandlerError> {
    let text = required_str(params, "text")?;
    if text.chars().count() > MAX_PROMPT_CHARS {
        return Err(HandlerError::rejected(format!(
            "Text must be between 1 and {MAX_PROMPT_CHARS} characters"
        )));
    }

    let processed = format!("{}{PROCESSED_SUFFIX}", text.to_uppercase());
    Ok(Payload::from_iter([
        (String::from("text"), Value::from(text)),
        (String::from("processed"), Value::from(processed)),
        (String::from("timestamp"), Value::from(utc_timestamp()?)),
    ]))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn with_text(text: &str) -> Params {
        Params::from_iter([(String::from("text"), json!(text))])
    }

    #[test]
    fn processes_text() {
        let result = generate(&with_text("hello")).expect("generate");
        assert_eq!(result.get("text"), Some(&json!("hello")));
        assert_eq!(
            result.get("processed"),
            Some(&json!("HELLO [AI-processed]"))
        );
        assert!(result.get("timestamp").is_some_and(Value::is_string));
    }

    #[test]
    fn uppercases_with_full_unicode_mapping() {
        let result = generate(&with_text("straße")).expect("generate");
        assert_eq!(
            result.get("processed"),
            Some(&json!("STRASSE [AI-processed]"))
        );
    }

    #[test]
    fn accepts_text_at_the_limit() {
        let text = "a".repeat(MAX_PROMPT_CHARS);
        assert!(generate(&with_text(&text)).is_ok());
    }

    #[test]
    fn rejects_text_over_the_limit() {
        let text = "a".repeat(MAX_PROMPT_CHARS + 1);
        let error = generate(&with_text(&text)).expect_err("too long");
        assert_eq!(
            error.to_string(),
            "Text must be between 1 and 10000 characters"
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "é".repeat(MAX_PROMPT_CHARS);
        assert!(generate(&with_text(&text)).is_ok());
    }

    #[test]
    fn requires_text() {
        let error = generate(&Params::new()).expect_err("missing text");
        assert_eq!(error.to_string(), "Missing required parameter: text");
    }
}
