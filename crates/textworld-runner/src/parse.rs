//! Response parsing for LLM-produced decisions.
//!
//! Models wrap their JSON in prose or markdown fences, leave trailing
//! commas, or write `"null"` as a string. Parsing tries a series of
//! recovery strategies before giving up, and giving up means "no decision"
//! rather than an error.

use serde::Deserialize;
use textworld_types::Decision;
use tracing::warn;

use crate::error::RunnerError;

/// Raw JSON shape as produced by the model, before normalization.
#[derive(Debug, Deserialize)]
struct RawDecision {
    #[serde(default)]
    response: Option<serde_json::Value>,
    #[serde(default, rename = "move")]
    move_direction: Option<serde_json::Value>,
}

/// Parse an LLM response string into a [`Decision`].
///
/// Attempts, in order, on the trimmed text:
/// 1. Direct `serde_json` deserialization
/// 2. The contents of a markdown code block
/// 3. The span from the first `{` to the last `}`
///
/// Each candidate is retried with trailing commas stripped. If all attempts
/// fail, logs a warning and returns `None`.
pub fn parse_llm_response(raw: &str) -> Option<Decision> {
    match try_parse(raw) {
        Ok(decision) => Some(decision),
        Err(e) => {
            warn!(
                error = %e,
                raw_response = raw,
                "failed to parse LLM response, skipping decision"
            );
            None
        }
    }
}

/// Attempt to parse the response through multiple recovery strategies.
fn try_parse(raw: &str) -> Result<Decision, RunnerError> {
    let trimmed = raw.trim();

    let candidates = [
        Some(trimmed),
        extract_json_from_codeblock(trimmed),
        extract_outer_braces(trimmed),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(parsed) = serde_json::from_str::<RawDecision>(candidate) {
            return Ok(normalize(parsed));
        }
        let cleaned = strip_trailing_commas(candidate);
        if let Ok(parsed) = serde_json::from_str::<RawDecision>(&cleaned) {
            return Ok(normalize(parsed));
        }
    }

    Err(RunnerError::Parse(format!(
        "all parse strategies failed for: {trimmed}"
    )))
}

/// Turn loosely-typed fields into the typed decision.
fn normalize(raw: RawDecision) -> Decision {
    Decision {
        response: raw.response.and_then(text_field),
        move_direction: raw
            .move_direction
            .and_then(text_field)
            .filter(|m| !m.eq_ignore_ascii_case("null") && !m.eq_ignore_ascii_case("none")),
    }
}

/// Read a JSON value as non-blank text.
fn text_field(value: serde_json::Value) -> Option<String> {
    let text = match value {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    };
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Extract JSON from a markdown code block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    // Look for ```json ... ``` or ``` ... ```
    let fence_body = |tag: &str| {
        text.find(tag).map(|i| {
            let after_tag = i.checked_add(tag.len()).unwrap_or(i);
            text.get(after_tag..)
                .and_then(|s| s.find('\n'))
                .and_then(|nl| after_tag.checked_add(nl))
                .and_then(|pos| pos.checked_add(1))
                .unwrap_or(after_tag)
        })
    };

    let start = fence_body("```json").or_else(|| fence_body("```"))?;
    let remaining = text.get(start..)?;
    let end = remaining.find("```")?;
    remaining.get(..end).map(str::trim)
}

/// The span from the first `{` to the last `}`, inclusive.
fn extract_outer_braces(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Strip trailing commas before closing braces and brackets (common LLM error).
fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());

    for (i, c) in chars.iter().copied().enumerate() {
        if c == ',' {
            let next = chars
                .get(i.saturating_add(1)..)
                .and_then(|rest| rest.iter().copied().find(|n| !n.is_whitespace()));
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_speech_and_move() {
        let decision = parse_llm_response(r#"{"response": "Hello there", "move": "north"}"#);
        assert_eq!(
            decision,
            Some(Decision {
                response: Some("Hello there".to_owned()),
                move_direction: Some("north".to_owned()),
            })
        );
    }

    #[test]
    fn parse_null_fields() {
        let decision = parse_llm_response(r#"{"response": null, "move": null}"#);
        assert_eq!(decision, Some(Decision::default()));
    }

    #[test]
    fn null_as_string_is_no_move() {
        let decision = parse_llm_response(r#"{"response": "Hm.", "move": "null"}"#);
        assert_eq!(decision.and_then(|d| d.move_direction), None);
        let decision = parse_llm_response(r#"{"move": "None"}"#);
        assert_eq!(decision.and_then(|d| d.move_direction), None);
    }

    #[test]
    fn parse_from_codeblock() {
        let raw = "Sure!\n```json\n{\"response\": \"Fine\", \"move\": null}\n```\n";
        let decision = parse_llm_response(raw);
        assert_eq!(decision.and_then(|d| d.response), Some("Fine".to_owned()));
    }

    #[test]
    fn parse_embedded_in_prose() {
        let raw = "I think I'll head off. {\"response\": \"Bye\", \"move\": \"east\"} That's all.";
        let decision = parse_llm_response(raw);
        assert_eq!(decision.and_then(|d| d.move_direction), Some("east".to_owned()));
    }

    #[test]
    fn parse_trailing_comma() {
        let decision = parse_llm_response(r#"{"response": "Ok", "move": "west",}"#);
        assert_eq!(decision.and_then(|d| d.move_direction), Some("west".to_owned()));
    }

    #[test]
    fn non_string_response_is_stringified() {
        let decision = parse_llm_response(r#"{"response": 42}"#);
        assert_eq!(decision.and_then(|d| d.response), Some("42".to_owned()));
    }

    #[test]
    fn blank_response_is_none() {
        let decision = parse_llm_response(r#"{"response": "   ", "move": ""}"#);
        assert_eq!(decision, Some(Decision::default()));
    }

    #[test]
    fn parse_garbage_returns_none() {
        assert!(parse_llm_response("I refuse to answer in JSON.").is_none());
        assert!(parse_llm_response("").is_none());
        assert!(parse_llm_response("} nothing {").is_none());
    }

    #[test]
    fn extract_json_from_plain_codeblock() {
        let text = "```\n{\"move\": \"south\"}\n```";
        assert_eq!(extract_json_from_codeblock(text), Some("{\"move\": \"south\"}"));
    }

    #[test]
    fn strip_trailing_commas_array() {
        assert_eq!(strip_trailing_commas("[1, 2, ]"), "[1, 2 ]");
        assert_eq!(strip_trailing_commas("{\"a\": 1,\n}"), "{\"a\": 1\n}");
    }
}
