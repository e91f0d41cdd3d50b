//! Structured-output recovery: pull a JSON object out of loosely-formatted
//! model text.
//!
//! ## Why is recovery necessary?
//!
//! Even well-prompted models routinely decorate the object they were asked
//! for — wrapping it in ` ```json … ``` ` fences, prefixing "Here is the
//! JSON you requested:", or appending a closing remark. Failing a chunk
//! over a fence would throw away a perfectly good answer, so every model
//! response in this crate passes through [`extract_object`] before being
//! decoded.
//!
//! ## Contract
//!
//! [`extract_object`] is **total**: for any input string — empty, pure
//! prose, malformed braces — it returns either [`Extraction::Object`] or
//! [`Extraction::Failure`]. It never panics and no error escapes it.
//! Schema conformance is the caller's responsibility; the same recovery
//! step serves claim objects, grammar objects, outline objects, and gap
//! reports.
//!
//! ## Known limitation
//!
//! The object is located as the span from the *first* `{` to the *last*
//! `}` in the cleaned text. When a response contains several independent
//! top-level objects, the span covers all of them and the parse fails.
//! This over-capture is a deliberate, documented trade-off — it keeps the
//! scan trivial and handles the overwhelmingly common case of one object
//! with surrounding noise.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Result of attempting to recover a structured object from model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// A well-formed JSON object was recovered.
    Object(serde_json::Value),
    /// No object could be recovered; the raw text is preserved for
    /// diagnostics.
    Failure { raw: String },
}

impl Extraction {
    /// The recovered value, if any.
    pub fn into_object(self) -> Option<serde_json::Value> {
        match self {
            Extraction::Object(v) => Some(v),
            Extraction::Failure { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Extraction::Failure { .. })
    }
}

// Opening or closing fence with any language tag, e.g. ```json or ```.
static RE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*").unwrap());

/// Recover a JSON object from raw model output.
///
/// Strips fenced code-block markers of any language tag, then parses the
/// span from the first `{` to the last `}` in what remains.
pub fn extract_object(raw: &str) -> Extraction {
    let cleaned = RE_FENCE.replace_all(raw, "");

    let span = match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(open), Some(close)) if open < close => &cleaned[open..=close],
        _ => {
            debug!("No brace span found in model output ({} bytes)", raw.len());
            return Extraction::Failure {
                raw: raw.to_string(),
            };
        }
    };

    match serde_json::from_str::<serde_json::Value>(span) {
        Ok(value) if value.is_object() => Extraction::Object(value),
        Ok(_) | Err(_) => {
            debug!("Brace span did not parse as an object");
            Extraction::Failure {
                raw: raw.to_string(),
            }
        }
    }
}

/// Recover and decode a typed object from raw model output.
///
/// Folds both failure modes — no recoverable object, or an object that
/// does not match `T` — into `None`. Callers that need the raw text for
/// diagnostics should use [`extract_object`] directly.
pub fn parse_object<T: DeserializeOwned>(raw: &str) -> Option<T> {
    match extract_object(raw) {
        Extraction::Object(value) => serde_json::from_value(value).ok(),
        Extraction::Failure { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_object_is_parsed() {
        let ex = extract_object(r#"{"fact": "water boils at 100C"}"#);
        assert_eq!(
            ex.into_object().unwrap(),
            json!({"fact": "water boils at 100C"})
        );
    }

    #[test]
    fn fenced_object_is_parsed() {
        let raw = "```json\n{\"mistake\": \"recieve\", \"type\": \"spelling\", \"correction\": \"receive\"}\n```";
        let value = extract_object(raw).into_object().unwrap();
        assert_eq!(value["mistake"], "recieve");
        assert_eq!(value["correction"], "receive");
    }

    #[test]
    fn fence_without_language_tag() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_object(raw).into_object().unwrap(), json!({"a": 1}));
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = "Sure! Here is the JSON you asked for:\n{\"fact\": null}\nLet me know if you need anything else.";
        assert_eq!(
            extract_object(raw).into_object().unwrap(),
            json!({"fact": null})
        );
    }

    #[test]
    fn prose_and_fences_combined() {
        let raw = "Here you go:\n```json\n{\"sections\": []}\n```\nHope that helps!";
        assert_eq!(
            extract_object(raw).into_object().unwrap(),
            json!({"sections": []})
        );
    }

    #[test]
    fn nested_object_round_trips() {
        let original = json!({
            "sections": [
                {"heading": "Intro", "subheadings": [{"heading": "Scope", "bullets": ["a", "b"]}], "bullets": []}
            ]
        });
        let serialized = serde_json::to_string(&original).unwrap();
        assert_eq!(extract_object(&serialized).into_object().unwrap(), original);
    }

    #[test]
    fn empty_input_fails_without_panic() {
        assert!(extract_object("").is_failure());
    }

    #[test]
    fn pure_prose_fails_without_panic() {
        assert!(extract_object("I could not find any facts in this text.").is_failure());
    }

    #[test]
    fn malformed_braces_fail_without_panic() {
        assert!(extract_object("}{").is_failure());
        assert!(extract_object("{\"unclosed\": ").is_failure());
    }

    #[test]
    fn failure_preserves_raw_text() {
        let raw = "not json at all";
        match extract_object(raw) {
            Extraction::Failure { raw: kept } => assert_eq!(kept, raw),
            Extraction::Object(_) => panic!("expected failure"),
        }
    }

    #[test]
    fn non_object_json_is_a_failure() {
        // An array or bare scalar is not the object callers expect.
        assert!(extract_object("[1, 2, 3]").is_failure());
    }

    #[test]
    fn multiple_objects_over_capture() {
        // First-{ to last-} spans both objects; the combined span is not
        // valid JSON, so this fails. Documented limitation.
        assert!(extract_object(r#"{"a": 1} {"b": 2}"#).is_failure());
    }

    #[test]
    fn parse_object_decodes_typed() {
        #[derive(serde::Deserialize)]
        struct Claim {
            fact: Option<String>,
        }
        let claim: Claim = parse_object(r#"{"fact": "The Nile is in Africa."}"#).unwrap();
        assert_eq!(claim.fact.as_deref(), Some("The Nile is in Africa."));
    }

    #[test]
    fn parse_object_schema_mismatch_is_none() {
        #[derive(serde::Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            required_field: u32,
        }
        assert!(parse_object::<Strict>(r#"{"other": true}"#).is_none());
    }
}
