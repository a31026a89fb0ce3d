//! Structured extraction from free-form completion responses.
//!
//! Models are asked to answer with a fenced JSON block, but the response may
//! wrap the fence in prose, omit the fence entirely, or be unparseable.
//! `extract` is a total function over all of those cases: it never errors
//! and never panics, it only ever returns one of two shapes.

use serde::de::DeserializeOwned;
use serde_json::Value;

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Outcome of a structured-extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    /// A JSON value was recovered.
    Parsed(Value),
    /// Parsing failed; the original text is carried verbatim as a fallback.
    Raw(String),
}

impl ExtractionResult {
    /// True exactly when parsing failed and the raw fallback is carried.
    pub fn parse_failed(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

/// Attempt to parse a JSON object out of an arbitrary text blob.
///
/// Looks for the first ```` ```json ```` fence and parses its body; without
/// a (closed) fence the whole trimmed text is tried instead. Any parse
/// failure yields [`ExtractionResult::Raw`] with the input verbatim.
pub fn extract(text: &str) -> ExtractionResult {
    let candidate = fenced_body(text).unwrap_or_else(|| text.trim());
    match serde_json::from_str(candidate) {
        Ok(value) => ExtractionResult::Parsed(value),
        Err(_) => ExtractionResult::Raw(text.to_string()),
    }
}

/// Extract and deserialize into a typed stage response.
///
/// `Err` carries a human-readable reason; the caller already holds the raw
/// text for the fallback.
pub fn extract_typed<T: DeserializeOwned>(text: &str) -> Result<T, String> {
    match extract(text) {
        ExtractionResult::Parsed(value) => serde_json::from_value(value)
            .map_err(|e| format!("response JSON does not match the expected shape: {e}")),
        ExtractionResult::Raw(_) => {
            Err("response does not contain a parseable JSON object".to_string())
        }
    }
}

/// Body of the first closed ```` ```json ```` fence, if any.
fn fenced_body(text: &str) -> Option<&str> {
    let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_CLOSE)?;
    Some(rest[..end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn recovers_value_from_fenced_block() {
        let text = "Here is my answer:\n```json\n{\"overall_score\": 4}\n```\nDone.";
        assert_eq!(
            extract(text),
            ExtractionResult::Parsed(json!({"overall_score": 4}))
        );
    }

    #[test]
    fn parses_bare_json_without_fence() {
        let text = "  {\"rating\": 2, \"justification\": \"weak\"}  ";
        assert_eq!(
            extract(text),
            ExtractionResult::Parsed(json!({"rating": 2, "justification": "weak"}))
        );
    }

    #[test]
    fn fenced_round_trip_is_exact() {
        let value = json!({
            "metrics": {"clarity": {"score": 4, "rationale": "well defined"}},
            "overall_score": 4,
            "overall_assessment": "solid"
        });
        let text = format!("```json\n{}\n```", serde_json::to_string_pretty(&value).unwrap());
        assert_eq!(extract(&text), ExtractionResult::Parsed(value));
    }

    #[test]
    fn non_json_text_falls_back_verbatim() {
        let text = "I could not produce JSON, sorry.";
        let result = extract(text);
        assert!(result.parse_failed());
        assert_eq!(result, ExtractionResult::Raw(text.to_string()));
    }

    #[test]
    fn unterminated_fence_falls_back() {
        // No closing fence and the body alone is not the whole text, so the
        // whole-text parse fails too.
        let text = "```json\n{\"a\": 1}";
        assert!(extract(text).parse_failed());
    }

    #[test]
    fn garbage_inside_fence_falls_back() {
        let text = "```json\nnot json at all\n```";
        assert_eq!(extract(text), ExtractionResult::Raw(text.to_string()));
    }

    #[test]
    fn typed_extraction_reports_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            final_score: u8,
        }
        let err = extract_typed::<Shape>("```json\n{\"other\": 1}\n```").unwrap_err();
        assert!(err.contains("expected shape"));
    }

    proptest! {
        /// Total function: any input returns one of the two shapes, and a
        /// fallback always carries the input verbatim.
        #[test]
        fn extract_is_total(text in ".{0,256}") {
            match extract(&text) {
                ExtractionResult::Parsed(_) => {}
                ExtractionResult::Raw(raw) => prop_assert_eq!(raw, text),
            }
        }

        /// Well-formed fenced JSON always round-trips exactly.
        #[test]
        fn fenced_json_round_trips(score in 1u8..=5) {
            let value = json!({"overall_score": score});
            let text = format!("preamble\n```json\n{value}\n```");
            prop_assert_eq!(extract(&text), ExtractionResult::Parsed(value));
        }
    }
}
