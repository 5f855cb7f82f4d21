//! Defensive extraction of the specialist string from a model response.

use serde_json::Value;
use tracing::debug;

/// Returned whenever the response envelope carries no usable text.
pub const FALLBACK_SPECIALIST: &str = "Unable to determine specialist.";

/// Read `candidates[0].content.parts[0].text` out of `response`.
///
/// The envelope is untrusted: missing fields, wrong types, and empty arrays
/// all degrade to [`FALLBACK_SPECIALIST`] instead of erroring, so a
/// malformed vendor response never breaks the request. The text is trimmed;
/// empty or whitespace-only text also falls back. Misses are logged at
/// debug level while the external contract stays a plain string.
pub fn extract_specialist(response: &Value) -> String {
    let text = response
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("text"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty());

    match text {
        Some(t) => t.to_string(),
        None => {
            debug!("response envelope carried no candidate text, using fallback");
            FALLBACK_SPECIALIST.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn well_formed_response_is_trimmed() {
        let resp = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "  Cardiologist  " } ] } }
            ]
        });
        assert_eq!(extract_specialist(&resp), "Cardiologist");
    }

    #[test]
    fn empty_object_falls_back() {
        assert_eq!(extract_specialist(&json!({})), FALLBACK_SPECIALIST);
    }

    #[test]
    fn empty_candidates_falls_back() {
        assert_eq!(extract_specialist(&json!({ "candidates": [] })), FALLBACK_SPECIALIST);
    }

    #[test]
    fn empty_parts_falls_back() {
        let resp = json!({ "candidates": [ { "content": { "parts": [] } } ] });
        assert_eq!(extract_specialist(&resp), FALLBACK_SPECIALIST);
    }

    #[test]
    fn missing_text_field_falls_back() {
        let resp = json!({ "candidates": [ { "content": { "parts": [ {} ] } } ] });
        assert_eq!(extract_specialist(&resp), FALLBACK_SPECIALIST);
    }

    #[test]
    fn wrong_typed_fields_fall_back() {
        assert_eq!(extract_specialist(&json!({ "candidates": "nope" })), FALLBACK_SPECIALIST);
        let resp = json!({ "candidates": [ { "content": { "parts": [ { "text": 42 } ] } } ] });
        assert_eq!(extract_specialist(&resp), FALLBACK_SPECIALIST);
    }

    #[test]
    fn non_object_envelope_falls_back() {
        assert_eq!(extract_specialist(&json!(null)), FALLBACK_SPECIALIST);
        assert_eq!(extract_specialist(&json!("text")), FALLBACK_SPECIALIST);
        assert_eq!(extract_specialist(&json!([1, 2, 3])), FALLBACK_SPECIALIST);
    }

    #[test]
    fn whitespace_only_text_falls_back() {
        let resp = json!({ "candidates": [ { "content": { "parts": [ { "text": "   " } ] } } ] });
        assert_eq!(extract_specialist(&resp), FALLBACK_SPECIALIST);
    }

    #[test]
    fn only_first_candidate_and_part_are_read() {
        let resp = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Dermatologist" }, { "text": "Oncologist" } ] } },
                { "content": { "parts": [ { "text": "Neurologist" } ] } }
            ]
        });
        assert_eq!(extract_specialist(&resp), "Dermatologist");
    }
}
