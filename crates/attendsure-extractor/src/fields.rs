//! Read outcome fields out of a candidate object

use attendsure_domain::CallOutcome;
use serde_json::{Map, Value};

/// Build an outcome from the resolved candidate object
pub(crate) fn outcome_from(candidate: &Map<String, Value>) -> CallOutcome {
    CallOutcome {
        call_success: candidate.get("call_success").and_then(coerce_success),
        patient_response: text_field(candidate, "patient_response"),
        reason: text_field(candidate, "reason"),
        questions: candidate
            .get("questions")
            .map(string_items)
            .unwrap_or_default(),
    }
}

/// Interpret `call_success`
///
/// Booleans pass through; only the exact strings `"true"` and `"false"`
/// count otherwise. Null, numbers, arrays and objects are undetermined.
pub(crate) fn coerce_success(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn text_field(candidate: &Map<String, Value>, name: &str) -> Option<String> {
    candidate.get(name)?.as_str().map(str::to_string)
}

/// String elements of an array, in order; anything else yields nothing
fn string_items(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_success() {
        assert_eq!(coerce_success(&json!(true)), Some(true));
        assert_eq!(coerce_success(&json!(false)), Some(false));
        assert_eq!(coerce_success(&json!("true")), Some(true));
        assert_eq!(coerce_success(&json!("false")), Some(false));
    }

    #[test]
    fn test_coerce_success_undetermined() {
        assert_eq!(coerce_success(&json!("yes")), None);
        assert_eq!(coerce_success(&json!("TRUE")), None);
        assert_eq!(coerce_success(&json!("")), None);
        assert_eq!(coerce_success(&json!(null)), None);
        assert_eq!(coerce_success(&json!(1)), None);
        assert_eq!(coerce_success(&json!({"value": true})), None);
    }

    #[test]
    fn test_text_fields_require_strings() {
        let candidate = json!({ "patient_response": 3, "reason": "moved" });
        let outcome = outcome_from(candidate.as_object().unwrap());
        assert_eq!(outcome.patient_response, None);
        assert_eq!(outcome.reason.as_deref(), Some("moved"));
    }

    #[test]
    fn test_questions_keep_order_and_skip_non_strings() {
        let candidate = json!({ "questions": ["Where do I park?", 7, null, "Is it fasting?"] });
        let outcome = outcome_from(candidate.as_object().unwrap());
        assert_eq!(outcome.questions, vec!["Where do I park?", "Is it fasting?"]);
    }

    #[test]
    fn test_questions_not_an_array() {
        let candidate = json!({ "questions": "Where do I park?" });
        let outcome = outcome_from(candidate.as_object().unwrap());
        assert!(outcome.questions.is_empty());
    }
}
