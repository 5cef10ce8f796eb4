//! Behavioral tests for the Extractor

#[cfg(test)]
mod tests {
    use crate::{extract, extract_detail, snapshot, EndOfCallReport};
    use attendsure_domain::{
        CallDetail, CallId, CallOutcome, CallRecord, CallResultPayload, CallStatus,
    };
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_absent_and_blank_input() {
        assert!(extract(None).is_none());
        assert!(extract(Some("")).is_none());
        assert!(extract(Some("   \n\t")).is_none());
    }

    #[test]
    fn test_non_json_input() {
        assert!(extract(Some("not json")).is_none());
        assert!(extract(Some("{\"structuredOutputs\": ")).is_none());
        assert!(extract(Some("{'single': 'quotes'}")).is_none());
    }

    #[test]
    fn test_json_without_known_schema() {
        for raw in [r#"{}"#, r#"{"summary": "hello"}"#, "[]", "42", "null", "\"text\""] {
            let outcome = extract(Some(raw)).expect("parsed JSON must yield an outcome");
            assert_eq!(outcome, CallOutcome::default(), "input: {}", raw);
            assert!(outcome.is_empty());
        }
    }

    #[test]
    fn test_first_structured_output_wins() {
        let raw = r#"{
            "structuredOutputs": {
                "a": { "result": { "call_success": "true", "reason": "ok" } },
                "b": { "result": { "call_success": "false", "reason": "ignored" } }
            }
        }"#;

        let outcome = extract(Some(raw)).unwrap();
        assert_eq!(outcome.call_success, Some(true));
        assert_eq!(outcome.reason.as_deref(), Some("ok"));
    }

    #[test]
    fn test_first_by_document_order_not_alphabetical() {
        let raw = r#"{
            "structuredOutputs": {
                "zeta": { "result": { "reason": "first" } },
                "alpha": { "result": { "reason": "second" } }
            }
        }"#;

        let outcome = extract(Some(raw)).unwrap();
        assert_eq!(outcome.reason.as_deref(), Some("first"));
    }

    #[test]
    fn test_fallback_to_analysis_structured_data() {
        let raw = r#"{
            "analysisStructuredData": { "call_success": false, "patient_response": "no" }
        }"#;

        let outcome = extract(Some(raw)).unwrap();
        assert_eq!(outcome.call_success, Some(false));
        assert_eq!(outcome.patient_response.as_deref(), Some("no"));
        assert_eq!(outcome.reason, None);
        assert!(outcome.questions.is_empty());
    }

    #[test]
    fn test_fallback_when_structured_outputs_empty() {
        let raw = r#"{
            "structuredOutputs": {},
            "analysisStructuredData": { "call_success": false, "patient_response": "no" }
        }"#;

        let outcome = extract(Some(raw)).unwrap();
        assert_eq!(outcome.call_success, Some(false));
        assert_eq!(outcome.patient_response.as_deref(), Some("no"));
    }

    #[test]
    fn test_structured_outputs_not_mixed_with_fallback() {
        let raw = r#"{
            "structuredOutputs": { "a": { "result": { "reason": "primary" } } },
            "analysisStructuredData": { "call_success": true, "patient_response": "yes" }
        }"#;

        let outcome = extract(Some(raw)).unwrap();
        assert_eq!(outcome.reason.as_deref(), Some("primary"));
        assert_eq!(outcome.call_success, None);
        assert_eq!(outcome.patient_response, None);
    }

    #[test]
    fn test_call_success_coercion() {
        let cases = [
            (json!({ "call_success": "false" }), Some(false)),
            (json!({ "call_success": "true" }), Some(true)),
            (json!({ "call_success": true }), Some(true)),
            (json!({ "call_success": false }), Some(false)),
            (json!({ "call_success": "maybe" }), None),
            (json!({ "call_success": null }), None),
            (json!({}), None),
        ];

        for (data, expected) in cases {
            let raw = json!({ "analysisStructuredData": data }).to_string();
            let outcome = extract(Some(raw.as_str())).unwrap();
            assert_eq!(outcome.call_success, expected, "payload: {}", raw);
        }
    }

    #[test]
    fn test_full_outcome() {
        let raw = json!({
            "structuredOutputs": {
                "appointment-confirmation": {
                    "name": "appointment-confirmation",
                    "result": {
                        "call_success": true,
                        "patient_response": "I'll be there at 10.",
                        "reason": "Patient confirmed the appointment",
                        "questions": ["Should I bring my insurance card?"]
                    }
                }
            }
        })
        .to_string();

        let outcome = extract(Some(raw.as_str())).unwrap();
        assert_eq!(
            outcome,
            CallOutcome {
                call_success: Some(true),
                patient_response: Some("I'll be there at 10.".to_string()),
                reason: Some("Patient confirmed the appointment".to_string()),
                questions: vec!["Should I bring my insurance card?".to_string()],
            }
        );
    }

    #[test]
    fn test_extract_detail_reads_result() {
        let mut detail =
            CallDetail::from_record(CallRecord::new(CallId::new(3), CallStatus::Completed));
        assert!(extract_detail(&detail).is_none());

        detail.result = Some(CallResultPayload {
            summary: Some("Done".to_string()),
            structured_json: Some(r#"{"analysisStructuredData": {"reason": "ok"}}"#.to_string()),
        });
        let outcome = extract_detail(&detail).unwrap();
        assert_eq!(outcome.reason.as_deref(), Some("ok"));
    }

    #[test]
    fn test_snapshot_from_detail() {
        let mut detail =
            CallDetail::from_record(CallRecord::new(CallId::new(5), CallStatus::Failed));
        detail.call.fail_reason = Some("Busy".to_string());
        detail.result = Some(CallResultPayload {
            summary: Some("Line was busy.".to_string()),
            structured_json: Some("{}".to_string()),
        });

        let snap = snapshot(detail);
        assert!(snap.terminal);
        assert_eq!(snap.summary.as_deref(), Some("Line was busy."));
        assert_eq!(snap.outcome, Some(CallOutcome::default()));
        assert!(!snap.has_outcome());
        assert!(snap.patient.is_none());
    }

    #[test]
    fn test_assembled_report_is_extractable() {
        let payload = json!({
            "call": {
                "id": "prov-1",
                "status": "ended",
                "analysis": { "structuredData": { "call_success": "false", "reason": "wrong number" } },
                "artifact": {
                    "structuredOutputs": {
                        "out-1": { "result": { "call_success": "true", "reason": "confirmed" } }
                    }
                }
            }
        });

        let report = EndOfCallReport::from_value(&payload);
        let stored = report.structured_json();
        let outcome = extract(stored.as_deref()).unwrap();
        assert_eq!(outcome.call_success, Some(true));
        assert_eq!(outcome.reason.as_deref(), Some("confirmed"));
    }

    proptest! {
        #[test]
        fn prop_extract_is_total(raw in ".*") {
            let first = extract(Some(raw.as_str()));
            let second = extract(Some(raw.as_str()));
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_non_json_yields_none(tail in "[a-zA-Z0-9 ,:{}]*") {
            let raw = format!("x{}", tail);
            prop_assert!(extract(Some(raw.as_str())).is_none());
        }

        #[test]
        fn prop_questions_round_trip(questions in proptest::collection::vec("[a-zA-Z ?]{0,20}", 0..5)) {
            let raw = json!({ "analysisStructuredData": { "questions": questions.clone() } }).to_string();
            let outcome = extract(Some(raw.as_str())).unwrap();
            prop_assert_eq!(outcome.questions, questions);
        }
    }
}
