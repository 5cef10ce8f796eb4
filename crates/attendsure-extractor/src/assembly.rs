//! Build the stored analysis document from a provider end-of-call report
//!
//! The backend keeps both provider schemas side by side under the same root
//! keys the extractor reads, so a report stored here always round-trips
//! through [`crate::extract`].

use crate::payload::{ANALYSIS_STRUCTURED_DATA_KEY, STRUCTURED_OUTPUTS_KEY};
use serde_json::{Map, Value};

/// Combine a provider call object's analysis into one document
///
/// Takes `analysis.structuredData` and `artifact.structuredOutputs` (null
/// counts as absent). Returns `None` when neither is present.
pub fn assemble_structured_payload(call: &Value) -> Option<Value> {
    let mut combined = Map::new();

    if let Some(data) = non_null(call.pointer("/analysis/structuredData")) {
        combined.insert(ANALYSIS_STRUCTURED_DATA_KEY.to_string(), data.clone());
    }
    if let Some(outputs) = non_null(call.pointer("/artifact/structuredOutputs")) {
        combined.insert(STRUCTURED_OUTPUTS_KEY.to_string(), outputs.clone());
    }

    if combined.is_empty() {
        None
    } else {
        Some(Value::Object(combined))
    }
}

/// The parts of a provider end-of-call report the backend keeps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndOfCallReport {
    /// Provider-side call id
    pub provider_call_id: Option<String>,
    /// Provider status string
    pub status: Option<String>,
    /// Call start (ISO-8601)
    pub started_at: Option<String>,
    /// Call end (ISO-8601)
    pub ended_at: Option<String>,
    /// `analysis.summary`
    pub summary: Option<String>,
    /// Combined analysis document, see [`assemble_structured_payload`]
    pub structured: Option<Value>,
}

impl EndOfCallReport {
    /// Read a report; the call object may sit under a top-level `call` key
    pub fn from_value(payload: &Value) -> Self {
        let call = payload
            .get("call")
            .filter(|c| c.is_object())
            .unwrap_or(payload);

        Self {
            provider_call_id: string_at(call, "/id"),
            status: string_at(call, "/status"),
            started_at: string_at(call, "/startedAt"),
            ended_at: string_at(call, "/endedAt"),
            summary: string_at(call, "/analysis/summary"),
            structured: assemble_structured_payload(call),
        }
    }

    /// The combined document as stored text
    pub fn structured_json(&self) -> Option<String> {
        self.structured.as_ref().map(Value::to_string)
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value.pointer(pointer)?.as_str().map(str::to_string)
}
