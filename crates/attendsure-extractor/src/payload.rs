//! Resolve the parsed payload into one of the known schemas

use serde_json::{Map, Value};

/// Root key of the newer per-output schema
pub const STRUCTURED_OUTPUTS_KEY: &str = "structuredOutputs";

/// Root key of the flat legacy schema
pub const ANALYSIS_STRUCTURED_DATA_KEY: &str = "analysisStructuredData";

/// The shape a parsed analysis payload resolved to
///
/// Resolved once per payload so that field extraction only ever sees a
/// single candidate object.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload<'a> {
    /// First entry of `structuredOutputs` with an object `result`
    StructuredOutputs {
        /// Key of the selected entry
        key: &'a str,
        /// The entry's `result` object
        result: &'a Map<String, Value>,
    },

    /// The `analysisStructuredData` object
    AnalysisStructuredData(&'a Map<String, Value>),

    /// Neither schema is usable
    Unrecognized,
}

impl<'a> AnalysisPayload<'a> {
    /// Classify a parsed payload root
    ///
    /// `structuredOutputs` wins when its first entry carries an object
    /// `result`. Only that entry is considered, even when it is unusable and
    /// later entries are not; which entry should win when several exist is
    /// unsettled, so first-in-document-order is kept for compatibility.
    pub fn resolve(root: &'a Value) -> Self {
        let Some(root) = root.as_object() else {
            return AnalysisPayload::Unrecognized;
        };

        if let Some((key, result)) = root
            .get(STRUCTURED_OUTPUTS_KEY)
            .and_then(Value::as_object)
            .and_then(first_entry_result)
        {
            return AnalysisPayload::StructuredOutputs { key, result };
        }

        match root.get(ANALYSIS_STRUCTURED_DATA_KEY).and_then(Value::as_object) {
            Some(data) => AnalysisPayload::AnalysisStructuredData(data),
            None => AnalysisPayload::Unrecognized,
        }
    }

    /// The object fields are read from, if any
    pub fn candidate(&self) -> Option<&'a Map<String, Value>> {
        match self {
            AnalysisPayload::StructuredOutputs { result, .. } => Some(result),
            AnalysisPayload::AnalysisStructuredData(data) => Some(data),
            AnalysisPayload::Unrecognized => None,
        }
    }

    /// Short name of the resolved schema, for logs
    pub fn schema_name(&self) -> &'static str {
        match self {
            AnalysisPayload::StructuredOutputs { .. } => STRUCTURED_OUTPUTS_KEY,
            AnalysisPayload::AnalysisStructuredData(_) => ANALYSIS_STRUCTURED_DATA_KEY,
            AnalysisPayload::Unrecognized => "unrecognized",
        }
    }
}

/// `result` object of the first map entry, by document order
fn first_entry_result(outputs: &Map<String, Value>) -> Option<(&str, &Map<String, Value>)> {
    let (key, entry) = outputs.iter().next()?;
    let result = entry.get("result")?.as_object()?;
    Some((key.as_str(), result))
}
