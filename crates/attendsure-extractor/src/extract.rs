//! Entry points: raw text to outcome

use crate::fields::outcome_from;
use crate::payload::AnalysisPayload;
use attendsure_domain::{CallDetail, CallOutcome, CallSnapshot};
use serde_json::Value;
use tracing::debug;

/// Normalize a raw analysis payload
///
/// Returns `None` when `raw` is absent, blank, or not JSON. Any JSON that
/// parses yields an outcome, possibly with every field empty.
pub fn extract(raw: Option<&str>) -> Option<CallOutcome> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    let root: Value = match serde_json::from_str(raw) {
        Ok(root) => root,
        Err(e) => {
            debug!("Analysis payload is not JSON: {}", e);
            return None;
        }
    };

    let payload = AnalysisPayload::resolve(&root);
    debug!("Analysis payload resolved as {}", payload.schema_name());

    Some(payload.candidate().map(outcome_from).unwrap_or_default())
}

/// Normalize the analysis stored on a fetched call detail
pub fn extract_detail(detail: &CallDetail) -> Option<CallOutcome> {
    extract(detail.structured_json())
}

/// Build a snapshot from a fetched call detail
///
/// The outcome is extracted from the stored payload; summary and patient are
/// carried over unchanged.
pub fn snapshot(detail: CallDetail) -> CallSnapshot {
    let outcome = extract_detail(&detail);
    let CallDetail {
        call,
        patient,
        result,
    } = detail;

    CallSnapshot::new(call, outcome)
        .with_summary(result.and_then(|r| r.summary))
        .with_patient(patient)
}
