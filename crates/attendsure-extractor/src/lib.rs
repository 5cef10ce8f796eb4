//! AttendSure Extractor
//!
//! Normalizes the voice-call provider's analysis payload into a
//! [`CallOutcome`].
//!
//! # Overview
//!
//! Once a call ends, the backend stores the provider's structured analysis as
//! opaque JSON text. Its shape is not contractually stable; two schemas are
//! known:
//!
//! - **`structuredOutputs`**: a map of arbitrary keys to `{ "result": {...} }`.
//!   The first entry in document order is used; later entries are ignored.
//! - **`analysisStructuredData`**: a flat object with the same field names,
//!   used only when `structuredOutputs` yields nothing.
//!
//! # Guarantees
//!
//! [`extract`] is deterministic and total. Malformed input degrades to "no
//! data", never to an error or a panic:
//!
//! - absent, empty or non-JSON text → `None`
//! - JSON with neither schema → `Some(CallOutcome::default())`
//!
//! # Example Usage
//!
//! ```
//! use attendsure_extractor::extract;
//!
//! let raw = r#"{
//!     "structuredOutputs": {
//!         "so-1": { "result": { "call_success": "true", "reason": "confirmed" } }
//!     }
//! }"#;
//!
//! let outcome = extract(Some(raw)).unwrap();
//! assert_eq!(outcome.call_success, Some(true));
//! assert_eq!(outcome.reason.as_deref(), Some("confirmed"));
//!
//! assert!(extract(Some("not json")).is_none());
//! ```

#![warn(missing_docs)]

mod assembly;
mod extract;
mod fields;
mod payload;

#[cfg(test)]
mod tests;

pub use assembly::{assemble_structured_payload, EndOfCallReport};
pub use attendsure_domain::CallOutcome;
pub use extract::{extract, extract_detail, snapshot};
pub use payload::{AnalysisPayload, ANALYSIS_STRUCTURED_DATA_KEY, STRUCTURED_OUTPUTS_KEY};
