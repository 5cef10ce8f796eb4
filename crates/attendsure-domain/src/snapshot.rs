//! Snapshot module - a call and its outcome at one point in time

use crate::call::{CallId, CallRecord, CallStatus};
use crate::detail::PatientSummary;
use crate::outcome::CallOutcome;
use serde::{Deserialize, Serialize};

/// Combined view of a call record and its normalized outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSnapshot {
    /// The record as last fetched
    pub call: CallRecord,

    /// Normalized analysis; `None` when no payload was stored or it was not JSON
    pub outcome: Option<CallOutcome>,

    /// Provider summary text, when stored
    #[serde(default)]
    pub summary: Option<String>,

    /// The patient being called, when returned
    #[serde(default)]
    pub patient: Option<PatientSummary>,

    /// Whether the call status was terminal when fetched
    pub terminal: bool,
}

impl CallSnapshot {
    /// Build a snapshot; the terminal flag follows the record's status
    pub fn new(call: CallRecord, outcome: Option<CallOutcome>) -> Self {
        let terminal = call.is_terminal();
        Self {
            call,
            outcome,
            summary: None,
            patient: None,
            terminal,
        }
    }

    /// Attach the provider summary
    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    /// Attach the patient
    pub fn with_patient(mut self, patient: Option<PatientSummary>) -> Self {
        self.patient = patient;
        self
    }

    /// Call id shortcut
    pub fn call_id(&self) -> CallId {
        self.call.id
    }

    /// Status shortcut
    pub fn status(&self) -> &CallStatus {
        &self.call.status
    }

    /// Whether outcome fields are available to show
    ///
    /// False both while the call is in flight and when the payload carried
    /// nothing recognizable; check `terminal` to tell those apart.
    pub fn has_outcome(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| !o.is_empty())
    }
}
