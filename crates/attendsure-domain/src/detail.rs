//! Call detail module - the read model returned for a single call

use crate::call::CallRecord;
use serde::{Deserialize, Serialize};

/// Patient fields shown alongside a call
///
/// Only the fields a call view needs; the contact record itself belongs to
/// the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    /// Backend identifier
    #[serde(default)]
    pub id: Option<i64>,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Dialed number
    #[serde(default)]
    pub phone: Option<String>,

    /// Treating doctor
    #[serde(default)]
    pub doctor_name: Option<String>,

    /// Appointment date being confirmed
    #[serde(default)]
    pub appointment_date: Option<String>,

    /// Appointment time being confirmed
    #[serde(default)]
    pub appointment_time: Option<String>,
}

/// Provider output stored for a finished call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallResultPayload {
    /// Free-text summary written by the provider
    #[serde(default)]
    pub summary: Option<String>,

    /// Opaque JSON text holding the structured analysis
    ///
    /// Shape is not guaranteed; interpret with `attendsure-extractor`.
    #[serde(default)]
    pub structured_json: Option<String>,
}

/// Everything the backend returns for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallDetail {
    /// The call record
    pub call: CallRecord,

    /// The patient being called, if the backend still has it
    #[serde(default)]
    pub patient: Option<PatientSummary>,

    /// Provider output, present once the call has been processed
    #[serde(default)]
    pub result: Option<CallResultPayload>,
}

impl CallDetail {
    /// Wrap a bare record with no patient or result
    pub fn from_record(call: CallRecord) -> Self {
        Self {
            call,
            patient: None,
            result: None,
        }
    }

    /// The raw analysis text, if any was stored
    pub fn structured_json(&self) -> Option<&str> {
        self.result.as_ref()?.structured_json.as_deref()
    }

    /// The provider summary, if any was stored
    pub fn summary(&self) -> Option<&str> {
        self.result.as_ref()?.summary.as_deref()
    }
}
