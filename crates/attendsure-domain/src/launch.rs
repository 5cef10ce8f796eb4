//! Launch module - request and response of the call-launch endpoint

use crate::call::CallId;
use serde::{Deserialize, Serialize};

/// Request to place confirmation calls to a set of patients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    /// Patients to call; must not be empty
    pub patient_ids: Vec<i64>,

    /// Optional ISO-8601 launch time; immediate when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_at: Option<String>,
}

impl LaunchRequest {
    /// Request an immediate launch
    pub fn now(patient_ids: Vec<i64>) -> Self {
        Self {
            patient_ids,
            schedule_at: None,
        }
    }

    /// Set the scheduled launch time
    pub fn scheduled_at(mut self, at: impl Into<String>) -> Self {
        self.schedule_at = Some(at.into());
        self
    }
}

/// Call records created by a launch, one per requested patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    /// Backend ids of the created call records, in request order
    pub call_ids: Vec<CallId>,
}
