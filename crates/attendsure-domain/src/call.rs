//! Call module - the backend's record of one outbound call

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Backend identifier for a call record
///
/// Integer primary key assigned by the launch endpoint. Distinct from the
/// provider's own call id, which never reaches this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(i64);

impl CallId {
    /// Wrap a raw backend id
    ///
    /// # Examples
    ///
    /// ```
    /// use attendsure_domain::CallId;
    ///
    /// let id = CallId::new(42);
    /// assert_eq!(id.value(), 42);
    /// assert_eq!(id.to_string(), "42");
    /// ```
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CallId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CallId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| format!("Invalid call id '{}': {}", s, e))
    }
}

/// Lifecycle status of a call as reported by the backend
///
/// `Completed` and `Failed` are terminal: once observed, the record will not
/// change again. Status strings the backend invents later are preserved in
/// `Other` and treated as still in flight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallStatus {
    /// Created, not yet handed to the provider
    Queued,

    /// Handed to the provider, call not finished
    InProgress,

    /// Provider reported the end of the call
    Completed,

    /// Launch or call failed; see `fail_reason`
    Failed,

    /// Unrecognized status string
    Other(String),
}

impl CallStatus {
    /// Get the wire name of the status
    pub fn as_str(&self) -> &str {
        match self {
            CallStatus::Queued => "queued",
            CallStatus::InProgress => "in_progress",
            CallStatus::Completed => "completed",
            CallStatus::Failed => "failed",
            CallStatus::Other(s) => s.as_str(),
        }
    }

    /// Parse a status from its wire name (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "queued" => CallStatus::Queued,
            "in_progress" => CallStatus::InProgress,
            "completed" => CallStatus::Completed,
            "failed" => CallStatus::Failed,
            _ => CallStatus::Other(s.to_string()),
        }
    }

    /// Whether the call has reached a state that will not change
    ///
    /// # Examples
    ///
    /// ```
    /// use attendsure_domain::CallStatus;
    ///
    /// assert!(CallStatus::Completed.is_terminal());
    /// assert!(CallStatus::Failed.is_terminal());
    /// assert!(!CallStatus::InProgress.is_terminal());
    /// ```
    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Completed | CallStatus::Failed)
    }
}

impl From<String> for CallStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<CallStatus> for String {
    fn from(status: CallStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call record - created by the launch endpoint, mutated only by the backend
///
/// Observed read-only by everything in this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Backend identifier
    pub id: CallId,

    /// Current lifecycle status
    pub status: CallStatus,

    /// Patient the call is placed to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,

    /// Requested launch time (ISO-8601), when the call was scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<String>,

    /// Call start (ISO-8601)
    #[serde(default)]
    pub started_at: Option<String>,

    /// Call end (ISO-8601)
    #[serde(default)]
    pub ended_at: Option<String>,

    /// Free-text failure reason, present when status is `failed`
    #[serde(default)]
    pub fail_reason: Option<String>,
}

impl CallRecord {
    /// Create a bare record with the given id and status
    pub fn new(id: CallId, status: CallStatus) -> Self {
        Self {
            id,
            status,
            patient_id: None,
            scheduled_at: None,
            started_at: None,
            ended_at: None,
            fail_reason: None,
        }
    }

    /// Whether the record is in a terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Elapsed call time, when both timestamps are present and parse
    ///
    /// Returns `None` if either timestamp is missing or unparseable, or if
    /// the end precedes the start.
    pub fn duration(&self) -> Option<Duration> {
        let started = parse_timestamp(self.started_at.as_deref()?)?;
        let ended = parse_timestamp(self.ended_at.as_deref()?)?;
        (ended - started).to_std().ok()
    }
}

/// Parse an ISO-8601 timestamp; offset-less values are read as UTC
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
