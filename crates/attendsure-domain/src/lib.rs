//! AttendSure Domain Layer
//!
//! Core data model for tracking outbound confirmation calls placed through
//! an external voice-call provider, plus the trait seams through which the
//! rest of the workspace talks to the backend.
//!
//! ## Key Concepts
//!
//! - **CallRecord**: The backend's view of one call (status, timestamps, failure reason)
//! - **CallOutcome**: The normalized interpretation of the provider's analysis payload
//! - **CallSnapshot**: A CallRecord and its outcome observed at one point in time
//! - **Terminal status**: `completed` or `failed`; the record no longer changes
//!
//! ## Architecture
//!
//! - Pure data and trait definitions only
//! - HTTP transport lives in `attendsure-sdk`
//! - Payload interpretation lives in `attendsure-extractor`
//! - Lifecycle tracking lives in `attendsure-poller`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call;
pub mod detail;
pub mod launch;
pub mod notice;
pub mod outcome;
pub mod snapshot;
pub mod traits;

// Re-exports for convenience
pub use call::{CallId, CallRecord, CallStatus};
pub use detail::{CallDetail, CallResultPayload, PatientSummary};
pub use launch::{LaunchRequest, LaunchResponse};
pub use notice::{Notice, NoticeKind};
pub use outcome::CallOutcome;
pub use snapshot::CallSnapshot;
