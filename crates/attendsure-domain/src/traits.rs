//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the call-tracking logic and
//! the backend. Implementations live in other crates (`attendsure-sdk` for
//! HTTP, test doubles in each crate's tests).

use crate::{CallDetail, CallId, LaunchRequest, LaunchResponse, Notice};
use async_trait::async_trait;

/// Read side of the backend: fetch the current state of one call
///
/// Implemented by the infrastructure layer (attendsure-sdk)
#[async_trait]
pub trait CallStatusSource {
    /// Error type for fetch operations
    type Error: std::fmt::Display + Send;

    /// Fetch the call record, patient and stored provider output
    async fn fetch_call(&self, call_id: CallId) -> Result<CallDetail, Self::Error>;
}

/// Write side of the backend: create call records and queue the calls
///
/// Implemented by the infrastructure layer (attendsure-sdk)
#[async_trait]
pub trait CallLauncher {
    /// Error type for launch operations
    type Error: std::fmt::Display + Send;

    /// Launch calls for the requested patients
    async fn launch_calls(&self, request: LaunchRequest) -> Result<LaunchResponse, Self::Error>;
}

/// Side channel for operator notifications
///
/// Injected into consumers; the tracking core never depends on it.
pub trait Notifier: Send + Sync {
    /// Deliver a notice
    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CallRecord, CallStatus};
    use std::sync::Mutex;

    struct FixedSource(CallStatus);

    #[async_trait]
    impl CallStatusSource for FixedSource {
        type Error = String;

        async fn fetch_call(&self, call_id: CallId) -> Result<CallDetail, Self::Error> {
            Ok(CallDetail::from_record(CallRecord::new(call_id, self.0.clone())))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<Notice>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    #[tokio::test]
    async fn test_fixed_source_returns_record() {
        let source = FixedSource(CallStatus::Queued);
        let detail = source.fetch_call(CallId::new(4)).await.unwrap();
        assert_eq!(detail.call.id, CallId::new(4));
        assert_eq!(detail.call.status, CallStatus::Queued);
    }

    #[test]
    fn test_notifier_receives_notices() {
        let notifier = RecordingNotifier::default();
        notifier.notify(Notice::success("Launched call #1"));
        notifier.notify(Notice::error("Call #1 failed"));

        let seen = notifier.0.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].kind, crate::NoticeKind::Error);
    }
}
