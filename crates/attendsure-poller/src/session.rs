//! Poll session state and the consumer's handle on it

use crate::error::PollerError;
use crate::metrics::PollMetrics;
use attendsure_domain::{CallId, CallSnapshot};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Lifecycle state of a poll session
///
/// Every state except `Active` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PollState {
    /// Ticks are being scheduled
    Active,

    /// The call reached `completed` or `failed`
    Terminal,

    /// The consumer cancelled the session
    Cancelled,

    /// A configured attempt or duration limit was hit
    Exhausted,
}

impl PollState {
    /// Get the state name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PollState::Active => "active",
            PollState::Terminal => "terminal",
            PollState::Cancelled => "cancelled",
            PollState::Exhausted => "exhausted",
        }
    }

    /// Whether no further transitions can happen
    pub fn is_finished(&self) -> bool {
        !matches!(self, PollState::Active)
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final account of a finished session
#[derive(Debug, Clone)]
pub struct PollReport {
    /// Call that was tracked
    pub call_id: CallId,
    /// State the session ended in
    pub state: PollState,
    /// Last snapshot delivered before the session ended
    pub latest_snapshot: Option<CallSnapshot>,
    /// Session counters
    pub metrics: PollMetrics,
}

/// Mutable part of a session
#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) state: PollState,
    pub(crate) latest: Option<CallSnapshot>,
    pub(crate) metrics: PollMetrics,
    /// Thread running `on_update`, while a delivery is in progress
    pub(crate) delivering: Option<ThreadId>,
}

impl SessionState {
    pub(crate) fn new() -> Self {
        Self {
            state: PollState::Active,
            latest: None,
            metrics: PollMetrics::new(),
            delivering: None,
        }
    }

    /// Move out of `Active`; later transitions are ignored
    pub(crate) fn finish(&mut self, to: PollState) -> bool {
        if self.state == PollState::Active {
            self.state = to;
            true
        } else {
            false
        }
    }
}

/// State shared between a session task and its handle
///
/// `gate` is held for the whole of accepting a snapshot and running
/// `on_update`; `cancel` takes it too, so a snapshot is either delivered
/// before `cancel` returns or not at all. Lock order is `gate` then `state`.
#[derive(Debug)]
pub(crate) struct Session {
    state: Mutex<SessionState>,
    gate: Mutex<()>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            gate: Mutex::new(()),
        }
    }
}

pub(crate) type SharedSession = Arc<Session>;

/// Lock the shared state, recovering it if a consumer callback panicked
pub(crate) fn lock(shared: &SharedSession) -> MutexGuard<'_, SessionState> {
    shared.state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hold off `cancel` while a snapshot is being delivered
pub(crate) fn gate(shared: &SharedSession) -> MutexGuard<'_, ()> {
    shared.gate.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running poll session
///
/// Owned by the consumer that started the session. Dropping the handle does
/// not stop polling; call [`PollHandle::cancel`] when no longer interested.
#[derive(Debug)]
pub struct PollHandle {
    call_id: CallId,
    token: CancellationToken,
    stopped: CancellationToken,
    shared: SharedSession,
    task: JoinHandle<PollReport>,
}

impl PollHandle {
    pub(crate) fn new(
        call_id: CallId,
        token: CancellationToken,
        stopped: CancellationToken,
        shared: SharedSession,
        task: JoinHandle<PollReport>,
    ) -> Self {
        Self {
            call_id,
            token,
            stopped,
            shared,
            task,
        }
    }

    /// Call being tracked
    pub fn call_id(&self) -> CallId {
        self.call_id
    }

    /// Stop the session
    ///
    /// The state flips to `Cancelled` before this returns. A fetch already in
    /// flight runs to completion but its result is dropped, and no further
    /// fetch is scheduled. Has no effect on a finished session.
    ///
    /// If `on_update` is running on another thread, this blocks until it
    /// returns; `on_update` is never entered after `cancel` returns. Calling
    /// it from inside the session's own `on_update` does not block.
    pub fn cancel(&self) {
        let reentrant = lock(&self.shared).delivering == Some(thread::current().id());
        let _gate = (!reentrant).then(|| gate(&self.shared));

        let cancelled = lock(&self.shared).finish(PollState::Cancelled);
        self.token.cancel();
        if cancelled {
            tracing::debug!(call_id = %self.call_id, "Poll session cancelled");
        }
    }

    /// Current state
    pub fn state(&self) -> PollState {
        lock(&self.shared).state
    }

    /// Last delivered snapshot
    pub fn latest_snapshot(&self) -> Option<CallSnapshot> {
        lock(&self.shared).latest.clone()
    }

    /// Counters so far
    pub fn metrics(&self) -> PollMetrics {
        lock(&self.shared).metrics.clone()
    }

    /// Whether the session task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the session task to exit, keeping the handle
    ///
    /// Useful for waiting on several sessions while still being able to
    /// cancel the rest.
    pub async fn stopped(&self) {
        self.stopped.cancelled().await
    }

    /// Wait for the session to end
    pub async fn join(self) -> Result<PollReport, PollerError> {
        let call_id = self.call_id;
        self.task.await.map_err(|e| {
            PollerError::Worker(format!("Poll session for call {} failed: {}", call_id, e))
        })
    }
}
