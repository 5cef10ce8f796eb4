//! Call status poller: one background task per tracked call

use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::session::{gate, lock, PollHandle, PollReport, PollState, Session, SharedSession};
use attendsure_domain::traits::CallStatusSource;
use attendsure_domain::{CallDetail, CallId, CallSnapshot};
use attendsure_extractor::snapshot;
use std::sync::Arc;
use std::thread;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Tracks calls from submission to a terminal status by repeated fetching
///
/// Each [`CallStatusPoller::start`] spawns an independent session on the
/// current tokio runtime. Sessions share the status source and nothing else.
///
/// # Examples
///
/// ```no_run
/// use attendsure_domain::CallId;
/// use attendsure_poller::{CallStatusPoller, PollerConfig};
/// use attendsure_sdk::AttendSureClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AttendSureClient::new("http://localhost:8000")?;
///     let poller = CallStatusPoller::new(client, PollerConfig::default())?;
///
///     let handle = poller.start(CallId::new(42), |snapshot| {
///         println!("call {} is {}", snapshot.call_id(), snapshot.status());
///     });
///
///     let report = handle.join().await?;
///     println!("finished: {}", report.state);
///     Ok(())
/// }
/// ```
pub struct CallStatusPoller<S> {
    source: Arc<S>,
    config: PollerConfig,
}

impl<S> Clone for CallStatusPoller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

impl<S> CallStatusPoller<S>
where
    S: CallStatusSource + Send + Sync + 'static,
{
    /// Create a poller over the given status source
    ///
    /// Fails with [`PollerError::Config`] if `config` does not validate.
    pub fn new(source: S, config: PollerConfig) -> Result<Self, PollerError> {
        Self::with_shared_source(Arc::new(source), config)
    }

    /// Create a poller over a source that is also used elsewhere
    pub fn with_shared_source(
        source: Arc<S>,
        config: PollerConfig,
    ) -> Result<Self, PollerError> {
        config.validate()?;
        Ok(Self { source, config })
    }

    /// Configuration in use
    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Start tracking a call
    ///
    /// The first fetch is issued immediately. `on_update` receives every
    /// snapshot in fetch order; the last one of a session that ends in
    /// `Terminal` has `terminal` set. It is never called after
    /// [`PollHandle::cancel`].
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start<F>(&self, call_id: CallId, on_update: F) -> PollHandle
    where
        F: FnMut(CallSnapshot) + Send + 'static,
    {
        let token = CancellationToken::new();
        let stopped = CancellationToken::new();
        let shared: SharedSession = Arc::new(Session::new());

        let task = tokio::spawn(run_session(
            Arc::clone(&self.source),
            self.config.clone(),
            call_id,
            Arc::clone(&shared),
            token.clone(),
            stopped.clone(),
            on_update,
        ));

        PollHandle::new(call_id, token, stopped, shared, task)
    }
}

/// Fate of a fetched detail
enum Delivery {
    Delivered { terminal: bool },
    Discarded,
}

async fn run_session<S, F>(
    source: Arc<S>,
    config: PollerConfig,
    call_id: CallId,
    shared: SharedSession,
    token: CancellationToken,
    stopped: CancellationToken,
    mut on_update: F,
) -> PollReport
where
    S: CallStatusSource + Send + Sync + 'static,
    F: FnMut(CallSnapshot) + Send + 'static,
{
    // Fires on every exit path, including a panicking callback
    let _stopped = stopped.drop_guard();
    let started = Instant::now();
    let interval = config.interval();

    info!(
        %call_id,
        "Polling started (interval: {:?}, max attempts: {:?}, max duration: {:?})",
        interval,
        config.max_attempts,
        config.max_duration()
    );

    loop {
        if token.is_cancelled() {
            break;
        }

        if limit_reached(&config, &shared, started) {
            if lock(&shared).finish(PollState::Exhausted) {
                warn!(%call_id, "Polling limit reached before a terminal status");
            }
            break;
        }

        let attempt = {
            let mut state = lock(&shared);
            state.metrics.record_attempt();
            state.metrics.fetch_attempts
        };
        debug!(%call_id, attempt, "Fetching call status");

        // An in-flight fetch is not aborted by cancellation; its result is dropped below.
        match source.fetch_call(call_id).await {
            Ok(detail) => match deliver(&shared, detail, started, &mut on_update) {
                Delivery::Delivered { terminal } => {
                    if terminal {
                        info!(%call_id, "Call reached a terminal status");
                        break;
                    }
                }
                Delivery::Discarded => {
                    debug!(%call_id, "Discarding fetch result of a finished session");
                    break;
                }
            },
            Err(e) => {
                let mut state = lock(&shared);
                state.metrics.record_failure();
                state.metrics.elapsed = started.elapsed();
                warn!(%call_id, attempt, "Fetch failed, retrying in {:?}: {}", interval, e);
            }
        }

        tokio::select! {
            _ = token.cancelled() => break,
            _ = sleep(interval) => {}
        }
    }

    let mut state = lock(&shared);
    state.metrics.elapsed = started.elapsed();
    info!(%call_id, state = %state.state, "Polling stopped: {}", state.metrics.summary());

    PollReport {
        call_id,
        state: state.state,
        latest_snapshot: state.latest.clone(),
        metrics: state.metrics.clone(),
    }
}

/// Record a fetched detail and hand it to `on_update`, unless the session
/// already finished
///
/// Runs under the session gate, so a concurrent `cancel` either lands before
/// the state check or waits for `on_update` to return.
fn deliver<F>(
    shared: &SharedSession,
    detail: CallDetail,
    started: Instant,
    on_update: &mut F,
) -> Delivery
where
    F: FnMut(CallSnapshot),
{
    let _gate = gate(shared);

    let snap = {
        let mut state = lock(shared);
        state.metrics.elapsed = started.elapsed();

        if state.state != PollState::Active {
            state.metrics.record_discard();
            return Delivery::Discarded;
        }

        let snap = snapshot(detail);
        if snap.terminal {
            state.finish(PollState::Terminal);
        }
        state.latest = Some(snap.clone());
        state.metrics.record_delivery();
        state.delivering = Some(thread::current().id());
        snap
    };

    let terminal = snap.terminal;
    debug!(call_id = %snap.call_id(), status = %snap.status(), terminal, "Delivering snapshot");
    on_update(snap);

    lock(shared).delivering = None;
    Delivery::Delivered { terminal }
}

fn limit_reached(config: &PollerConfig, shared: &SharedSession, started: Instant) -> bool {
    if let Some(max) = config.max_attempts {
        if lock(shared).metrics.fetch_attempts >= max {
            return true;
        }
    }
    config
        .max_duration()
        .is_some_and(|max| started.elapsed() >= max)
}
