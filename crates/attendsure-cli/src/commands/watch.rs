//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use attendsure_domain::traits::{CallStatusSource, Notifier};
use attendsure_domain::{CallId, CallSnapshot, CallStatus, Notice};
use attendsure_poller::{CallStatusPoller, PollHandle, PollReport, PollState, PollerConfig};
use attendsure_sdk::AttendSureClient;
use std::future::{self, Future};
use std::io;
use std::sync::Arc;
use tracing::warn;

/// Execute the watch command.
pub async fn execute_watch(
    args: WatchArgs,
    client: AttendSureClient,
    config: &Config,
    formatter: &Formatter,
    notifier: Arc<dyn Notifier>,
) -> Result<()> {
    let poller_config = args.poll.apply(config.poller.clone());
    poller_config.validate()?;

    let call_ids: Vec<CallId> = args.call_ids.into_iter().map(CallId::new).collect();
    notifier.notify(Notice::info(format!("Watching {} call(s)", call_ids.len())));

    let reports = watch_calls(
        client,
        call_ids,
        poller_config,
        formatter,
        notifier,
        shutdown_signal(tokio::signal::ctrl_c()),
    )
    .await?;

    let summary = formatter.format_reports(&reports)?;
    if !summary.is_empty() {
        println!("{}", summary);
    }
    Ok(())
}

/// Resolve when `signal` reports an interrupt.
///
/// If the handler cannot be installed the error is logged and this never
/// resolves, so watching continues until every session ends on its own.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("Could not listen for Ctrl+C, interrupt is disabled: {}", e);
        future::pending::<()>().await;
    }
}

/// Track calls until every session ends or `shutdown` resolves.
///
/// Each update is printed as it arrives. When `shutdown` resolves first, all
/// remaining sessions are cancelled. Reports are returned in `call_ids` order.
pub async fn watch_calls<S, F>(
    source: S,
    call_ids: Vec<CallId>,
    config: PollerConfig,
    formatter: &Formatter,
    notifier: Arc<dyn Notifier>,
    shutdown: F,
) -> Result<Vec<PollReport>>
where
    S: CallStatusSource + Send + Sync + 'static,
    F: Future<Output = ()>,
{
    let poller = CallStatusPoller::new(source, config)?;

    let handles: Vec<PollHandle> = call_ids
        .into_iter()
        .map(|call_id| {
            let formatter = formatter.clone();
            let notifier = Arc::clone(&notifier);
            poller.start(call_id, move |snapshot| {
                print_update(&formatter, notifier.as_ref(), &snapshot)
            })
        })
        .collect();

    tokio::pin!(shutdown);
    let mut interrupted = false;
    for handle in &handles {
        tokio::select! {
            _ = handle.stopped() => {}
            _ = &mut shutdown => {
                interrupted = true;
                break;
            }
        }
    }

    if interrupted {
        for handle in &handles {
            handle.cancel();
        }
        notifier.notify(Notice::info(format!(
            "Stopped watching {} call(s)",
            handles.len()
        )));
    }

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        let report = handle.join().await?;
        if report.state == PollState::Exhausted {
            notifier.notify(Notice::error(format!(
                "Gave up on call {}: {}",
                report.call_id,
                report.metrics.summary()
            )));
        }
        reports.push(report);
    }
    Ok(reports)
}

fn print_update(formatter: &Formatter, notifier: &dyn Notifier, snapshot: &CallSnapshot) {
    match formatter.format_update(snapshot) {
        Ok(line) if !line.is_empty() => println!("{}", line),
        Ok(_) => {}
        Err(e) => warn!(call_id = %snapshot.call_id(), "Failed to format update: {}", e),
    }

    if snapshot.terminal {
        notifier.notify(terminal_notice(snapshot));
    }
}

fn terminal_notice(snapshot: &CallSnapshot) -> Notice {
    let call_id = snapshot.call_id();
    match snapshot.status() {
        CallStatus::Failed => match &snapshot.call.fail_reason {
            Some(reason) => Notice::error(format!("Call {} failed: {}", call_id, reason)),
            None => Notice::error(format!("Call {} failed", call_id)),
        },
        _ => Notice::success(format!("Call {} completed", call_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use attendsure_domain::{CallDetail, CallRecord};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Source that walks each call through a fixed list of statuses
    struct StatusScript {
        statuses: Mutex<HashMap<CallId, Vec<CallStatus>>>,
    }

    impl StatusScript {
        fn new(entries: Vec<(CallId, Vec<CallStatus>)>) -> Self {
            let statuses = entries
                .into_iter()
                .map(|(id, mut list)| {
                    list.reverse();
                    (id, list)
                })
                .collect();
            Self {
                statuses: Mutex::new(statuses),
            }
        }
    }

    #[async_trait::async_trait]
    impl CallStatusSource for StatusScript {
        type Error = String;

        async fn fetch_call(&self, call_id: CallId) -> std::result::Result<CallDetail, Self::Error> {
            let mut statuses = self.statuses.lock().unwrap();
            let list = statuses.get_mut(&call_id).ok_or("unknown call")?;
            let status = if list.len() > 1 {
                list.pop()
            } else {
                list.last().cloned()
            };
            let status = status.ok_or("empty script")?;
            Ok(CallDetail::from_record(CallRecord::new(call_id, status)))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier(Mutex<Vec<Notice>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.0.lock().unwrap().push(notice);
        }
    }

    fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }

    fn fast() -> PollerConfig {
        PollerConfig::default().with_interval(Duration::from_millis(50))
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_until_terminal() {
        let a = CallId::new(1);
        let b = CallId::new(2);
        let source = StatusScript::new(vec![
            (a, vec![CallStatus::Queued, CallStatus::Completed]),
            (b, vec![CallStatus::InProgress, CallStatus::InProgress, CallStatus::Failed]),
        ]);
        let notifier = Arc::new(RecordingNotifier::default());

        let reports = watch_calls(
            source,
            vec![a, b],
            fast(),
            &quiet(),
            notifier.clone(),
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].call_id, a);
        assert!(reports.iter().all(|r| r.state == PollState::Terminal));

        let notices = notifier.0.lock().unwrap();
        assert!(notices.contains(&Notice::success("Call 1 completed")));
        assert!(notices.contains(&Notice::error("Call 2 failed")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_sessions() {
        let id = CallId::new(3);
        let source = StatusScript::new(vec![(id, vec![CallStatus::InProgress])]);
        let notifier = Arc::new(RecordingNotifier::default());

        let reports = watch_calls(
            source,
            vec![id],
            fast(),
            &quiet(),
            notifier.clone(),
            tokio::time::sleep(Duration::from_millis(500)),
        )
        .await
        .unwrap();

        assert_eq!(reports[0].state, PollState::Cancelled);
        assert!(reports[0].metrics.snapshots_delivered >= 1);
        assert!(notifier
            .0
            .lock()
            .unwrap()
            .contains(&Notice::info("Stopped watching 1 call(s)")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_session_is_reported() {
        let id = CallId::new(4);
        let source = StatusScript::new(vec![(id, vec![CallStatus::Queued])]);
        let notifier = Arc::new(RecordingNotifier::default());

        let reports = watch_calls(
            source,
            vec![id],
            fast().with_max_attempts(2),
            &quiet(),
            notifier.clone(),
            std::future::pending(),
        )
        .await
        .unwrap();

        assert_eq!(reports[0].state, PollState::Exhausted);
        let notices = notifier.0.lock().unwrap();
        assert!(notices
            .iter()
            .any(|n| n.message.starts_with("Gave up on call 4")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_signal_handler_does_not_shut_down() {
        let failed = async { Err::<(), _>(io::Error::other("no signal driver")) };
        let waited = tokio::time::timeout(Duration::from_secs(60), shutdown_signal(failed)).await;
        assert!(waited.is_err());

        let interrupted = async { Ok::<(), io::Error>(()) };
        let waited =
            tokio::time::timeout(Duration::from_secs(60), shutdown_signal(interrupted)).await;
        assert!(waited.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_outlives_failed_signal_handler() {
        let id = CallId::new(5);
        let source = StatusScript::new(vec![(
            id,
            vec![CallStatus::Queued, CallStatus::InProgress, CallStatus::Completed],
        )]);
        let notifier = Arc::new(RecordingNotifier::default());

        let reports = watch_calls(
            source,
            vec![id],
            fast(),
            &quiet(),
            notifier.clone(),
            shutdown_signal(async { Err::<(), _>(io::Error::other("no signal driver")) }),
        )
        .await
        .unwrap();

        assert_eq!(reports[0].state, PollState::Terminal);
        assert_eq!(reports[0].metrics.snapshots_delivered, 3);
        assert!(!notifier
            .0
            .lock()
            .unwrap()
            .contains(&Notice::info("Stopped watching 1 call(s)")));
    }

    #[tokio::test]
    async fn test_invalid_poller_config_is_an_error() {
        let source = StatusScript::new(vec![]);
        let config = PollerConfig::default().with_interval(Duration::ZERO);

        let result = watch_calls(
            source,
            vec![CallId::new(1)],
            config,
            &quiet(),
            Arc::new(RecordingNotifier::default()),
            std::future::pending(),
        )
        .await;

        assert!(matches!(result, Err(crate::error::CliError::Poller(_))));
    }

    #[test]
    fn test_terminal_notice() {
        let mut record = CallRecord::new(CallId::new(8), CallStatus::Failed);
        record.fail_reason = Some("Voicemail".to_string());
        let snapshot = CallSnapshot::new(record, None);
        assert_eq!(
            terminal_notice(&snapshot),
            Notice::error("Call 8 failed: Voicemail")
        );
    }
}
