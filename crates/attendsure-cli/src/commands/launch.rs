//! Launch command implementation.

use crate::cli::LaunchArgs;
use crate::commands::watch::{shutdown_signal, watch_calls};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use attendsure_domain::traits::{CallLauncher, CallStatusSource, Notifier};
use attendsure_domain::{LaunchRequest, Notice};
use attendsure_sdk::SdkError;
use std::sync::Arc;

/// Execute the launch command.
///
/// `backend` launches the calls and, with `--watch`, is also polled for them.
pub async fn execute_launch<B>(
    args: LaunchArgs,
    backend: &B,
    config: &Config,
    formatter: &Formatter,
    notifier: Arc<dyn Notifier>,
) -> Result<()>
where
    B: CallLauncher<Error = SdkError> + CallStatusSource + Clone + Send + Sync + 'static,
{
    let request = build_request(&args)?;

    let response = backend.launch_calls(request).await?;
    println!("{}", formatter.format_launch(&response)?);

    if !args.watch {
        return Ok(());
    }

    let poller_config = args.poll.apply(config.poller.clone());
    poller_config.validate()?;

    notifier.notify(Notice::info(format!(
        "Watching {} call(s)",
        response.call_ids.len()
    )));
    let reports = watch_calls(
        backend.clone(),
        response.call_ids,
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

/// Build the launch request from the command arguments.
pub fn build_request(args: &LaunchArgs) -> Result<LaunchRequest> {
    if args.patient_ids.is_empty() {
        return Err(CliError::InvalidInput(
            "At least one patient ID is required".to_string(),
        ));
    }

    let request = LaunchRequest::now(args.patient_ids.clone());
    match args.schedule_at.as_deref().map(str::trim) {
        None => Ok(request),
        Some("") => Err(CliError::InvalidInput(
            "--schedule-at must not be empty".to_string(),
        )),
        Some(at) => Ok(request.scheduled_at(at)),
    }
}
