//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use attendsure_domain::CallId;
use attendsure_extractor::snapshot;
use attendsure_sdk::AttendSureClient;

/// Execute the show command.
pub async fn execute_show(
    args: ShowArgs,
    client: &AttendSureClient,
    formatter: &Formatter,
) -> Result<()> {
    let detail = client.get_call_detail(CallId::new(args.call_id)).await?;
    println!("{}", formatter.format_snapshot(&snapshot(detail))?);
    Ok(())
}
