//! AttendSure CLI - launch and track appointment confirmation calls.

use attendsure_cli::commands;
use attendsure_cli::config::OutputFormat;
use attendsure_cli::{Cli, Command, Config, ConsoleNotifier, Formatter};
use attendsure_sdk::AttendSureClient;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> attendsure_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load config (defaults when the file does not exist)
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    // Determine output format and color setting
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let notifier = Arc::new(
        ConsoleNotifier::new(formatter.clone()).quiet(format == OutputFormat::Quiet),
    );

    match cli.command {
        Command::Extract(args) => {
            commands::execute_extract(args, &formatter)?;
        }
        cmd => {
            // Commands that talk to the backend
            let client = AttendSureClient::with_timeout(&config.api_base, config.request_timeout())?;

            match cmd {
                Command::Launch(args) => {
                    commands::execute_launch(args, &client, &config, &formatter, notifier).await?;
                }
                Command::Watch(args) => {
                    commands::execute_watch(args, client, &config, &formatter, notifier).await?;
                }
                Command::Show(args) => {
                    commands::execute_show(args, &client, &formatter).await?;
                }
                Command::Extract(_) => unreachable!(),
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
