//! AttendSure Poller
//!
//! Tracks outreach calls from submission until they reach a terminal status.
//!
//! # Overview
//!
//! Call progress is not pushed to the client; it has to be fetched. The poller
//! runs one background session per call:
//!
//! - **Immediate first fetch**: the first status request goes out when the
//!   session starts, later ones follow a fixed interval
//! - **Snapshot delivery**: every successful fetch is normalized (including the
//!   extracted [`CallOutcome`](attendsure_domain::CallOutcome)) and handed to the
//!   consumer in order
//! - **Retry forever**: failed fetches are logged and retried on the next tick
//! - **Cancellation**: the consumer can stop a session at any time; nothing is
//!   delivered afterwards
//!
//! # Session Lifecycle
//!
//! | State | Entered when | Further fetches |
//! |-------|--------------|-----------------|
//! | **Active** | Session starts | Yes, every interval |
//! | **Terminal** | A snapshot with status `completed` or `failed` is delivered | No |
//! | **Cancelled** | [`PollHandle::cancel`] is called | No |
//! | **Exhausted** | `max_attempts` or `max_duration_secs` is reached | No |
//!
//! # Usage
//!
//! ```no_run
//! use attendsure_domain::CallId;
//! use attendsure_poller::{CallStatusPoller, PollerConfig, PollState};
//! use attendsure_sdk::AttendSureClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AttendSureClient::new("http://localhost:8000")?;
//!     let poller = CallStatusPoller::new(client, PollerConfig::aggressive())?;
//!
//!     let handle = poller.start(CallId::new(7), |snapshot| {
//!         if let Some(outcome) = &snapshot.outcome {
//!             println!("call success: {}", outcome.success_label());
//!         }
//!     });
//!
//!     // Stop early on Ctrl+C
//!     tokio::signal::ctrl_c().await?;
//!     handle.cancel();
//!     assert_eq!(handle.state(), PollState::Cancelled);
//!
//!     let report = handle.join().await?;
//!     println!("{}", report.metrics.summary());
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The poller can be configured via TOML:
//!
//! ```toml
//! [poller]
//! interval_ms = 5000
//! max_attempts = 720
//! max_duration_secs = 3600
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod metrics;
mod poller;
mod session;

pub use config::PollerConfig;
pub use error::PollerError;
pub use metrics::PollMetrics;
pub use poller::CallStatusPoller;
pub use session::{PollHandle, PollReport, PollState};
