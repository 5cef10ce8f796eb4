//! AttendSure Rust SDK
//!
//! Async client for the AttendSure backend's call endpoints.
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | Launch calls | `POST /api/calls/launch` |
//! | Call detail | `GET /api/calls/{id}` |
//!
//! [`AttendSureClient`] implements the domain's
//! [`CallStatusSource`](attendsure_domain::traits::CallStatusSource) and
//! [`CallLauncher`](attendsure_domain::traits::CallLauncher), so it plugs
//! straight into the poller.
//!
//! # Example
//!
//! ```no_run
//! use attendsure_domain::LaunchRequest;
//! use attendsure_sdk::AttendSureClient;
//!
//! # async fn run() -> Result<(), attendsure_sdk::SdkError> {
//! let client = AttendSureClient::new("http://localhost:8000")?;
//!
//! let launched = client.launch_calls(&LaunchRequest::now(vec![12, 15])).await?;
//! for call_id in launched.call_ids {
//!     let detail = client.get_call_detail(call_id).await?;
//!     println!("call {} is {}", call_id, detail.call.status);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{AttendSureClient, DEFAULT_TIMEOUT};
pub use error::SdkError;
