//! Error types for poller operations

use thiserror::Error;

/// Errors that can occur while configuring or running a poll session
///
/// Fetch failures are not errors here: a session retries them.
#[derive(Error, Debug)]
pub enum PollerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (session task panicked or was aborted)
    #[error("Worker error: {0}")]
    Worker(String),
}
