//! Notice module - user-facing notifications raised by consumers

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral progress information
    Info,
    /// Something finished as hoped
    Success,
    /// Something failed
    Error,
}

/// A short message for the operator
///
/// Consumers emit notices through an injected [`crate::traits::Notifier`];
/// the core never raises them itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,
    /// Message text
    pub message: String,
}

impl Notice {
    /// Neutral notice
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// Success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// Error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}
