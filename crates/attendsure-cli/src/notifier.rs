//! Console implementation of the operator notification channel.

use crate::output::Formatter;
use attendsure_domain::traits::Notifier;
use attendsure_domain::{Notice, NoticeKind};

/// Prints notices to stderr so stdout stays machine-readable.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    formatter: Formatter,
    quiet: bool,
}

impl ConsoleNotifier {
    /// Create a notifier that styles notices with `formatter`.
    pub fn new(formatter: Formatter) -> Self {
        Self {
            formatter,
            quiet: false,
        }
    }

    /// Suppress everything except errors.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Render a notice, or `None` when it is suppressed.
    pub fn render(&self, notice: &Notice) -> Option<String> {
        match notice.kind {
            NoticeKind::Error => Some(self.formatter.error(&notice.message)),
            _ if self.quiet => None,
            NoticeKind::Success => Some(self.formatter.success(&notice.message)),
            NoticeKind::Info => Some(self.formatter.info(&notice.message)),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        if let Some(line) = self.render(&notice) {
            eprintln!("{}", line);
        }
    }
}
