//! Notifier adapters.

use crate::board::domain::{Notice, Severity};
use crate::board::ports::Notifier;
use std::sync::{Mutex, PoisonError};
use tracing::{error, warn};

/// Forwards notices to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Warning => warn!(notice = %notice.message, "user notice"),
            Severity::Error => error!(notice = %notice.message, "user notice"),
        }
    }
}

/// Keeps every notice in memory for inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notices delivered so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
