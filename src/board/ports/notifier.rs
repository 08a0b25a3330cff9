//! Notification surface of the host application.

use crate::board::domain::Notice;

/// Receives user-facing notices; the host decides how to render them.
pub trait Notifier: Send + Sync {
    /// Delivers one notice.
    fn notify(&self, notice: Notice);
}
