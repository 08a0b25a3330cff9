//! User-facing failure signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How prominently the host should show a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The request was refused; nothing is broken.
    Warning,
    /// The request failed and may be retried.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A message for the host application's notification surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Text shown to the user.
    pub message: String,
    /// Display severity.
    pub severity: Severity,
}

impl Notice {
    /// Creates a notice.
    #[must_use]
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}
