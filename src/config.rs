//! Tunables for task ordering and drag handling.

use crate::task::domain::MIN_POSITION_SPACING;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration shared by the position resolver and the board client.
///
/// Deserializes with defaults for missing fields, so hosts can embed it in
/// their own configuration files.
///
/// # Examples
///
/// ```
/// use taskboard::config::ReorderConfig;
///
/// let config = ReorderConfig::default();
/// assert_eq!(config.position_spacing, 1024);
///
/// let dense = ReorderConfig::dense();
/// assert_eq!(dense.position_spacing, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Gap between neighbouring keys on append and after renumbering.
    pub position_spacing: i64,
    /// How long the dispatcher waits for a move before rolling back.
    pub move_timeout_ms: u64,
    /// Pointer travel, in pixels, before a press becomes a drag.
    pub drag_threshold: u32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            position_spacing: 1024,
            move_timeout_ms: 10_000,
            drag_threshold: 5,
        }
    }
}

/// Error returned when a configuration value is out of range.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReorderConfigError {
    /// Spacing leaves no room for a midpoint key.
    #[error("position spacing must be at least 2, got {0}")]
    SpacingTooSmall(i64),
    /// A zero threshold turns every click into a drag.
    #[error("drag threshold must be positive")]
    ZeroDragThreshold,
    /// A zero timeout fails every move before the server can answer.
    #[error("move timeout must be positive")]
    ZeroMoveTimeout,
}

impl ReorderConfig {
    /// Creates a configuration with the smallest usable spacing.
    ///
    /// Every second insertion into the same gap triggers a renumbering
    /// pass, which is useful for exercising that path.
    #[must_use]
    pub fn dense() -> Self {
        Self {
            position_spacing: 2,
            ..Default::default()
        }
    }

    /// Returns the move timeout as a [`Duration`].
    #[must_use]
    pub const fn move_timeout(&self) -> Duration {
        Duration::from_millis(self.move_timeout_ms)
    }

    /// Checks that values are within usable ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderConfigError`] for a spacing below
    /// [`MIN_POSITION_SPACING`], a zero drag threshold or a zero move
    /// timeout.
    pub const fn validate(&self) -> Result<(), ReorderConfigError> {
        if self.position_spacing < MIN_POSITION_SPACING {
            return Err(ReorderConfigError::SpacingTooSmall(self.position_spacing));
        }
        if self.drag_threshold == 0 {
            return Err(ReorderConfigError::ZeroDragThreshold);
        }
        if self.move_timeout_ms == 0 {
            return Err(ReorderConfigError::ZeroMoveTimeout);
        }
        Ok(())
    }
}
