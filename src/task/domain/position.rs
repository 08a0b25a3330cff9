//! Ordering keys and placement planning within a status column.
//!
//! Keys are sparse integers. Appends and renumbering passes leave a fixed
//! spacing between neighbours so most moves can take the midpoint of the
//! gap they land in. When the gap is exhausted, or the column is found out
//! of order, the whole column is renumbered in its new order.

use super::{TaskDomainError, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest spacing that leaves room for a midpoint between neighbours.
pub const MIN_POSITION_SPACING: i64 = 2;

/// Orderable key placing a task within its `(project, status)` partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(i64);

impl Position {
    /// Creates a position from a raw key.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw key.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the key `spacing` past this one, or `None` on overflow.
    #[must_use]
    pub const fn after(self, spacing: i64) -> Option<Self> {
        match self.0.checked_add(spacing) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Returns a key strictly between `lower` and `upper`.
    ///
    /// A missing `lower` is treated as zero, so keys stay positive. A
    /// missing `upper` appends `spacing` past `lower`. Returns `None` when
    /// no integer fits between the bounds, or when a non-positive
    /// `spacing` would not move past `lower`.
    #[must_use]
    pub fn between(lower: Option<Self>, upper: Option<Self>, spacing: i64) -> Option<Self> {
        let Some(high) = upper else {
            if spacing < 1 {
                return None;
            }
            return lower.unwrap_or(Self(0)).after(spacing);
        };
        let floor = lower.map_or(0, Self::value);
        let gap = high.0.checked_sub(floor)?;
        if gap < 2 {
            return None;
        }
        Some(Self(floor + (gap >> 1)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns `true` when the keys are strictly ascending.
#[must_use]
pub fn is_strictly_ascending(keys: &[Position]) -> bool {
    keys.is_sorted_by(|a, b| a < b)
}

/// Returns `true` when `key` already sits at `target_index` of `column`.
///
/// `column` holds the other members of the column, sorted by key. A task
/// whose key lies strictly between the neighbours of the target slot needs
/// no write.
#[must_use]
pub fn fits_at(key: Position, column: &[(TaskId, Position)], target_index: usize) -> bool {
    let index = target_index.min(column.len());
    let above_lower = index
        .checked_sub(1)
        .and_then(|before| column.get(before))
        .is_none_or(|&(_, lower)| lower < key);
    let below_upper = column.get(index).is_none_or(|&(_, upper)| key < upper);
    above_lower && below_upper
}

/// Keys to persist for one placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPlan {
    position: Position,
    renumbered: Vec<(TaskId, Position)>,
}

impl PlacementPlan {
    /// Returns the key assigned to the placed task.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns sibling keys rewritten by a renumbering pass.
    ///
    /// Siblings whose key happens to be unchanged are omitted.
    #[must_use]
    pub fn renumbered(&self) -> &[(TaskId, Position)] {
        &self.renumbered
    }

    /// Returns `true` when the plan renumbers the column.
    #[must_use]
    pub const fn is_renumbering(&self) -> bool {
        !self.renumbered.is_empty()
    }
}

const fn check_spacing(spacing: i64) -> Result<(), TaskDomainError> {
    if spacing < MIN_POSITION_SPACING {
        return Err(TaskDomainError::InvalidSpacing(spacing));
    }
    Ok(())
}

/// Plans the key for a task appended after `last`, the current greatest
/// key of a column holding `len` tasks.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidSpacing`] for a spacing below
/// [`MIN_POSITION_SPACING`], or [`TaskDomainError::PositionSpaceExhausted`]
/// when the key would overflow.
pub fn plan_append(
    status: TaskStatus,
    last: Option<Position>,
    len: usize,
    spacing: i64,
) -> Result<Position, TaskDomainError> {
    check_spacing(spacing)?;
    Position::between(last, None, spacing).ok_or(TaskDomainError::PositionSpaceExhausted {
        status,
        len: len.saturating_add(1),
    })
}

/// Plans the key for a task inserted at `target_index` of a column.
///
/// `column` holds the other members of the target column, sorted by key,
/// and must not contain `moved`. An index past the end appends.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidSpacing`] for a spacing below
/// [`MIN_POSITION_SPACING`], or [`TaskDomainError::PositionSpaceExhausted`]
/// when a renumbering pass cannot fit the column into the key space.
pub fn plan_placement(
    status: TaskStatus,
    column: &[(TaskId, Position)],
    target_index: usize,
    spacing: i64,
) -> Result<PlacementPlan, TaskDomainError> {
    check_spacing(spacing)?;
    let index = target_index.min(column.len());
    let ordered = column.is_sorted_by(|a, b| a.1 < b.1);

    if ordered {
        let lower = index
            .checked_sub(1)
            .and_then(|before| column.get(before))
            .map(|&(_, key)| key);
        let upper = column.get(index).map(|&(_, key)| key);
        if let Some(position) = Position::between(lower, upper, spacing) {
            return Ok(PlacementPlan {
                position,
                renumbered: Vec::new(),
            });
        }
    }

    renumber(status, column, index, spacing)
}

fn renumber(
    status: TaskStatus,
    column: &[(TaskId, Position)],
    index: usize,
    spacing: i64,
) -> Result<PlacementPlan, TaskDomainError> {
    let len = column.len() + 1;
    let key_for = |slot: usize| {
        i64::try_from(slot)
            .ok()
            .and_then(|raw| raw.checked_add(1))
            .and_then(|ordinal| ordinal.checked_mul(spacing))
            .map(Position)
            .ok_or(TaskDomainError::PositionSpaceExhausted { status, len })
    };

    let position = key_for(index)?;
    let mut renumbered = Vec::with_capacity(column.len());
    for (offset, &(id, current)) in column.iter().enumerate() {
        let slot = if offset < index { offset } else { offset + 1 };
        let key = key_for(slot)?;
        if key != current {
            renumbered.push((id, key));
        }
    }

    Ok(PlacementPlan {
        position,
        renumbered,
    })
}
