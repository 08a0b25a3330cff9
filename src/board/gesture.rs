//! Reduction of pointer and keyboard input to drag lifecycle events.
//!
//! The controller does not decide where a task ends up; it only reports
//! which target the user is offering it to. Hosts translate their toolkit's
//! hit testing into [`DropTarget`] values.

use super::domain::{DragEvent, DropTarget};
use super::projection::len_without;
use crate::config::{ReorderConfig, ReorderConfigError};
use crate::task::domain::{Board, TaskId, TaskStatus};

/// Pointer coordinates in host pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance, saturating at `u64::MAX` for points at opposite
    /// corners of the coordinate space.
    fn distance_squared(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        (dx * dx).saturating_add(dy * dy)
    }
}

/// Keyboard commands for reordering without a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Pick up the focused task.
    Pick(TaskId),
    /// Move one slot up the column.
    Up,
    /// Move one slot down the column.
    Down,
    /// Move to the column on the left.
    Left,
    /// Move to the column on the right.
    Right,
    /// Drop the task at the current slot.
    Drop,
    /// Put the task back where it was.
    Cancel,
}

/// A slot in a column, counted without the dragged task.
type Slot = (TaskStatus, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GestureState {
    Idle,
    Pressed {
        task_id: TaskId,
        origin: Point,
    },
    Dragging {
        task_id: TaskId,
        last_target: Option<DropTarget>,
    },
    Keyboard {
        task_id: TaskId,
        origin: Slot,
        slot: Slot,
    },
}

/// Turns raw input into `Start`/`Over`/`End` drag events.
///
/// A press becomes a drag only after the pointer travels at least the
/// configured threshold, so plain clicks never start a drag. `Over` is only
/// emitted when the effective target changes.
#[derive(Debug, Clone)]
pub struct DragGestureController {
    threshold: u32,
    state: GestureState,
}

impl DragGestureController {
    /// Creates a controller with the given travel threshold in pixels.
    ///
    /// A zero threshold is raised to one pixel so a press without movement
    /// stays a click.
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            state: GestureState::Idle,
        }
    }

    /// Creates a controller using the configured drag threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderConfigError`] when `config` fails validation.
    pub const fn from_config(config: &ReorderConfig) -> Result<Self, ReorderConfigError> {
        if let Err(err) = config.validate() {
            return Err(err);
        }
        Ok(Self::new(config.drag_threshold))
    }

    /// Returns the task currently being dragged, if any.
    #[must_use]
    pub const fn dragging(&self) -> Option<TaskId> {
        match self.state {
            GestureState::Dragging { task_id, .. } | GestureState::Keyboard { task_id, .. } => {
                Some(task_id)
            }
            GestureState::Idle | GestureState::Pressed { .. } => None,
        }
    }

    /// Records a press on a task card.
    ///
    /// Ignored while another interaction is active.
    pub fn pointer_down(&mut self, task_id: TaskId, at: Point) {
        if self.state == GestureState::Idle {
            self.state = GestureState::Pressed {
                task_id,
                origin: at,
            };
        }
    }

    /// Records pointer movement over `hovered`.
    ///
    /// Returns `Start` once the travel threshold is crossed, followed by
    /// `Over` whenever the hovered target differs from the last one
    /// reported. Leaving every target is remembered silently, so coming
    /// back to the same target reports it again.
    pub fn pointer_move(&mut self, at: Point, hovered: Option<DropTarget>) -> Vec<DragEvent> {
        let mut events = Vec::new();
        if let GestureState::Pressed { task_id, origin } = self.state {
            let threshold = u64::from(self.threshold);
            if origin.distance_squared(at) < threshold * threshold {
                return events;
            }
            self.state = GestureState::Dragging {
                task_id,
                last_target: None,
            };
            events.push(DragEvent::Start { task_id });
        }

        if let GestureState::Dragging {
            task_id,
            last_target,
        } = self.state
            && last_target != hovered
        {
            self.state = GestureState::Dragging {
                task_id,
                last_target: hovered,
            };
            if let Some(target) = hovered {
                events.push(DragEvent::Over { task_id, target });
            }
        }
        events
    }

    /// Records the pointer release over `hovered`.
    ///
    /// A release before the threshold was crossed is a click and yields no
    /// event. Releasing outside any target, or on the dragged card itself,
    /// ends the drag with no target.
    pub fn pointer_up(&mut self, hovered: Option<DropTarget>) -> Option<DragEvent> {
        let state = std::mem::replace(&mut self.state, GestureState::Idle);
        match state {
            GestureState::Dragging { task_id, .. } => Some(DragEvent::End {
                task_id,
                target: hovered.filter(|target| *target != DropTarget::Task(task_id)),
            }),
            GestureState::Keyboard { .. } => {
                self.state = state;
                None
            }
            GestureState::Idle | GestureState::Pressed { .. } => None,
        }
    }

    /// Abandons the current interaction.
    pub fn cancel(&mut self) -> Option<DragEvent> {
        match std::mem::replace(&mut self.state, GestureState::Idle) {
            GestureState::Dragging { task_id, .. } | GestureState::Keyboard { task_id, .. } => {
                Some(DragEvent::End {
                    task_id,
                    target: None,
                })
            }
            GestureState::Idle | GestureState::Pressed { .. } => None,
        }
    }

    /// Applies a keyboard command against the displayed board.
    ///
    /// Keyboard moves produce the same events as pointer drags, with
    /// [`DropTarget::Slot`] targets.
    pub fn key(&mut self, command: KeyCommand, board: &Board) -> Option<DragEvent> {
        match (self.state, command) {
            (GestureState::Idle, KeyCommand::Pick(task_id)) => {
                let origin = board.locate(task_id)?;
                self.state = GestureState::Keyboard {
                    task_id,
                    origin,
                    slot: origin,
                };
                Some(DragEvent::Start { task_id })
            }
            (
                GestureState::Keyboard {
                    task_id,
                    origin,
                    slot,
                },
                KeyCommand::Up | KeyCommand::Down | KeyCommand::Left | KeyCommand::Right,
            ) => {
                let next = step(board, task_id, slot, command);
                if next == slot {
                    return None;
                }
                self.state = GestureState::Keyboard {
                    task_id,
                    origin,
                    slot: next,
                };
                Some(DragEvent::Over {
                    task_id,
                    target: slot_target(next),
                })
            }
            (
                GestureState::Keyboard {
                    task_id,
                    origin,
                    slot,
                },
                KeyCommand::Drop,
            ) => {
                self.state = GestureState::Idle;
                Some(DragEvent::End {
                    task_id,
                    target: (slot != origin).then(|| slot_target(slot)),
                })
            }
            (GestureState::Keyboard { .. }, KeyCommand::Cancel) => self.cancel(),
            _ => None,
        }
    }
}

fn step(board: &Board, task_id: TaskId, (status, index): Slot, command: KeyCommand) -> Slot {
    let clamp = |column: TaskStatus| (column, index.min(len_without(board, column, task_id)));
    match command {
        KeyCommand::Up => (status, index.saturating_sub(1)),
        KeyCommand::Down => (status, (index + 1).min(len_without(board, status, task_id))),
        KeyCommand::Left => status.previous().map_or((status, index), clamp),
        KeyCommand::Right => status.next().map_or((status, index), clamp),
        KeyCommand::Pick(_) | KeyCommand::Drop | KeyCommand::Cancel => (status, index),
    }
}

const fn slot_target((status, index): Slot) -> DropTarget {
    DropTarget::Slot { status, index }
}
