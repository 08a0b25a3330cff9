//! Domain model for task ordering.
//!
//! Tasks live in `(project, status)` partitions and carry a sparse ordering
//! key. The domain owns key arithmetic and placement planning; persistence
//! and transport stay outside this boundary.

mod board;
mod error;
mod ids;
mod move_intent;
mod position;
mod status;
mod task;

pub use board::Board;
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{ProjectId, TaskId};
pub use move_intent::MoveIntent;
pub use position::{
    MIN_POSITION_SPACING, PlacementPlan, Position, fits_at, is_strictly_ascending, plan_append,
    plan_placement,
};
pub use status::TaskStatus;
pub use task::{Partition, PersistedTaskData, Task, TaskTitle};
