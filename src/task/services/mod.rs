//! Application services for task ordering.

mod lifecycle;
mod reorder;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use reorder::{MoveTaskRequest, TaskReorderError, TaskReorderResult, TaskReorderService};
