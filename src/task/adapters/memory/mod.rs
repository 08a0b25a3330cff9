//! In-memory adapters for task ordering.

mod task;

pub use task::InMemoryTaskRepository;
