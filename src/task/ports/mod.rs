//! Port contracts for task ordering.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;

pub use repository::{
    Relocation, RelocationOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
