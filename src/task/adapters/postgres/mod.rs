//! `PostgreSQL` adapters for task ordering persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool};
