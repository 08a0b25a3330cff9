//! Unit tests for the task ordering context.
