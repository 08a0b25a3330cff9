//! Taskboard: kanban task reordering.
//!
//! This crate keeps a persisted total order of tasks per status column and
//! lets a client reorder them by drag and drop with optimistic updates and
//! rollback.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, transport)
//!
//! # Modules
//!
//! - [`task`]: Task store and position resolver (server side)
//! - [`board`]: Drag gestures, optimistic projection and move dispatch
//!   (client side)
//! - [`config`]: Shared tunables

pub mod board;
pub mod config;
pub mod task;
