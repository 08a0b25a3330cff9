//! Server-side task ordering.
//!
//! Tasks are totally ordered within each `(project, status)` partition by a
//! sparse integer key. The position resolver in [`services`] is the only
//! path that changes a stored task's status or key, and it does so as one
//! atomic repository operation. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
