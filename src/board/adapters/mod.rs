//! Adapter implementations of the board ports.

pub mod local;
pub mod notifier;

pub use local::LocalMoveGateway;
pub use notifier::{RecordingNotifier, TracingNotifier};
