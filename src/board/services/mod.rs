//! Application services for the board client.

mod dispatcher;

pub use dispatcher::{DispatchError, DispatchOutcome, MoveDispatcher};
