//! Value types exchanged between the gesture controller, the projection
//! and the dispatcher.

mod event;
mod notice;
mod pending;

pub use event::{DragEvent, DropTarget};
pub use notice::{Notice, Severity};
pub use pending::PendingMove;
