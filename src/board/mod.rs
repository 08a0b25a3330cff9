//! Client-side kanban reordering.
//!
//! A host UI feeds raw pointer or keyboard input to the
//! [`gesture::DragGestureController`], which reduces it to `Start`, `Over`
//! and `End` drag events. The [`services::MoveDispatcher`] turns those
//! events into a speculative view of the board built by [`projection`],
//! sends the move through the [`ports::MoveGateway`] and then either
//! adopts refreshed authoritative data or rolls the view back.
//!
//! At most one move is in flight per dispatcher.

pub mod adapters;
pub mod domain;
pub mod gesture;
pub mod ports;
pub mod projection;
pub mod services;

#[cfg(test)]
mod tests;
