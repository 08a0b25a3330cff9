//! Port contracts between the board client and its host.

pub mod gateway;
pub mod notifier;

pub use gateway::{BoardFeed, MoveGateway, MoveGatewayError, MoveGatewayResult};
pub use notifier::Notifier;
