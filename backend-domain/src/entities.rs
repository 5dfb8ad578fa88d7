// Domain entities
pub mod config;
pub mod notification;
pub mod player;
pub mod price;
pub mod progression;

pub use config::*;
pub use notification::*;
pub use player::*;
pub use price::*;
pub use progression::*;
