pub mod focus_handlers;
pub mod notification_handlers;
pub mod ops_handlers;
pub mod player_handlers;
pub mod price_handlers;
