pub mod notification_queries;
pub mod player_queries;
pub mod price_queries;
