// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod player_store;
pub mod queries;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::AppError;
pub use metrics::Metrics;
pub use player_store::PlayerStore;
pub use state::AppState;
