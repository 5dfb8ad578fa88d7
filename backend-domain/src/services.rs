// Pure domain services
pub mod accrual;
pub mod notification_gate;
pub mod price_aggregator;
pub mod progression;

pub use accrual::*;
pub use notification_gate::*;
pub use price_aggregator::*;
pub use progression::*;
