pub mod accrual_scheduler;
pub mod clock;
pub mod notification_service;
pub mod price_client;

pub use accrual_scheduler::*;
pub use clock::*;
pub use notification_service::*;
pub use price_client::*;
