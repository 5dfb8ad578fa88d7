pub mod accrual_commands;
pub mod notification_commands;
pub mod player_commands;
