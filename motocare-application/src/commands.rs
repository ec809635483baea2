pub mod account_commands;
pub mod odometer_commands;
pub mod service_commands;
pub mod sync_commands;
mod transition;
