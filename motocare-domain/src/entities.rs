// Domain entities

pub mod health_status;
pub mod maintenance_item;
pub mod maintenance_registry;
pub mod motorbike_state;
pub mod runtime_config;
pub mod service_log;
pub mod snapshot;

pub use health_status::*;
pub use maintenance_item::*;
pub use maintenance_registry::*;
pub use motorbike_state::*;
pub use runtime_config::*;
pub use service_log::*;
pub use snapshot::*;
