// Domain value objects
pub mod health_level;
pub mod identifiers;
pub mod maintenance_category;
pub mod service_action;
pub mod tie_break;

pub use health_level::*;
pub use identifiers::*;
pub use maintenance_category::*;
pub use service_action::*;
pub use tie_break::*;
