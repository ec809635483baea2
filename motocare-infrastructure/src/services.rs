pub mod advisory_service;
pub mod health_service;
pub mod remote_feed;

pub use advisory_service::*;
pub use health_service::*;
pub use remote_feed::*;
