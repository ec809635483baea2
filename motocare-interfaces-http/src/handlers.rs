pub mod account_handlers;
pub mod feed_handlers;
pub mod ops_handlers;

pub use account_handlers::*;
pub use feed_handlers::*;
pub use ops_handlers::*;
