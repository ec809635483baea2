pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use middleware::*;
pub use routes::*;

#[cfg(test)]
pub(crate) mod test_support;
