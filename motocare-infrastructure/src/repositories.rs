pub mod catalog_files;
pub mod json_state_repository;

pub use catalog_files::*;
pub use json_state_repository::*;
