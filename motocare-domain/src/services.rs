// Pure domain services

pub mod advice;
pub mod attention;
pub mod catalog;
pub mod health_evaluator;
pub mod service_recorder;
pub mod state_reducer;
pub mod status_classifier;

pub use advice::*;
pub use attention::*;
pub use catalog::*;
pub use health_evaluator::*;
pub use service_recorder::*;
pub use state_reducer::*;
pub use status_classifier::*;
