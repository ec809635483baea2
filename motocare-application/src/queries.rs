pub mod advice_queries;
pub mod state_queries;
