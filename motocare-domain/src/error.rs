use thiserror::Error;

use crate::value_objects::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("maintenance item '{0}' not found")]
    NotFound(ItemId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("duplicate maintenance item id '{0}'")]
    DuplicateItem(ItemId),
}
