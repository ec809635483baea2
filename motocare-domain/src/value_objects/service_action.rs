// Service action value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceAction {
    Change,
    Clean,
    Check,
    Flush,
}

impl ServiceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceAction::Change => "Change",
            ServiceAction::Clean => "Clean",
            ServiceAction::Check => "Check",
            ServiceAction::Flush => "Flush",
        }
    }
}
