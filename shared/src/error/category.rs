//! Error domains derived from the code ranges

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    User,
    Order,
    Item,
    /// 9xxx and anything above; logged at error level when returned
    System,
}

impl ErrorCategory {
    /// Unassigned thousands fall back to `General`
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            1 => Self::User,
            4 => Self::Order,
            6 => Self::Item,
            n if n >= 9 => Self::System,
            _ => Self::General,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
