//! Error types for age-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgeError {
    #[error("Invalid datetime: {0}")]
    Parse(String),

    #[error("Invalid datetime pair: {0}")]
    InvalidPair(String),

    #[error("Invalid month/day: {0}")]
    InvalidMonthDay(String),
}

pub type Result<T> = std::result::Result<T, AgeError>;
