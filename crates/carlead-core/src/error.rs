use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid status: {0}")]
    InvalidStatus(String),
    #[error("invalid interaction type: {0}")]
    InvalidInteractionKind(String),
    #[error("invalid date bucket: {0}")]
    InvalidDateBucket(String),
    #[error("invalid date preset: {0}")]
    InvalidDatePreset(String),
}
