use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid partition range: start {start} is past end {end}")]
    InvalidRange { start: usize, end: usize },
}
