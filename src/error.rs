use std::result;
use thiserror::Error as ThisError;

pub type Result<T> = result::Result<T, Error>;

/// Crate error type. All components here are pure assembly/forwarding logic, so
/// the taxonomy is small: contract violations surface as `InvalidArgument`,
/// everything else as `General`.
#[derive(Debug, ThisError)]
pub enum Error {
    /// An argument violated the contract of the operation it was passed to.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// General error.
    #[error("General error: {0}")]
    General(String),
}
