//! Crate-level error type.

use crate::config::ConfigError;
use crate::storage::StorageError;
use thiserror::Error;

/// Anything fallible in an editing session: configuration and storage.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
