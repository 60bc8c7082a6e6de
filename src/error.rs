use std::path::PathBuf;

use thiserror::Error;

use crate::models::ModelError;

/// Failures while persisting a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("record ids exhausted")]
    IdsExhausted,

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }
}

/// Top-level error for the service layer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("could not determine data directory")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, Error>;
