use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::models::RecordKey;

/// Errors produced while obtaining, indexing or ranking designee records.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Registry request failed: {0}")]
    Transport(#[from] ApiError),

    #[error("Malformed {origin} payload: {source}")]
    Decode {
        origin: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Registry response rejected: {0}")]
    Validation(String),

    #[error("Storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Origin zip code {0} not found")]
    OriginNotFound(String),

    #[error("Distance computation did not converge for designee {0}")]
    Convergence(RecordKey),
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
