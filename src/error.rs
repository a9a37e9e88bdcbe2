//! Errors raised by the shell side: reading log files and exporting rows.
//! Log content itself never produces an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open {path}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to map {path}")]
    MapFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize chart rows")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no report has been generated yet")]
    NoReport,
}

pub type Result<T> = std::result::Result<T, Error>;
