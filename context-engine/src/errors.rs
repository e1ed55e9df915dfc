use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The file named by the hunk data no longer exists on disk (deleted or
    /// renamed after the diff was taken). Callers skip such files.
    #[error("source file not found: {0}")]
    SourceUnavailable(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
