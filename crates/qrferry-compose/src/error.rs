use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("no images to save")]
    EmptyInput,

    #[error("cannot write {path}: {source}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image encoding failed for {path}: {reason}")]
    Image { path: PathBuf, reason: String },
}

pub type ComposeResult<T> = Result<T, ComposeError>;
