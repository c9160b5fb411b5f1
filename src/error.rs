use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A chapter file that is skipped while building the book index.
#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("front matter not found")]
    MissingFrontMatter,

    #[error("invalid front matter: {0}")]
    InvalidFrontMatter(#[from] serde_yaml::Error),

    #[error("front matter has no `id`")]
    MissingId,
}

/// A single markdown image that cannot be turned into an alt entry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("`Alt text` image has no path: ![Alt text]({0})")]
    MissingPath(String),

    #[error("`Alt text` image has no quoted caption: ![Alt text]({0})")]
    MissingCaption(String),
}

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to list {}", path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid book index {}", path.display())]
    InvalidIndex {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize book index")]
    SerializeIndex(#[source] serde_json::Error),

    #[error("invalid asset manifest {}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("course `{0}` has no entry in the book index")]
    UnknownBook(String),

    #[error("invalid glob pattern")]
    Pattern(#[from] glob::PatternError),
}

pub type SyncResult<T> = std::result::Result<T, SyncError>;
