// Error types for repocache.
// Separates path, transport, disk and decode failures so callers can tell them apart.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure raised by a transport adapter.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response stream failed: {0}")]
    Stream(#[source] io::Error),

    #[error("{0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid repository identifier {repo:?}: {reason}")]
    InvalidRepository { repo: String, reason: &'static str },

    #[error("Cannot create cache path {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Transport error for {uri}: {source}")]
    Transport {
        uri: String,
        #[source]
        source: TransportError,
    },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad class of a [`CacheError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Path,
    Transport,
    Io,
    Decode,
    Config,
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::InvalidRepository { .. } | CacheError::Path { .. } => ErrorKind::Path,
            CacheError::Transport { .. } => ErrorKind::Transport,
            CacheError::Io { .. } => ErrorKind::Io,
            CacheError::Decode(_) => ErrorKind::Decode,
            CacheError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
