//! Error types for layout, measurement and the benchmark driver

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the layout pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// The token store already holds `capacity` tokens
    #[error("token store is full (capacity {capacity})")]
    StoreFull { capacity: usize },

    #[error("input text is not valid UTF-8")]
    InvalidUtf8,

    #[error("no usable font found (tried {tried} locations)")]
    FontNotFound { tried: usize },

    #[error("font error: {0}")]
    Font(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
