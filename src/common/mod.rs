pub mod constants;

use std::fmt;

/// Crate-wide error type for the ambient (non-buffer-pool) surface: config
/// loading and anything else that can fail outside the in-band `Option`/`bool`
/// contracts used by the buffer pool itself (see `storage::buffer`).
#[derive(Debug)]
pub enum Error {
    /// A configuration value was missing or malformed.
    Config(String),
    /// Wraps an underlying I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "configuration error: {msg}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
