//! Error types for the htb client.

use thiserror::Error;

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Network failure, timeout, or a body that was not JSON.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered but did not mark the call successful. The payload is
    /// the full response body rendered as `key: value` lines, one per field.
    #[error("api rejected request:\n{0}")]
    Rejected(String),

    /// A local precondition failed before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
