//! Config Error Types
//!
//! Structured errors using `exn`. Failures from the compress crate keep their
//! own error tree as a child frame.

use derive_more::{Display, Error};
use squeeze_compress::error::{Error as CompressionError, ErrorKind as CompressionErrorKind};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The profile could not be read or does not have the expected shape.
    #[display("could not load profile: {_0}")]
    Load(#[error(not(source))] String),
    /// The profile was read but the compress crate rejected it.
    #[display("compression error: {_0}")]
    Compression(CompressionErrorKind),
}

impl ErrorKind {
    /// Convert a compression error into a config error, preserving the
    /// compress crate's `Exn` frame as a child in this error tree.
    #[track_caller]
    pub fn compression(err: CompressionError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Compression(inner))
    }
}
