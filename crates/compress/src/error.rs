//! Compression Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. I/O errors raised by a sink or
//! source stay in the tree as the child of the [`ErrorKind`] frame, so the
//! original error is never swallowed.

use crate::tuning::TuningKind;
use derive_more::{Display, Error};
use std::io::{Error as IoError, ErrorKind as IoErrorKind};

/// A compression error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for compression operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No algorithm is registered under the requested name.
    #[display("algorithm not registered: {_0}")]
    Unregistered(#[error(not(source))] String),
    /// The algorithm has no such tunable. Don't retry with the same option.
    #[display("{algorithm} does not support the {option} option")]
    UnsupportedOption { algorithm: String, option: TuningKind },
    /// A supported tunable was given a value the codec rejects, or the codec
    /// refused to initialize with the current configuration.
    #[display("invalid configuration: {_0}")]
    Config(#[error(not(source))] String),
    /// Data is corrupt, truncated or otherwise malformed. Don't retry with the
    /// same input.
    #[display("invalid or corrupted data: {_0}")]
    Format(#[error(not(source))] String),
    /// The sink or source failed.
    #[display("I/O error: {_0}")]
    Io(#[error(not(source))] IoErrorKind),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Io(_))
    }

    /// Attach a codec I/O error to the error tree, classifying it as either
    /// malformed data or a genuine I/O failure.
    ///
    /// Codec crates report bad input through `std::io::Error` kinds, so
    /// `InvalidData`, `InvalidInput` and `UnexpectedEof` are treated as
    /// [`Format`](Self::Format) errors; every other kind is passed through as
    /// [`Io`](Self::Io).
    #[track_caller]
    pub fn codec(err: IoError) -> Error {
        let kind = match err.kind() {
            IoErrorKind::InvalidData | IoErrorKind::InvalidInput | IoErrorKind::UnexpectedEof => {
                ErrorKind::Format(err.to_string())
            },
            other => ErrorKind::Io(other),
        };
        exn::Exn::from(err).raise(kind)
    }

    /// Attach an I/O error from a caller-supplied reader or writer to the
    /// error tree as-is.
    #[track_caller]
    pub fn io(err: IoError) -> Error {
        let kind = ErrorKind::Io(err.kind());
        exn::Exn::from(err).raise(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exn::ResultExt;
    use rstest::rstest;

    #[test]
    fn error_kind_display() {
        assert_eq!(
            ErrorKind::Unregistered("lz4".to_string()).to_string(),
            "algorithm not registered: lz4"
        );
        assert_eq!(
            ErrorKind::UnsupportedOption { algorithm: "gzip".to_string(), option: TuningKind::LitWidth }.to_string(),
            "gzip does not support the lit_width option"
        );
        assert_eq!(
            ErrorKind::Format("truncated".to_string()).to_string(),
            "invalid or corrupted data: truncated"
        );
        assert_eq!(ErrorKind::Io(IoErrorKind::BrokenPipe).to_string(), "I/O error: broken pipe");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(!ErrorKind::Format("bad header".to_string()).is_retryable());
        assert!(!ErrorKind::Unregistered("zstd".to_string()).is_retryable());
        assert!(!ErrorKind::Config("level".to_string()).is_retryable());
        assert!(ErrorKind::Io(IoErrorKind::Interrupted).is_retryable());
    }

    #[rstest]
    #[case(IoErrorKind::InvalidData, true)]
    #[case(IoErrorKind::InvalidInput, true)]
    #[case(IoErrorKind::UnexpectedEof, true)]
    #[case(IoErrorKind::PermissionDenied, false)]
    #[case(IoErrorKind::BrokenPipe, false)]
    fn codec_error_classification(#[case] kind: IoErrorKind, #[case] is_format: bool) {
        let err = ErrorKind::codec(IoError::new(kind, "boom"));
        assert_eq!(matches!(*err, ErrorKind::Format(_)), is_format);
        if !is_format {
            assert_eq!(*err, ErrorKind::Io(kind));
        }
    }

    #[test]
    fn error_from_result() {
        let result: std::result::Result<(), IoError> = Err(IoError::new(IoErrorKind::NotFound, "file not found"));

        let err: Result<()> = result.or_raise(|| ErrorKind::Io(IoErrorKind::NotFound));
        assert!(err.is_err());

        let exn = err.unwrap_err();
        // Exn<E> implements Deref<Target = E>
        assert_eq!(*exn, ErrorKind::Io(IoErrorKind::NotFound));
    }
}
