//! The contract every registered algorithm implements.

use crate::error::{ErrorKind, Result};
use crate::tuning::{Tuning, TuningKind};
use std::io::{Read, Write};

/// A [`Write`]r that must be explicitly finalized.
///
/// Compressed formats write trailers (checksums, end codes, final blocks) when
/// the stream ends. Dropping a `Finish` without calling
/// [`finish`](Self::finish) leaves the output incomplete.
pub trait Finish: Write {
    /// Write any trailing state and flush the underlying sink.
    fn finish(self: Box<Self>) -> std::io::Result<()>;
}

/// A compression algorithm that can be registered in a
/// [`Registry`](crate::Registry).
///
/// The registered value acts as a prototype: callers never use it directly but
/// receive fresh copies from [`new_instance`](Self::new_instance), which they
/// are then free to configure. Implementations only need to provide the codec
/// wiring; capability checks, one-shot transforms and error classification are
/// handled by [`Instance`](crate::Instance).
///
/// # Examples
///
/// An algorithm that stores its input unchanged:
///
/// ```
/// use squeeze_compress::{Algorithm, Finish, Registry, Result};
/// use std::io::{Read, Write};
///
/// struct Verbatim<W>(W);
/// impl<W: Write> Write for Verbatim<W> {
///     fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> { self.0.write(buf) }
///     fn flush(&mut self) -> std::io::Result<()> { self.0.flush() }
/// }
/// impl<W: Write> Finish for Verbatim<W> {
///     fn finish(mut self: Box<Self>) -> std::io::Result<()> { self.0.flush() }
/// }
///
/// struct Stored;
/// impl Algorithm for Stored {
///     fn new_instance(&self) -> Box<dyn Algorithm> { Box::new(Stored) }
///     fn extension(&self) -> &'static str { ".stored" }
///     fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
///         Ok(Box::new(Verbatim(sink)))
///     }
///     fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
///         Ok(source)
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register("stored", Stored);
/// let stored = registry.construct("stored", []).unwrap();
/// assert_eq!(stored.encode(b"data").unwrap(), b"data");
/// ```
pub trait Algorithm: Send + Sync {
    /// A new, default-configured instance. Never mutates the receiver.
    fn new_instance(&self) -> Box<dyn Algorithm>;

    /// File extension (including the leading dot) for this format.
    fn extension(&self) -> &'static str;

    /// Settings this algorithm accepts through [`apply`](Self::apply).
    fn tunables(&self) -> &'static [TuningKind] {
        &[]
    }

    /// Apply a setting whose kind is listed in [`tunables`](Self::tunables).
    ///
    /// Values the codec cannot honour are rejected with
    /// [`ErrorKind::Config`].
    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        exn::bail!(ErrorKind::Config(format!("{} cannot be applied to this algorithm", tuning.kind())))
    }

    /// Bind a compressing writer to `sink`.
    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>>;

    /// Bind a decompressing reader to `source`.
    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>>;

    /// Whether `head` starts with this format's magic bytes.
    fn matches_header(&self, _head: &[u8]) -> bool {
        false
    }
}
