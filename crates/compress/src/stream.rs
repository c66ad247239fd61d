//! Stream adapters binding an [`Instance`](crate::Instance) to a sink or a
//! source.

use crate::algorithm::Finish;
use crate::error::{Error, ErrorKind, Result};
use std::cell::Cell;
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read, Write};
use std::rc::Rc;

/// The caller's sink or source, as handed to a codec.
///
/// Codecs pass I/O errors from their sink or source straight through, so the
/// error alone cannot tell a failing endpoint from malformed data. The shared
/// flag records that the endpoint itself failed.
pub(crate) struct Endpoint<T> {
    inner: T,
    failed: Rc<Cell<bool>>,
}

impl<T> Endpoint<T> {
    pub(crate) fn new(inner: T) -> (Self, Rc<Cell<bool>>) {
        let failed = Rc::new(Cell::new(false));
        (Self { inner, failed: Rc::clone(&failed) }, failed)
    }

    fn record<U>(&self, result: std::io::Result<U>) -> std::io::Result<U> {
        if let Err(e) = &result
            && e.kind() != IoErrorKind::Interrupted
        {
            self.failed.set(true);
        }
        result
    }
}

impl<W: Write> Write for Endpoint<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let result = self.inner.write(buf);
        self.record(result)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let result = self.inner.flush();
        self.record(result)
    }
}

impl<R: Read> Read for Endpoint<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let result = self.inner.read(buf);
        self.record(result)
    }
}

/// Failures of the endpoint are [`Io`](ErrorKind::Io); anything else came from
/// the codec.
#[track_caller]
fn classify(endpoint_failed: &Cell<bool>, err: IoError) -> Error {
    if endpoint_failed.get() { ErrorKind::io(err) } else { ErrorKind::codec(err) }
}

/// A compressing [`Write`]r.
///
/// Data may be written in any number of calls. The compressed output is only
/// complete once [`close`](Self::close) has returned successfully; dropping the
/// encoder instead leaves the sink holding a truncated stream. After a failed
/// write the encoder is in an undefined state and must be discarded.
pub struct Encoder<'a> {
    algorithm: String,
    inner: Box<dyn Finish + 'a>,
    sink_failed: Rc<Cell<bool>>,
    written: u64,
}

impl<'a> Encoder<'a> {
    pub(crate) fn new(algorithm: &str, inner: Box<dyn Finish + 'a>, sink_failed: Rc<Cell<bool>>) -> Self {
        Self { algorithm: algorithm.to_string(), inner, sink_failed, written: 0 }
    }

    /// Classify an error returned by [`write`](Write::write) or
    /// [`flush`](Write::flush).
    #[track_caller]
    pub(crate) fn error(&self, err: IoError) -> Error {
        classify(&self.sink_failed, err)
    }

    /// Registered name of the algorithm this encoder was created from.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Number of uncompressed bytes accepted so far.
    pub fn bytes_in(&self) -> u64 {
        self.written
    }

    /// Finalize the stream: flush pending blocks, write trailers, and flush
    /// the sink.
    pub fn close(self) -> Result<()> {
        tracing::trace!(algorithm = %self.algorithm, bytes_in = self.written, "Closing encoder");
        let sink_failed = self.sink_failed;
        self.inner.finish().map_err(|e| classify(&sink_failed, e))
    }
}

impl Write for Encoder<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// A decompressing [`Read`]er.
///
/// Reads yield decompressed data incrementally. Malformed input surfaces as an
/// `InvalidData`, `InvalidInput` or `UnexpectedEof` I/O error from
/// [`read`](Read::read), and as a [`Format`](ErrorKind::Format) error from
/// [`close`](Self::close), which checks that the stream ran to its proper end.
/// A failure of the source itself is reported as [`Io`](ErrorKind::Io).
pub struct Decoder<'a> {
    algorithm: String,
    inner: Box<dyn Read + 'a>,
    source_failed: Rc<Cell<bool>>,
    read: u64,
    ended: bool,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(algorithm: &str, inner: Box<dyn Read + 'a>, source_failed: Rc<Cell<bool>>) -> Self {
        Self { algorithm: algorithm.to_string(), inner, source_failed, read: 0, ended: false }
    }

    /// Classify an error returned by [`read`](Read::read).
    #[track_caller]
    pub(crate) fn error(&self, err: IoError) -> Error {
        classify(&self.source_failed, err)
    }

    /// Registered name of the algorithm this decoder was created from.
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Number of decompressed bytes produced so far.
    pub fn bytes_out(&self) -> u64 {
        self.read
    }

    /// Validate the remainder of the stream and release the source.
    ///
    /// Any decompressed data the caller has not read yet is discarded, but the
    /// compressed input is still decoded to the end so that truncation and
    /// checksum mismatches are reported instead of silently ignored.
    pub fn close(mut self) -> Result<()> {
        if !self.ended {
            let discarded = std::io::copy(&mut self.inner, &mut std::io::sink()).map_err(|e| self.error(e))?;
            if discarded > 0 {
                tracing::debug!(algorithm = %self.algorithm, discarded, "Decoder closed before reading all data");
            }
        }
        Ok(())
    }
}

impl Read for Decoder<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.ended = true;
        }
        self.read += n as u64;
        Ok(n)
    }
}
