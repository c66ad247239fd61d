//! Configured, caller-owned algorithm instances.

use crate::algorithm::Algorithm;
use crate::error::{ErrorKind, Result};
use crate::stream::{Decoder, Encoder, Endpoint};
use crate::tuning::{Tuning, TuningKind};
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read, Write};
use tracing::instrument;

/// A configured algorithm, ready to encode or decode.
///
/// Obtained from [`Registry::construct`](crate::Registry::construct). Each
/// instance is independent of the registered prototype and of every other
/// instance, so changing its settings never affects other callers.
pub struct Instance {
    name: String,
    algorithm: Box<dyn Algorithm>,
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Instance {
    pub(crate) fn new(name: &str, algorithm: Box<dyn Algorithm>) -> Self {
        Self { name: name.to_string(), algorithm }
    }

    /// Name the algorithm was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        self.algorithm.extension()
    }

    /// Whether this algorithm accepts settings of the given kind.
    pub fn supports(&self, kind: TuningKind) -> bool {
        self.algorithm.tunables().contains(&kind)
    }

    /// Apply a single setting.
    ///
    /// Fails with [`UnsupportedOption`](ErrorKind::UnsupportedOption) if the
    /// algorithm has no such tunable, or [`Config`](ErrorKind::Config) if the
    /// value is out of range. A failed setting leaves the previous value in
    /// place.
    pub fn apply(&mut self, tuning: Tuning) -> Result<()> {
        let option = tuning.kind();
        if !self.supports(option) {
            exn::bail!(ErrorKind::UnsupportedOption { algorithm: self.name.clone(), option });
        }
        self.algorithm.apply(tuning)?;
        tracing::trace!(algorithm = %self.name, ?tuning, "Applied tuning");
        Ok(())
    }

    /// Bind a compressing stream adapter to `sink`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Write;
    /// use squeeze_compress::Registry;
    ///
    /// let registry = Registry::with_defaults();
    /// let gzip = registry.construct("gzip", []).unwrap();
    ///
    /// let mut compressed = Vec::new();
    /// let mut encoder = gzip.encoder(&mut compressed).unwrap();
    /// encoder.write_all(b"Hello, ").unwrap();
    /// encoder.write_all(b"world!").unwrap();
    /// encoder.close().unwrap();
    ///
    /// assert_eq!(gzip.decode(&compressed).unwrap(), b"Hello, world!");
    /// ```
    pub fn encoder<'a, W: Write + 'a>(&self, sink: W) -> Result<Encoder<'a>> {
        let (sink, sink_failed) = Endpoint::new(sink);
        let inner = self.algorithm.encoder(Box::new(sink))?;
        Ok(Encoder::new(&self.name, inner, sink_failed))
    }

    /// Bind a decompressing stream adapter to `source`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::{Cursor, Read};
    /// use squeeze_compress::Registry;
    ///
    /// let registry = Registry::with_defaults();
    /// let zlib = registry.construct("zlib", []).unwrap();
    /// let compressed = zlib.encode(b"Hello, world!").unwrap();
    ///
    /// let mut decoder = zlib.decoder(Cursor::new(compressed)).unwrap();
    /// let mut decompressed = Vec::new();
    /// decoder.read_to_end(&mut decompressed).unwrap();
    /// decoder.close().unwrap();
    /// assert_eq!(decompressed, b"Hello, world!");
    /// ```
    pub fn decoder<'a, R: Read + 'a>(&self, source: R) -> Result<Decoder<'a>> {
        let (source, source_failed) = Endpoint::new(source);
        let inner = self.algorithm.decoder(Box::new(source))?;
        Ok(Decoder::new(&self.name, inner, source_failed))
    }

    /// Compress a byte slice in memory.
    ///
    /// Equivalent to writing `input` through [`encoder`](Self::encoder) into a
    /// buffer and closing it.
    #[instrument(skip(self, input), fields(algorithm = %self.name, input_size = input.len(), output_size))]
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut encoder = self.encoder(&mut output)?;
        encoder.write_all(input).map_err(|e| encoder.error(e))?;
        encoder.close()?;
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

    /// Decompress a byte slice in memory.
    ///
    /// Equivalent to reading [`decoder`](Self::decoder) to the end over
    /// `input` and closing it. Truncated or corrupt input is an error; partial
    /// output is never returned.
    #[instrument(skip(self, input), fields(algorithm = %self.name, input_size = input.len(), output_size))]
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut decoder = self.decoder(input)?;
        decoder.read_to_end(&mut output).map_err(|e| decoder.error(e))?;
        decoder.close()?;
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

    /// Compress everything from `reader` into `writer`, returning the number
    /// of uncompressed bytes consumed.
    ///
    /// Read failures on `reader` are passed through as
    /// [`Io`](ErrorKind::Io) errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use squeeze_compress::Registry;
    ///
    /// let registry = Registry::with_defaults();
    /// let bzip2 = registry.construct("bzip2", []).unwrap();
    ///
    /// let mut compressed = Vec::new();
    /// let bytes = bzip2.encode_stream(Cursor::new(b"Hello, world!"), &mut compressed).unwrap();
    /// assert_eq!(bytes, 13);
    ///
    /// let mut decompressed = Vec::new();
    /// bzip2.decode_stream(Cursor::new(compressed), &mut decompressed).unwrap();
    /// assert_eq!(decompressed, b"Hello, world!");
    /// ```
    pub fn encode_stream<R: Read, W: Write>(&self, mut reader: R, writer: W) -> Result<u64> {
        let mut encoder = self.encoder(writer)?;
        let bytes = copy(&mut reader, &mut encoder).map_err(|failed| match failed {
            CopyError::Read(e) => ErrorKind::io(e),
            CopyError::Write(e) => encoder.error(e),
        })?;
        encoder.close()?;
        Ok(bytes)
    }

    /// Decompress everything from `reader` into `writer`, returning the number
    /// of decompressed bytes written.
    pub fn decode_stream<R: Read, W: Write>(&self, reader: R, mut writer: W) -> Result<u64> {
        let mut decoder = self.decoder(reader)?;
        let bytes = copy(&mut decoder, &mut writer).map_err(|failed| match failed {
            CopyError::Read(e) => decoder.error(e),
            CopyError::Write(e) => ErrorKind::io(e),
        })?;
        decoder.close()?;
        writer.flush().map_err(ErrorKind::io)?;
        Ok(bytes)
    }
}

/// Which side of a [`copy`] failed.
enum CopyError {
    Read(IoError),
    Write(IoError),
}

/// Like [`std::io::copy`], but reports which side failed so each can be
/// classified on its own terms.
fn copy<R, W>(reader: &mut R, writer: &mut W) -> std::result::Result<u64, CopyError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; 8 * 1024];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };
        writer.write_all(&buf[..n]).map_err(CopyError::Write)?;
        total += n as u64;
    }
}
