//! [`Read`] adapter for codecs that only expose a buffer-to-buffer API.

use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read};

const INPUT_BUFFER_SIZE: usize = 32 * 1024;

/// Outcome of a single [`Inflate::step`].
pub(crate) struct Step {
    pub(crate) consumed: usize,
    pub(crate) produced: usize,
    /// The end of the compressed stream has been reached.
    pub(crate) finished: bool,
}

/// One decompression step over borrowed buffers.
pub(crate) trait Inflate {
    fn step(&mut self, input: &[u8], output: &mut [u8], at_eof: bool) -> std::io::Result<Step>;
}

/// Pulls compressed bytes from `source` through an [`Inflate`].
///
/// Unlike a plain `read` loop that stops when the source runs dry, this reader
/// only reports a clean end of data once the codec has seen the end of its
/// stream; running out of input before that is an `UnexpectedEof` error.
pub(crate) struct PullDecoder<R, I> {
    source: R,
    codec: I,
    buffer: Box<[u8]>,
    pos: usize,
    len: usize,
    exhausted: bool,
    finished: bool,
}

impl<R: Read, I: Inflate> PullDecoder<R, I> {
    pub(crate) fn new(source: R, codec: I) -> Self {
        Self {
            source,
            codec,
            buffer: vec![0u8; INPUT_BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            len: 0,
            exhausted: false,
            finished: false,
        }
    }

    fn fill(&mut self) -> std::io::Result<()> {
        loop {
            match self.source.read(&mut self.buffer) {
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    self.exhausted = n == 0;
                    return Ok(());
                },
                Err(e) if e.kind() == IoErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read, I: Inflate> Read for PullDecoder<R, I> {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        if self.finished || out.is_empty() {
            return Ok(0);
        }
        loop {
            if self.pos == self.len && !self.exhausted {
                self.fill()?;
            }
            let step = self.codec.step(&self.buffer[self.pos..self.len], out, self.exhausted)?;
            self.pos += step.consumed;
            if step.finished {
                self.finished = true;
                return Ok(step.produced);
            }
            if step.produced > 0 {
                return Ok(step.produced);
            }
            if self.exhausted {
                return Err(IoError::new(IoErrorKind::UnexpectedEof, "compressed stream ended unexpectedly"));
            }
            if step.consumed == 0 && self.pos < self.len {
                return Err(IoError::new(IoErrorKind::InvalidData, "decoder made no progress"));
            }
        }
    }
}
