//! Variable-width LZW, backed by `weezl`.
//!
//! Codes grow from `lit_width + 1` bits up to 12 bits. The stream starts with a
//! clear code and always ends with an end-of-information code, which is how a
//! decoder tells a complete stream from a truncated one.

use super::pull::{Inflate, PullDecoder, Step};
use crate::algorithm::{Algorithm, Finish};
use crate::error::{ErrorKind, Result};
use crate::tuning::{Endian, Tuning, TuningKind};
use std::io::{Error as IoError, ErrorKind as IoErrorKind, Read, Write};
use std::ops::RangeInclusive;
use weezl::{BitOrder, LzwStatus, decode::Decoder as LzwDecoder, encode::Encoder as LzwEncoder};

const LIT_WIDTHS: RangeInclusive<u8> = 2..=8;
const OUTPUT_BUFFER_SIZE: usize = 8 * 1024;

/// LZW. Tunables: literal width 2..=8 (default 8), bit order (default little).
#[derive(Clone, Copy, Debug)]
pub struct Lzw {
    lit_width: u8,
    endian: Endian,
}

impl Default for Lzw {
    fn default() -> Self {
        Self { lit_width: 8, endian: Endian::Little }
    }
}

impl Lzw {
    fn bit_order(&self) -> BitOrder {
        match self.endian {
            Endian::Little => BitOrder::Lsb,
            Endian::Big => BitOrder::Msb,
        }
    }
}

impl Algorithm for Lzw {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".lzw"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::LitWidth, TuningKind::Endian]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        match tuning {
            Tuning::LitWidth(width) if LIT_WIDTHS.contains(&width) => self.lit_width = width,
            Tuning::LitWidth(width) => exn::bail!(ErrorKind::Config(format!(
                "lzw literal width {width} is outside {}..={}",
                LIT_WIDTHS.start(),
                LIT_WIDTHS.end()
            ))),
            Tuning::Endian(endian) => self.endian = endian,
            Tuning::Level(_) => exn::bail!(ErrorKind::Config("lzw has no compression level".to_string())),
        }
        Ok(())
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(LzwWriter {
            sink,
            encoder: LzwEncoder::new(self.bit_order(), self.lit_width),
            limit: 1u16 << self.lit_width,
            buffer: vec![0u8; OUTPUT_BUFFER_SIZE].into_boxed_slice(),
        }))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        Ok(Box::new(PullDecoder::new(source, LzwDecoder::new(self.bit_order(), self.lit_width))))
    }
}

/// Push-side adapter over `weezl`'s buffer-to-buffer encoder.
struct LzwWriter<W> {
    sink: W,
    encoder: LzwEncoder,
    /// Literals must be below this value.
    limit: u16,
    buffer: Box<[u8]>,
}

impl<W: Write> Write for LzwWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Some(byte) = buf.iter().find(|&&b| u16::from(b) >= self.limit) {
            return Err(IoError::new(
                IoErrorKind::InvalidInput,
                format!("byte {byte:#04x} does not fit in the configured literal width"),
            ));
        }
        let mut input = buf;
        while !input.is_empty() {
            let result = self.encoder.encode_bytes(input, &mut self.buffer);
            self.sink.write_all(&self.buffer[..result.consumed_out])?;
            input = &input[result.consumed_in..];
            result.status.map_err(|e| IoError::new(IoErrorKind::InvalidInput, e))?;
            if result.consumed_in == 0 && result.consumed_out == 0 {
                return Err(IoError::new(IoErrorKind::WriteZero, "lzw encoder made no progress"));
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }
}

impl<W: Write> Finish for LzwWriter<W> {
    fn finish(mut self: Box<Self>) -> std::io::Result<()> {
        self.encoder.finish();
        loop {
            let result = self.encoder.encode_bytes(&[], &mut self.buffer);
            self.sink.write_all(&self.buffer[..result.consumed_out])?;
            match result.status.map_err(|e| IoError::new(IoErrorKind::InvalidInput, e))? {
                LzwStatus::Done => break,
                _ if result.consumed_out == 0 => {
                    return Err(IoError::new(IoErrorKind::WriteZero, "lzw encoder did not reach the end code"));
                },
                _ => continue,
            }
        }
        self.sink.flush()
    }
}

impl Inflate for LzwDecoder {
    fn step(&mut self, input: &[u8], output: &mut [u8], _at_eof: bool) -> std::io::Result<Step> {
        let result = self.decode_bytes(input, output);
        let status = result.status.map_err(|e| IoError::new(IoErrorKind::InvalidData, e))?;
        Ok(Step {
            consumed: result.consumed_in,
            produced: result.consumed_out,
            finished: matches!(status, LzwStatus::Done),
        })
    }
}
