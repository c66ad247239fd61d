//! Zstandard, backed by `zstd`.

use super::level::Levels;
use crate::algorithm::{Algorithm, Finish};
use crate::error::{ErrorKind, Result};
use crate::tuning::{Tuning, TuningKind};
use exn::ResultExt;
use std::io::{Read, Write};
use zstd::stream::read::Decoder as ZstdDecoder;
use zstd::stream::write::Encoder as ZstdEncoder;

const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

fn levels() -> Levels {
    let range = zstd::compression_level_range();
    Levels {
        name: "zstd",
        default: zstd::DEFAULT_COMPRESSION_LEVEL,
        fastest: 1,
        best: *range.end(),
        range,
    }
}

/// Zstandard. Tunable: level, across the range the linked libzstd accepts.
#[derive(Clone, Copy, Debug)]
pub struct Zstd {
    level: i32,
}

impl Default for Zstd {
    fn default() -> Self {
        Self { level: zstd::DEFAULT_COMPRESSION_LEVEL }
    }
}

impl Algorithm for Zstd {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".zst"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::Level]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        let Tuning::Level(level) = tuning else {
            exn::bail!(ErrorKind::Config("zstd only accepts a level".to_string()));
        };
        self.level = levels().resolve(level)?;
        Ok(())
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        let encoder = ZstdEncoder::new(sink, self.level)
            .or_raise(|| ErrorKind::Config(format!("zstd rejected level {}", self.level)))?;
        Ok(Box::new(ZstdWriter(encoder)))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        let decoder =
            ZstdDecoder::new(source).or_raise(|| ErrorKind::Config("could not create zstd decoder".to_string()))?;
        Ok(Box::new(decoder))
    }

    fn matches_header(&self, head: &[u8]) -> bool {
        head.starts_with(&ZSTD_MAGIC)
    }
}

/// `zstd`'s encoder carries a dictionary lifetime, which `finish_writer!` cannot express.
struct ZstdWriter<'a>(ZstdEncoder<'static, Box<dyn Write + 'a>>);

impl Write for ZstdWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

impl Finish for ZstdWriter<'_> {
    fn finish(self: Box<Self>) -> std::io::Result<()> {
        let mut sink = self.0.finish()?;
        sink.flush()
    }
}
