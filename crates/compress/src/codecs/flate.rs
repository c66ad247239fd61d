//! Gzip and zlib, both backed by `flate2`.

use super::level::Levels;
use crate::algorithm::{Algorithm, Finish};
use crate::error::{ErrorKind, Result};
use crate::tuning::{Tuning, TuningKind};
use flate2::Compression as FlateLevel;
use flate2::read::{MultiGzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use std::io::{Read, Write};

const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
const GZIP_LEVELS: Levels = Levels { name: "gzip", default: 6, fastest: 1, best: 9, range: 0..=9 };
const ZLIB_LEVELS: Levels = Levels { name: "zlib", default: 6, fastest: 1, best: 9, range: 0..=9 };

finish_writer!(GzEncoder);
finish_writer!(ZlibEncoder);

fn apply_level(levels: &Levels, level: &mut u32, tuning: Tuning) -> Result<()> {
    let Tuning::Level(requested) = tuning else {
        exn::bail!(ErrorKind::Config(format!("{} only accepts a level", levels.name)));
    };
    // Every value in the range is non-negative.
    *level = levels.resolve(requested)?.unsigned_abs();
    Ok(())
}

/// Gzip (RFC 1952). Tunable: level 0..=9.
#[derive(Clone, Copy, Debug)]
pub struct Gzip {
    level: u32,
}

impl Default for Gzip {
    fn default() -> Self {
        Self { level: GZIP_LEVELS.default.unsigned_abs() }
    }
}

impl Algorithm for Gzip {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".gz"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::Level]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        apply_level(&GZIP_LEVELS, &mut self.level, tuning)
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(GzEncoder::new(sink, FlateLevel::new(self.level))))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        // The header is parsed (and rejected) on the first read. A file may
        // hold several members, which decode back to back.
        Ok(Box::new(MultiGzDecoder::new(source)))
    }

    fn matches_header(&self, head: &[u8]) -> bool {
        head.starts_with(&GZIP_MAGIC)
    }
}

/// Zlib (RFC 1950). Tunable: level 0..=9.
#[derive(Clone, Copy, Debug)]
pub struct Zlib {
    level: u32,
}

impl Default for Zlib {
    fn default() -> Self {
        Self { level: ZLIB_LEVELS.default.unsigned_abs() }
    }
}

impl Algorithm for Zlib {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".zz"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::Level]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        apply_level(&ZLIB_LEVELS, &mut self.level, tuning)
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(ZlibEncoder::new(sink, FlateLevel::new(self.level))))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        Ok(Box::new(ZlibDecoder::new(source)))
    }

    fn matches_header(&self, head: &[u8]) -> bool {
        // CM = 8 (deflate), CINFO <= 7, and the header checksum holds.
        match head {
            [cmf, flg, ..] => cmf & 0x0F == 8 && cmf >> 4 <= 7 && u16::from_be_bytes([*cmf, *flg]) % 31 == 0,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::tuning::{Level, with_level};
    use crate::Registry;
    use rstest::rstest;

    fn text() -> Vec<u8> {
        b"It was the best of times, it was the worst of times. ".repeat(200)
    }

    #[rstest]
    #[case("gzip")]
    #[case("zlib")]
    fn test_every_level_round_trips(#[case] name: &str) {
        let registry = Registry::with_defaults();
        let original = text();
        for level in 0..=9 {
            let instance = registry.construct(name, [with_level(level)]).unwrap();
            let compressed = instance.encode(&original).unwrap();
            assert_eq!(instance.decode(&compressed).unwrap(), original, "{name} level {level}");
        }
    }

    #[rstest]
    #[case("gzip")]
    #[case("zlib")]
    fn test_best_beats_stored(#[case] name: &str) {
        let registry = Registry::with_defaults();
        let original = text();
        let stored = registry.construct(name, [with_level(Level::NONE)]).unwrap().encode(&original).unwrap();
        let best = registry.construct(name, [with_level(Level::Best)]).unwrap().encode(&original).unwrap();
        assert!(stored.len() > original.len());
        assert!(best.len() < stored.len());
    }

    #[rstest]
    #[case("gzip", Level::Precise(10))]
    #[case("gzip", Level::Precise(-3))]
    #[case("gzip", Level::HuffmanOnly)]
    #[case("zlib", Level::Precise(11))]
    #[case("zlib", Level::HuffmanOnly)]
    fn test_rejected_levels(#[case] name: &str, #[case] level: Level) {
        let err = Registry::with_defaults().construct(name, [with_level(level)]).unwrap_err();
        assert!(matches!(*err, ErrorKind::Config(_)), "{err:?}");
    }

    #[rstest]
    #[case("gzip")]
    #[case("zlib")]
    fn test_invalid_compressed_data(#[case] name: &str) {
        let instance = Registry::with_defaults().construct(name, []).unwrap();
        let err = instance.decode(b"This is not compressed data").unwrap_err();
        assert!(matches!(*err, ErrorKind::Format(_)), "{err:?}");
    }

    #[test]
    fn test_gzip_and_zlib_are_not_interchangeable() {
        let registry = Registry::with_defaults();
        let gzip = registry.construct("gzip", []).unwrap();
        let zlib = registry.construct("zlib", []).unwrap();
        let compressed = gzip.encode(b"Hello, world!").unwrap();
        assert!(zlib.decode(&compressed).is_err());
        let compressed = zlib.encode(b"Hello, world!").unwrap();
        assert!(gzip.decode(&compressed).is_err());
    }
}
