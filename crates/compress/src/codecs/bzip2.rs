//! Bzip2, backed by the `bzip2` crate.

use super::level::Levels;
use crate::algorithm::{Algorithm, Finish};
use crate::error::{ErrorKind, Result};
use crate::tuning::{Tuning, TuningKind};
use bzip2::Compression as BzCompression;
use bzip2::read::MultiBzDecoder;
use bzip2::write::BzEncoder;
use std::io::{Read, Write};

const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
const BZIP2_LEVELS: Levels = Levels { name: "bzip2", default: 6, fastest: 1, best: 9, range: 1..=9 };

finish_writer!(BzEncoder);

/// Bzip2. Tunable: level (block size) 1..=9.
#[derive(Clone, Copy, Debug)]
pub struct Bzip2 {
    level: u32,
}

impl Default for Bzip2 {
    fn default() -> Self {
        Self { level: BZIP2_LEVELS.default.unsigned_abs() }
    }
}

impl Algorithm for Bzip2 {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".bz2"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::Level]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        let Tuning::Level(level) = tuning else {
            exn::bail!(ErrorKind::Config("bzip2 only accepts a level".to_string()));
        };
        self.level = BZIP2_LEVELS.resolve(level)?.unsigned_abs();
        Ok(())
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(BzEncoder::new(sink, BzCompression::new(self.level))))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        // Concatenated streams are valid bzip2 and decode as one.
        Ok(Box::new(MultiBzDecoder::new(source)))
    }

    fn matches_header(&self, head: &[u8]) -> bool {
        head.starts_with(&BZIP2_MAGIC) && head.get(3).is_some_and(|block| (b'1'..=b'9').contains(block))
    }
}
