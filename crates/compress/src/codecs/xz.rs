//! Xz (LZMA2), backed by `xz2`.

use super::level::Levels;
use crate::algorithm::{Algorithm, Finish};
use crate::error::{ErrorKind, Result};
use crate::tuning::{Tuning, TuningKind};
use std::io::{Read, Write};
use xz2::read::XzDecoder;
use xz2::write::XzEncoder;

const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const XZ_LEVELS: Levels = Levels { name: "xz", default: 6, fastest: 0, best: 9, range: 0..=9 };

finish_writer!(XzEncoder);

/// Xz. Tunable: preset level 0..=9.
#[derive(Clone, Copy, Debug)]
pub struct Xz {
    level: u32,
}

impl Default for Xz {
    fn default() -> Self {
        Self { level: XZ_LEVELS.default.unsigned_abs() }
    }
}

impl Algorithm for Xz {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Self::default())
    }

    fn extension(&self) -> &'static str {
        ".xz"
    }

    fn tunables(&self) -> &'static [TuningKind] {
        &[TuningKind::Level]
    }

    fn apply(&mut self, tuning: Tuning) -> Result<()> {
        let Tuning::Level(level) = tuning else {
            exn::bail!(ErrorKind::Config("xz only accepts a level".to_string()));
        };
        self.level = XZ_LEVELS.resolve(level)?.unsigned_abs();
        Ok(())
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(XzEncoder::new(sink, self.level)))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        Ok(Box::new(XzDecoder::new(source)))
    }

    fn matches_header(&self, head: &[u8]) -> bool {
        head.starts_with(&XZ_MAGIC)
    }
}

#[cfg(test)]
mod tests {
    use crate::Registry;
    use crate::error::ErrorKind;
    use crate::tuning::{Level, with_level};
    use rstest::rstest;

    #[rstest]
    #[case(Level::Fastest)]
    #[case(Level::Best)]
    fn test_levels(#[case] level: Level) {
        let xz = Registry::with_defaults().construct("xz", [with_level(level)]).unwrap();
        let original = b"Hello, world! This is a test of some compression.";
        assert_eq!(xz.decode(&xz.encode(original).unwrap()).unwrap(), original);
    }

    #[test]
    fn test_rejected_level() {
        let err = Registry::with_defaults().construct("xz", [with_level(10)]).unwrap_err();
        assert!(matches!(*err, ErrorKind::Config(_)), "{err:?}");
    }
}
