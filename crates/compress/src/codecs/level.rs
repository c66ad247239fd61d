use crate::error::{ErrorKind, Result};
use crate::tuning::Level;
use std::ops::RangeInclusive;

/// Native level table for a codec.
pub(crate) struct Levels {
    pub(crate) name: &'static str,
    pub(crate) default: i32,
    pub(crate) fastest: i32,
    pub(crate) best: i32,
    pub(crate) range: RangeInclusive<i32>,
}

impl Levels {
    /// Map a [`Level`] onto this codec's native scale.
    pub(crate) fn resolve(&self, level: Level) -> Result<i32> {
        match level {
            Level::Default => Ok(self.default),
            Level::Fastest => Ok(self.fastest),
            Level::Best => Ok(self.best),
            Level::HuffmanOnly => {
                exn::bail!(ErrorKind::Config(format!("{} does not support huffman-only encoding", self.name)))
            },
            Level::Precise(n) if self.range.contains(&n) => Ok(n),
            Level::Precise(n) => exn::bail!(ErrorKind::Config(format!(
                "{} level {n} is outside {}..={}",
                self.name,
                self.range.start(),
                self.range.end()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const LEVELS: Levels = Levels { name: "test", default: 6, fastest: 1, best: 9, range: 0..=9 };

    #[rstest]
    #[case(Level::Default, 6)]
    #[case(Level::Fastest, 1)]
    #[case(Level::Best, 9)]
    #[case(Level::NONE, 0)]
    #[case(Level::Precise(9), 9)]
    fn test_resolve(#[case] level: Level, #[case] expected: i32) {
        assert_eq!(LEVELS.resolve(level).unwrap(), expected);
    }

    #[rstest]
    #[case(Level::HuffmanOnly)]
    #[case(Level::Precise(10))]
    #[case(Level::Precise(-1))]
    fn test_resolve_rejected(#[case] level: Level) {
        let err = LEVELS.resolve(level).unwrap_err();
        assert!(matches!(*err, ErrorKind::Config(_)));
    }
}
