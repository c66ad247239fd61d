//! Tunable algorithm settings.
//!
//! Not every algorithm exposes every knob: the deflate family cares about a
//! compression [`Level`], LZW about its literal code width and bit order.
//! Settings are plain values; whether an algorithm accepts one is decided by
//! its [`tunables()`](crate::Algorithm::tunables) when the setting is applied.

use derive_more::Display;

/// Compression level.
///
/// Each algorithm maps these onto its own native range; a
/// [`Precise`](Self::Precise) value outside that range is rejected with a
/// [`Config`](crate::error::ErrorKind::Config) error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Level {
    /// The codec's own default.
    #[default]
    Default,
    /// Fastest level the codec offers.
    Fastest,
    /// Smallest output the codec offers.
    Best,
    /// Entropy coding only, no string matching.
    HuffmanOnly,
    /// A codec-specific numeric level.
    Precise(i32),
}

impl Level {
    /// No compression (stored blocks) for codecs that support it.
    pub const NONE: Level = Level::Precise(0);
}

/// Accepts the conventional integer constants: `-1` for the default level,
/// `-2` for Huffman-only, anything else as a precise level.
impl From<i32> for Level {
    fn from(value: i32) -> Self {
        match value {
            -1 => Level::Default,
            -2 => Level::HuffmanOnly,
            n => Level::Precise(n),
        }
    }
}

/// Order in which codes are packed into bytes.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum Endian {
    /// Least significant bit first (GIF).
    #[default]
    #[display("little")]
    Little,
    /// Most significant bit first (TIFF, PDF).
    #[display("big")]
    Big,
}

/// The kind of a [`Tuning`], used for capability checks and error reporting.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum TuningKind {
    #[display("level")]
    Level,
    #[display("lit_width")]
    LitWidth,
    #[display("endian")]
    Endian,
}

/// A single setting to apply to an algorithm instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tuning {
    /// Compression level. Supported by gzip, zlib, bzip2, xz and zstd.
    Level(Level),
    /// Number of bits used for literal codes. Supported by lzw.
    LitWidth(u8),
    /// Bit packing order. Supported by lzw.
    Endian(Endian),
}

impl Tuning {
    #[must_use]
    pub fn kind(&self) -> TuningKind {
        match self {
            Tuning::Level(_) => TuningKind::Level,
            Tuning::LitWidth(_) => TuningKind::LitWidth,
            Tuning::Endian(_) => TuningKind::Endian,
        }
    }
}

/// Set the compression level.
#[must_use]
pub fn with_level(level: impl Into<Level>) -> Tuning {
    Tuning::Level(level.into())
}

/// Set the number of bits to use for literal codes.
#[must_use]
pub fn with_lit_width(width: u8) -> Tuning {
    Tuning::LitWidth(width)
}

/// Set the bit packing order.
#[must_use]
pub fn with_endian(endian: Endian) -> Tuning {
    Tuning::Endian(endian)
}
