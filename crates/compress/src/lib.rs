//! Runtime-selectable compression behind a single registry.
//!
//! Algorithms are registered under a name in a [`Registry`]. Callers ask the
//! registry for an [`Instance`] by name, optionally tuning it with typed
//! options ([`with_level`], [`with_lit_width`], [`with_endian`]), and then
//! either:
//!
//! - compress and decompress whole buffers ([`Instance::encode`],
//!   [`Instance::decode`]),
//! - stream through an [`Encoder`] or [`Decoder`] adapter, or
//! - pump a reader into a writer ([`Instance::encode_stream`],
//!   [`Instance::decode_stream`]).
//!
//! Gzip, zlib, LZW, bzip2 and an uncompressed passthrough are always
//! available through [`Registry::with_defaults`]. Xz and Zstandard are behind
//! the `xz` and `zstd` feature flags.
//!
//! ```
//! use squeeze_compress::{Level, Registry, with_level};
//!
//! let registry = Registry::with_defaults();
//! let gzip = registry.construct("gzip", [with_level(Level::Best)])?;
//! let compressed = gzip.encode(b"Hello, world!")?;
//! assert_eq!(gzip.decode(&compressed)?, b"Hello, world!");
//! # Ok::<(), squeeze_compress::Error>(())
//! ```

mod algorithm;
pub mod codecs;
pub mod error;
mod instance;
mod registry;
mod stream;
mod tuning;

pub use crate::algorithm::{Algorithm, Finish};
pub use crate::error::{Error, Result};
pub use crate::instance::Instance;
pub use crate::registry::{Prototype, Registry};
pub use crate::stream::{Decoder, Encoder};
pub use crate::tuning::{Endian, Level, Tuning, TuningKind, with_endian, with_level, with_lit_width};
