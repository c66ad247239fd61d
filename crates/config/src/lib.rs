//! File-based compression profiles.
//!
//! A [`Profile`] names a registered algorithm and the settings to construct it
//! with, so the choice of codec can live in a config file instead of code:
//!
//! ```toml
//! algorithm = "lzw"
//! lit_width = 7
//! endian = "big"
//! ```

pub mod error;
mod profile;

pub use crate::profile::{EndianSetting, LevelSetting, NamedLevel, Profile};
