//! Built-in algorithms.
//!
//! Every codec here is a thin binding between the [`Algorithm`](crate::Algorithm) trait and an
//! existing compression crate; none of them implement a compression format
//! themselves.

/// Adapts a codec writer whose own `finish` hands back the sink.
macro_rules! finish_writer {
    ($encoder:ident) => {
        impl<W: std::io::Write> $crate::algorithm::Finish for $encoder<W> {
            fn finish(self: Box<Self>) -> std::io::Result<()> {
                let mut sink = (*self).finish()?;
                sink.flush()
            }
        }
    };
}

mod bzip2;
mod flate;
mod level;
mod lzw;
mod none;
mod pull;
#[cfg(feature = "xz")]
mod xz;
#[cfg(feature = "zstd")]
mod zstd;

pub use self::bzip2::Bzip2;
pub use self::flate::{Gzip, Zlib};
pub use self::lzw::Lzw;
pub use self::none::Passthrough;
#[cfg(feature = "xz")]
pub use self::xz::Xz;
#[cfg(feature = "zstd")]
pub use self::zstd::Zstd;
use crate::Registry;

pub(crate) fn register_defaults(registry: &Registry) {
    registry.register("none", Passthrough);
    registry.register("gzip", Gzip::default());
    registry.register("zlib", Zlib::default());
    registry.register("lzw", Lzw::default());
    registry.register("bzip2", Bzip2::default());
    #[cfg(feature = "xz")]
    registry.register("xz", Xz::default());
    #[cfg(feature = "zstd")]
    registry.register("zstd", Zstd::default());
}
