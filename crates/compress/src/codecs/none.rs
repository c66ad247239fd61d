//! Uncompressed passthrough.

use crate::algorithm::{Algorithm, Finish};
use crate::error::Result;
use std::io::{Read, Write};

/// Stores data unchanged. No tunables.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl Algorithm for Passthrough {
    fn new_instance(&self) -> Box<dyn Algorithm> {
        Box::new(Passthrough)
    }

    fn extension(&self) -> &'static str {
        ""
    }

    fn encoder<'a>(&self, sink: Box<dyn Write + 'a>) -> Result<Box<dyn Finish + 'a>> {
        Ok(Box::new(Verbatim(sink)))
    }

    fn decoder<'a>(&self, source: Box<dyn Read + 'a>) -> Result<Box<dyn Read + 'a>> {
        Ok(source)
    }
}

struct Verbatim<W>(W);

impl<W: Write> Write for Verbatim<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> Finish for Verbatim<W> {
    fn finish(mut self: Box<Self>) -> std::io::Result<()> {
        self.0.flush()
    }
}

#[cfg(test)]
mod tests {
    use crate::Registry;
    use crate::error::ErrorKind;
    use crate::tuning::{Endian, TuningKind, with_endian, with_level, with_lit_width};
    use rstest::rstest;

    #[test]
    fn test_passthrough() {
        let none = Registry::with_defaults().construct("none", []).unwrap();
        assert_eq!(none.encode(b"Hello, world!").unwrap(), b"Hello, world!");
        assert_eq!(none.decode(b"Hello, world!").unwrap(), b"Hello, world!");
        assert!(none.encode(b"").unwrap().is_empty());
    }

    #[rstest]
    #[case(with_level(1), TuningKind::Level)]
    #[case(with_lit_width(8), TuningKind::LitWidth)]
    #[case(with_endian(Endian::Big), TuningKind::Endian)]
    fn test_no_tunables(#[case] tuning: crate::Tuning, #[case] option: TuningKind) {
        let err = Registry::with_defaults().construct("none", [tuning]).unwrap_err();
        assert_eq!(*err, ErrorKind::UnsupportedOption { algorithm: "none".to_string(), option });
    }
}
