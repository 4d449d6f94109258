//! The boundary between the codec and whatever stores its output.

use crate::error::Result;

/// Destination for a compressed stream: the header once, then bits.
pub trait BitSink {
    fn write_header(&mut self, header: &[u8]) -> Result<()>;

    fn write_bit(&mut self, bit: bool) -> Result<()>;

    fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

/// Source of a compressed stream. `read_bit` returns `None` once the
/// stream has ended.
pub trait BitSource {
    fn read_header(&mut self) -> Result<Vec<u8>>;

    fn read_bit(&mut self) -> Result<Option<bool>>;
}

impl<S: BitSink + ?Sized> BitSink for &mut S {
    fn write_header(&mut self, header: &[u8]) -> Result<()> {
        (**self).write_header(header)
    }

    fn write_bit(&mut self, bit: bool) -> Result<()> {
        (**self).write_bit(bit)
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn read_header(&mut self) -> Result<Vec<u8>> {
        (**self).read_header()
    }

    fn read_bit(&mut self) -> Result<Option<bool>> {
        (**self).read_bit()
    }
}
