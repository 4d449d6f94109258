use std::io::{self, Cursor, Read, Write};

use crate::bit_io::{BitSink, BitSource};
use crate::bit_vec::BitVec;
use crate::error::{HuffmanError, Result};

/// A header plus its encoded bits, held in memory.
///
/// Serialised layout, integers as little-endian u64:
/// `header_len | header | bit_count | packed_len | packed bits`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedData {
    header: Vec<u8>,
    bits: BitVec,
}

impl CompressedData {
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn bit_count(&self) -> usize {
        self.bits.bit_count()
    }

    /// Size of the serialised form in bytes.
    pub fn serialized_len(&self) -> usize {
        3 * 8 + self.header.len() + self.bits.as_bytes().len()
    }

    pub fn reader(&self) -> CompressedReader<'_> {
        CompressedReader {
            data: self,
            header_read: false,
            position: 0,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.serialized_len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&(self.header.len() as u64).to_le_bytes())?;
        writer.write_all(&self.header)?;

        writer.write_all(&(self.bits.bit_count() as u64).to_le_bytes())?;

        let packed = self.bits.as_bytes();
        writer.write_all(&(packed.len() as u64).to_le_bytes())?;
        writer.write_all(packed)?;
        Ok(())
    }

    /// Parses a serialised container that must span all of `data`.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let compressed = CompressedData::read_from(&mut cursor)?;
        let consumed = cursor.position() as usize;
        if consumed != data.len() {
            return Err(HuffmanError::Container(format!(
                "{} trailing bytes",
                data.len() - consumed
            )));
        }
        Ok(compressed)
    }

    /// Reads one serialised container from the front of `reader`.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header_len = read_len(reader, "header length")?;
        let header = read_block(reader, header_len, "header")?;

        let bit_count = read_len(reader, "bit count")?;

        let packed_len = read_len(reader, "packed length")?;
        let packed = read_block(reader, packed_len, "packed bits")?;

        let bits = BitVec::from_parts(bit_count, packed).ok_or_else(|| {
            HuffmanError::Container(format!(
                "{packed_len} packed bytes cannot hold exactly {bit_count} bits"
            ))
        })?;
        Ok(CompressedData { header, bits })
    }
}

fn read_len<R: Read>(reader: &mut R, what: &str) -> Result<usize> {
    let mut bytes = [0u8; 8];
    reader.read_exact(&mut bytes).map_err(|e| eof_as_container(e, what))?;
    usize::try_from(u64::from_le_bytes(bytes))
        .map_err(|_| HuffmanError::Container(format!("{what} does not fit in memory")))
}

fn read_block<R: Read>(reader: &mut R, len: usize, what: &str) -> Result<Vec<u8>> {
    let mut block = Vec::new();
    reader.take(len as u64).read_to_end(&mut block)?;
    if block.len() != len {
        return Err(HuffmanError::Container(format!(
            "{what} truncated: expected {len} bytes, found {}",
            block.len()
        )));
    }
    Ok(block)
}

fn eof_as_container(e: io::Error, what: &str) -> HuffmanError {
    if e.kind() == io::ErrorKind::UnexpectedEof {
        HuffmanError::Container(format!("missing {what}"))
    } else {
        HuffmanError::Io(e)
    }
}

/// [`BitSink`] that collects a compressed stream into [`CompressedData`].
#[derive(Debug)]
pub struct CompressedWriter {
    header: Option<Vec<u8>>,
    bits: BitVec,
}

impl CompressedWriter {
    pub fn new() -> Self {
        CompressedWriter {
            header: None,
            bits: BitVec::new(),
        }
    }

    pub fn finish(self) -> CompressedData {
        CompressedData {
            header: self.header.unwrap_or_default(),
            bits: self.bits,
        }
    }
}

impl BitSink for CompressedWriter {
    fn write_header(&mut self, header: &[u8]) -> Result<()> {
        if self.header.is_some() {
            return Err(HuffmanError::Container("header written twice".into()));
        }
        if self.bits.bit_count() > 0 {
            return Err(HuffmanError::Container("header written after bits".into()));
        }
        self.header = Some(header.to_vec());
        Ok(())
    }

    fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.bits.push_bit(bit);
        Ok(())
    }
}

impl Default for CompressedWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// [`BitSource`] over a borrowed [`CompressedData`].
#[derive(Debug)]
pub struct CompressedReader<'a> {
    data: &'a CompressedData,
    header_read: bool,
    position: usize,
}

impl BitSource for CompressedReader<'_> {
    fn read_header(&mut self) -> Result<Vec<u8>> {
        if std::mem::replace(&mut self.header_read, true) {
            return Err(HuffmanError::Container("header read twice".into()));
        }
        Ok(self.data.header.clone())
    }

    fn read_bit(&mut self) -> Result<Option<bool>> {
        let bit = self.data.bits.get(self.position);
        if bit.is_some() {
            self.position += 1;
        }
        Ok(bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompressedData {
        let mut writer = CompressedWriter::new();
        writer.write_header(b"(.a.b)").unwrap();
        writer.write_bits(&[false, true, true, false, true, false, false, true, true]).unwrap();
        writer.finish()
    }

    #[test]
    fn reader_replays_writer() {
        let data = sample();
        assert_eq!(data.bit_count(), 9);
        let mut reader = data.reader();
        assert_eq!(reader.read_header().unwrap(), b"(.a.b)");
        let mut bits = Vec::new();
        while let Some(bit) = reader.read_bit().unwrap() {
            bits.push(bit);
        }
        assert_eq!(bits, vec![false, true, true, false, true, false, false, true, true]);
        assert_eq!(reader.read_bit().unwrap(), None);
    }

    #[test]
    fn serialized_layout() {
        let data = sample();
        let bytes = data.serialize().unwrap();
        assert_eq!(bytes.len(), data.serialized_len());
        assert_eq!(&bytes[..8], &6u64.to_le_bytes());
        assert_eq!(&bytes[8..14], b"(.a.b)");
        assert_eq!(&bytes[14..22], &9u64.to_le_bytes());
        assert_eq!(&bytes[22..30], &2u64.to_le_bytes());
        assert_eq!(&bytes[30..], &[0b0110_1001, 0b1000_0000]);
        assert_eq!(CompressedData::deserialize(&bytes).unwrap(), data);
    }

    #[test]
    fn truncated_container() {
        let bytes = sample().serialize().unwrap();
        for cut in [0, 5, 10, 20, bytes.len() - 1] {
            let err = CompressedData::deserialize(&bytes[..cut]).unwrap_err();
            assert!(matches!(err, HuffmanError::Container(_)), "cut at {cut}: {err:?}");
        }
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = sample().serialize().unwrap();
        bytes.push(0);
        assert!(matches!(
            CompressedData::deserialize(&bytes),
            Err(HuffmanError::Container(_))
        ));
    }

    #[test]
    fn inconsistent_bit_count_rejected() {
        let mut bytes = sample().serialize().unwrap();
        bytes[14..22].copy_from_slice(&30u64.to_le_bytes());
        assert!(matches!(
            CompressedData::deserialize(&bytes),
            Err(HuffmanError::Container(_))
        ));
    }

    #[test]
    fn header_must_come_first_and_once() {
        let mut writer = CompressedWriter::new();
        writer.write_bit(true).unwrap();
        assert!(writer.write_header(b".a").is_err());

        let mut writer = CompressedWriter::new();
        writer.write_header(b".a").unwrap();
        assert!(writer.write_header(b".a").is_err());
    }
}
