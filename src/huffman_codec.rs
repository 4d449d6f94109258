use std::io::{BufWriter, Cursor, Read, Seek, SeekFrom, Write};

use tracing::{debug, warn};

use crate::bit_io::{BitSink, BitSource};
use crate::code_table::{CodeTable, DecodeTable};
use crate::compressed_data::{CompressedData, CompressedWriter};
use crate::config::{CodecConfig, EmptyInputPolicy, TruncationPolicy};
use crate::error::{HuffmanError, Result};
use crate::frequency::{for_each_chunk, FrequencyTable};
use crate::header;
use crate::hufftree::HuffmanTree;

/// Two-pass Huffman compressor and its matching decompressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec {
    config: CodecConfig,
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Self {
        HuffmanCodec { config }
    }

    /// Compresses everything from the current position of `input` to its
    /// end. The input is read twice: once to count symbols and once,
    /// after seeking back, to encode them. Returns the number of bits
    /// written after the header.
    pub fn compress<R, S>(&self, input: &mut R, mut sink: S) -> Result<u64>
    where
        R: Read + Seek,
        S: BitSink,
    {
        let start = input.stream_position()?;
        let frequencies = FrequencyTable::from_reader(input)?;
        debug!(
            symbols = frequencies.len(),
            bytes = frequencies.total(),
            "built frequency table"
        );

        if frequencies.is_empty() {
            return match self.config.empty_input {
                EmptyInputPolicy::Reject => Err(HuffmanError::EmptyInput),
                EmptyInputPolicy::Encode => {
                    sink.write_header(&[])?;
                    debug!("compressed empty input");
                    Ok(0)
                }
            };
        }

        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let header = header::serialize(&tree);
        let codes = CodeTable::from_tree(&tree);
        drop(tree);

        sink.write_header(&header)?;
        debug!(header_len = header.len(), "wrote header");

        input.seek(SeekFrom::Start(start))?;
        let mut bits_written = 0u64;
        for_each_chunk(input, |chunk| {
            for &byte in chunk {
                let code = codes.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
                sink.write_bits(code.bits())?;
                bits_written += code.len() as u64;
            }
            Ok(())
        })?;

        debug!(
            bytes = frequencies.total(),
            bits = bits_written,
            "compression finished"
        );
        Ok(bits_written)
    }

    /// Decodes `source` into `output` and returns the number of bytes
    /// written. An empty header stands for an empty input.
    pub fn decompress<S, W>(&self, mut source: S, output: &mut W) -> Result<u64>
    where
        S: BitSource,
        W: Write,
    {
        let header = source.read_header()?;
        let table = if header.is_empty() {
            DecodeTable::default()
        } else {
            DecodeTable::from_tree(&header::deserialize(&header)?)?
        };
        debug!(
            header_len = header.len(),
            symbols = table.len(),
            "read header"
        );

        let mut out = BufWriter::new(output);
        let mut candidate: Vec<bool> = Vec::with_capacity(table.max_len());
        let mut emitted = 0u64;
        loop {
            let Some(bit) = source.read_bit()? else {
                if candidate.is_empty() {
                    break;
                }
                match self.config.truncation {
                    TruncationPolicy::Error => {
                        return Err(HuffmanError::TruncatedStream {
                            pending_bits: candidate.len(),
                        });
                    }
                    TruncationPolicy::Lenient => {
                        warn!(
                            pending_bits = candidate.len(),
                            "bit stream ended mid code word, dropping partial symbol"
                        );
                        break;
                    }
                }
            };

            candidate.push(bit);
            if let Some(byte) = table.get(&candidate) {
                out.write_all(&[byte])?;
                emitted += 1;
                candidate.clear();
            } else if candidate.len() >= table.max_len() {
                return Err(HuffmanError::InvalidCodeword(candidate.into()));
            }
        }
        out.flush()?;

        debug!(bytes = emitted, "decompression finished");
        Ok(emitted)
    }

    pub fn compress_bytes(&self, data: &[u8]) -> Result<CompressedData> {
        let mut writer = CompressedWriter::new();
        self.compress(&mut Cursor::new(data), &mut writer)?;
        Ok(writer.finish())
    }

    pub fn decompress_bytes(&self, compressed: &CompressedData) -> Result<Vec<u8>> {
        let mut result = Vec::new();
        self.decompress(compressed.reader(), &mut result)?;
        Ok(result)
    }

    /// Compresses a seekable input and writes the serialised container to
    /// `output`.
    pub fn encode_from_file<R, W>(&self, mut input: R, mut output: W) -> Result<()>
    where
        R: Read + Seek,
        W: Write,
    {
        let mut writer = CompressedWriter::new();
        self.compress(&mut input, &mut writer)?;
        writer.finish().write_to(&mut output)?;
        output.flush()?;
        Ok(())
    }

    /// Reads one serialised container from `input` and writes the
    /// restored bytes to `output`.
    pub fn decode_from_file<R, W>(&self, mut input: R, mut output: W) -> Result<()>
    where
        R: Read,
        W: Write,
    {
        let compressed = CompressedData::read_from(&mut input)?;
        self.decompress(compressed.reader(), &mut output)?;
        output.flush()?;
        Ok(())
    }
}
