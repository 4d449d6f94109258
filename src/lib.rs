//! # huffcode
//!
//! Huffman compression whose code is described by a small textual header.
//!
//! The compressor counts symbols in one pass, builds a prefix tree, writes
//! the tree's shape as a header (`(` zero one `)` for internal nodes, `.`
//! plus the raw byte for leaves) and then encodes the input in a second
//! pass. The decompressor rebuilds the tree from the header and matches
//! incoming bits against the code words.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffcode::HuffmanCodec;
//!
//! let codec = HuffmanCodec::default();
//! let compressed = codec.compress_bytes(b"abracadabra")?;
//! let restored = codec.decompress_bytes(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffcode::HuffmanError>(())
//! ```
//!
//! Files or any other seekable stream go through
//! [`HuffmanCodec::encode_from_file`] and [`HuffmanCodec::decode_from_file`].

pub mod bit_io;
pub mod code_table;
pub mod compressed_data;
pub mod config;
pub mod error;
pub mod frequency;
pub mod header;
pub mod huffman_codec;
pub mod hufftree;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

use std::io::{Read, Seek, Write};

pub use bit_io::{BitSink, BitSource};
pub use code_table::{CodeTable, CodeWord, DecodeTable};
pub use compressed_data::{CompressedData, CompressedReader, CompressedWriter};
pub use config::{CodecConfig, EmptyInputPolicy, TruncationPolicy};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::{HuffNode, HuffmanTree};

/// Compresses `input` into `sink` with the default configuration.
pub fn compress<R: Read + Seek, S: BitSink>(input: &mut R, sink: S) -> Result<u64> {
    HuffmanCodec::default().compress(input, sink)
}

/// Decompresses `source` into `output` with the default configuration.
pub fn decompress<S: BitSource, W: Write>(source: S, output: &mut W) -> Result<u64> {
    HuffmanCodec::default().decompress(source, output)
}
