//! Error types for the huffcode crate.

use std::io;

use crate::code_table::CodeWord;

/// Result type alias using [`HuffmanError`].
pub type Result<T> = std::result::Result<T, HuffmanError>;

/// Everything that can go wrong while compressing or decompressing.
#[derive(Debug, thiserror::Error)]
pub enum HuffmanError {
    /// The header does not follow the tree grammar.
    #[error("malformed header at byte {position}: {reason}")]
    Format { position: usize, reason: String },

    /// Two leaves produced the same code word.
    #[error("duplicate code word {0}")]
    DuplicateCode(CodeWord),

    /// Compression was asked to reject zero-byte inputs and got one.
    #[error("input is empty")]
    EmptyInput,

    /// The bit source ended in the middle of a code word.
    #[error("bit stream ended with {pending_bits} bits of an unfinished code word")]
    TruncatedStream { pending_bits: usize },

    /// The bit source produced a sequence that no code word starts with.
    #[error("bit sequence {0} does not match any code word")]
    InvalidCodeword(CodeWord),

    /// The second pass over the input met a byte the first pass never counted.
    #[error("byte {0:#04x} is not in the code table")]
    UnknownSymbol(u8),

    /// The serialised container is short or inconsistent.
    #[error("invalid container: {0}")]
    Container(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl HuffmanError {
    pub(crate) fn format(position: usize, reason: impl Into<String>) -> Self {
        HuffmanError::Format {
            position,
            reason: reason.into(),
        }
    }

    /// True for errors caused by bad compressed input rather than by IO.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(
            self,
            HuffmanError::Format { .. }
                | HuffmanError::TruncatedStream { .. }
                | HuffmanError::InvalidCodeword(_)
                | HuffmanError::Container(_)
        )
    }
}
