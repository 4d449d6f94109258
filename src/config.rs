/// What compression does with a zero-byte input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyInputPolicy {
    /// Write an empty header and no bits. Decompressing that yields an
    /// empty output.
    #[default]
    Encode,
    /// Fail with [`HuffmanError::EmptyInput`](crate::HuffmanError::EmptyInput).
    Reject,
}

/// What decompression does when the bits run out mid code word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncationPolicy {
    /// Fail with [`HuffmanError::TruncatedStream`](crate::HuffmanError::TruncatedStream).
    #[default]
    Error,
    /// Drop the partial code word and stop, keeping what was decoded.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    pub empty_input: EmptyInputPolicy,
    pub truncation: TruncationPolicy,
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_empty_input(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
    }

    pub fn with_truncation(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = policy;
        self
    }
}
