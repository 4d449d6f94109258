/// Bits packed most significant first into bytes.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        let byte = self.bits[index / 8];
        Some(byte & (1 << (7 - index % 8)) != 0)
    }

    /// Rebuilds a vector from packed bytes. Returns `None` when `bytes`
    /// cannot hold `bit_count` bits or has whole bytes to spare.
    pub fn from_parts(bit_count: usize, bits: Vec<u8>) -> Option<Self> {
        if bits.len() != bit_count.div_ceil(8) {
            return None;
        }
        Some(BitVec { bits, bit_count })
    }
}
