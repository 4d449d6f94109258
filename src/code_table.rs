use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::trace;

use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// The bits of one symbol's code, first bit first. `false` is a zero-child
/// edge and `true` a one-child edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodeWord(Vec<bool>);

impl CodeWord {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_prefix_of(&self, other: &CodeWord) -> bool {
        other.0.starts_with(&self.0)
    }

    fn extended(&self, bit: bool) -> CodeWord {
        let mut bits = Vec::with_capacity(self.0.len() + 1);
        bits.extend_from_slice(&self.0);
        bits.push(bit);
        CodeWord(bits)
    }
}

impl From<Vec<bool>> for CodeWord {
    fn from(bits: Vec<bool>) -> Self {
        CodeWord(bits)
    }
}

impl From<&[bool]> for CodeWord {
    fn from(bits: &[bool]) -> Self {
        CodeWord(bits.to_vec())
    }
}

impl Borrow<[bool]> for CodeWord {
    fn borrow(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for CodeWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code word, read off the root-to-leaf paths of a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, CodeWord>,
}

impl CodeTable {
    /// A tree that is a single leaf has no edges, so its symbol gets the
    /// one-bit code `0` instead of an empty code word.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        match &tree.root {
            HuffNode::Leaf { byte } => {
                codes.insert(*byte, CodeWord(vec![false]));
            }
            root => gather_leaves(root, CodeWord::default(), &mut codes),
        }
        for (byte, code) in &codes {
            trace!(symbol = byte, code = %code, "assigned code word");
        }
        CodeTable { codes }
    }

    pub fn get(&self, byte: u8) -> Option<&CodeWord> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &CodeWord)> + '_ {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }
}

fn gather_leaves(node: &HuffNode, code: CodeWord, codes: &mut BTreeMap<u8, CodeWord>) {
    match node {
        HuffNode::Leaf { byte } => {
            codes.insert(*byte, code);
        }
        HuffNode::Internal { zero, one } => {
            gather_leaves(zero, code.extended(false), codes);
            gather_leaves(one, code.extended(true), codes);
        }
    }
}

/// Code word to symbol, the inverse of a [`CodeTable`].
#[derive(Debug, Clone, Default)]
pub struct DecodeTable {
    symbols: HashMap<CodeWord, u8>,
    max_len: usize,
}

impl DecodeTable {
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut symbols = HashMap::with_capacity(table.len());
        let mut max_len = 0;
        for (byte, code) in table.iter() {
            if symbols.insert(code.clone(), byte).is_some() {
                return Err(HuffmanError::DuplicateCode(code.clone()));
            }
            max_len = max_len.max(code.len());
        }
        Ok(DecodeTable { symbols, max_len })
    }

    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        DecodeTable::from_code_table(&CodeTable::from_tree(tree))
    }

    pub fn get(&self, candidate: &[bool]) -> Option<u8> {
        self.symbols.get(candidate).copied()
    }

    /// Length of the longest code word. A candidate longer than this can
    /// never match.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
