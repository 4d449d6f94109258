use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::header;
use crate::min_heap::MinHeap;

/// A node of the code tree. Leaves carry a symbol, internal nodes own
/// exactly two children and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        byte: u8,
    },
    Internal {
        zero: Box<HuffNode>,
        one: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(byte: u8) -> Self {
        HuffNode::Leaf { byte }
    }

    pub fn merge(zero: Self, one: Self) -> Self {
        HuffNode::Internal {
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { zero, one } => 1 + zero.depth().max(one.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { zero, one } => zero.leaf_count() + one.leaf_count(),
        }
    }
}

/// Heap entry: a partial tree keyed by its total weight. `seq` is the
/// insertion counter, so equal weights leave the heap first-in first-out.
#[derive(Debug)]
struct Weighted {
    weight: u64,
    seq: u64,
    node: HuffNode,
}

impl PartialEq for Weighted {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weighted {}

impl PartialOrd for Weighted {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weighted {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    pub fn new(root: HuffNode) -> Self {
        HuffmanTree { root }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Greedy Huffman construction. Leaves are seeded in ascending symbol
    /// order; a table with one symbol yields a bare leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        let mut seq = 0u64;
        let leaves = frequencies
            .iter()
            .map(|(byte, weight)| {
                seq += 1;
                Weighted {
                    weight,
                    seq,
                    node: HuffNode::leaf(byte),
                }
            })
            .collect();
        let mut heap = MinHeap::build(leaves);

        let root = loop {
            let x = heap.extract_min().ok_or(HuffmanError::EmptyInput)?;
            let Some(y) = heap.extract_min() else {
                break x.node;
            };
            seq += 1;
            heap.insert(Weighted {
                weight: x.weight + y.weight,
                seq,
                node: HuffNode::merge(x.node, y.node),
            });
        };

        let tree = HuffmanTree { root };
        debug!(
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            "built code tree"
        );
        Ok(tree)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

impl fmt::Display for HuffmanTree {
    /// The header form of the tree with unprintable symbols escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = header::serialize(self);
        write!(f, "{}", bytes.escape_ascii())
    }
}
