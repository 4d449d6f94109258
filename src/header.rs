//! Textual serialisation of a code tree.
//!
//! ```text
//! tree     := leaf | internal
//! leaf     := "." <raw byte>
//! internal := "(" tree tree ")"
//! ```
//!
//! Internal nodes list their zero child before their one child. The
//! header is self-delimiting, so nothing else is stored to describe the
//! code.

use tracing::debug;

use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

const LEAF: u8 = b'.';
const OPEN: u8 = b'(';
const CLOSE: u8 = b')';

/// One more than the deepest tree 256 distinct symbols can form.
const MAX_DEPTH: usize = 256;

pub fn serialize(tree: &HuffmanTree) -> Vec<u8> {
    let mut out = Vec::new();
    write_node(&tree.root, &mut out);
    out
}

fn write_node(node: &HuffNode, out: &mut Vec<u8>) {
    match node {
        HuffNode::Leaf { byte } => {
            out.push(LEAF);
            out.push(*byte);
        }
        HuffNode::Internal { zero, one } => {
            out.push(OPEN);
            write_node(zero, out);
            write_node(one, out);
            out.push(CLOSE);
        }
    }
}

/// Parses a complete header. Trailing bytes after the tree are an error.
pub fn deserialize(header: &[u8]) -> Result<HuffmanTree> {
    let mut parser = Parser {
        input: header,
        seen: [false; 256],
    };
    let (root, end) = parser.node(0, 0)?;
    if end != header.len() {
        return Err(HuffmanError::format(
            end,
            format!("{} trailing bytes after tree", header.len() - end),
        ));
    }
    debug!(header_len = header.len(), "parsed header");
    Ok(HuffmanTree::new(root))
}

struct Parser<'a> {
    input: &'a [u8],
    seen: [bool; 256],
}

impl Parser<'_> {
    /// Parses one subtree starting at `pos` and returns it with the
    /// position just past it.
    fn node(&mut self, pos: usize, depth: usize) -> Result<(HuffNode, usize)> {
        if depth > MAX_DEPTH {
            return Err(HuffmanError::format(pos, "tree nested too deeply"));
        }
        match self.input.get(pos) {
            Some(&LEAF) => {
                let &byte = self
                    .input
                    .get(pos + 1)
                    .ok_or_else(|| HuffmanError::format(pos + 1, "leaf is missing its symbol"))?;
                if std::mem::replace(&mut self.seen[byte as usize], true) {
                    return Err(HuffmanError::format(
                        pos + 1,
                        format!("symbol {byte:#04x} appears in two leaves"),
                    ));
                }
                Ok((HuffNode::leaf(byte), pos + 2))
            }
            Some(&OPEN) => {
                let (zero, pos) = self.node(pos + 1, depth + 1)?;
                let (one, pos) = self.node(pos, depth + 1)?;
                match self.input.get(pos) {
                    Some(&CLOSE) => Ok((HuffNode::merge(zero, one), pos + 1)),
                    Some(&other) => Err(HuffmanError::format(
                        pos,
                        format!("expected ')' but found {:?}", other as char),
                    )),
                    None => Err(HuffmanError::format(pos, "unexpected end of header")),
                }
            }
            Some(&other) => Err(HuffmanError::format(
                pos,
                format!("expected '.' or '(' but found {:?}", other as char),
            )),
            None => Err(HuffmanError::format(pos, "unexpected end of header")),
        }
    }
}
