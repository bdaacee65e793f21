//! Huffman tree construction.
//!
//! # Historical Context
//!
//! David Huffman (1952) developed this algorithm as a term paper at MIT.
//! Merging the two lightest subtrees at every step minimizes the weighted
//! external path length, which makes the derived prefix code optimal for the
//! observed frequencies.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::frequency::{FrequencyTable, ALPHABET_SIZE};
use crate::heap::MinHeap;

/// Huffman tree node.
///
/// Internal nodes always own exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A symbol and its frequency.
    Leaf {
        /// Byte value.
        byte: u8,
        /// Occurrence count.
        weight: u64,
    },
    /// Merge of two subtrees.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached by a `0` bit.
        left: Box<Node>,
        /// Subtree reached by a `1` bit.
        right: Box<Node>,
    },
}

impl Node {
    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// A complete Huffman tree over the symbols of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Build the tree for every byte with a non-zero count.
    ///
    /// Leaves are queued in ascending byte order; equal weights are resolved in
    /// favour of the node queued first, so the same table always yields the
    /// same tree.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if the table has no non-zero count.
    pub fn build(freqs: &FrequencyTable) -> Result<Self> {
        let distinct = freqs.distinct();
        if distinct == 0 {
            return Err(Error::EmptyInput);
        }

        let mut queue = MinHeap::with_capacity(distinct);
        for s in freqs.symbols() {
            queue.insert(
                s.count,
                Node::Leaf {
                    byte: s.byte,
                    weight: s.count,
                },
            );
        }
        debug_assert!(queue.len() == distinct && queue.len() <= ALPHABET_SIZE);

        // Each round removes two and adds one, so the queue is never drained
        // inside the loop and holds exactly the root afterwards.
        while queue.len() > 1 {
            let (_, left) = queue.extract_min().expect("queue holds more than one node");
            let (_, right) = queue.extract_min().expect("queue holds more than one node");
            let merged = Node::merge(left, right);
            trace!(weight = merged.weight(), remaining = queue.len(), "merge");
            queue.insert(merged.weight(), merged);
        }

        let (_, root) = queue.extract_min().expect("queue holds the root");
        debug_assert!(queue.is_empty());
        let tree = Self { root };
        debug!(
            symbols = distinct,
            weight = tree.weight(),
            depth = tree.depth(),
            "built huffman tree"
        );
        Ok(tree)
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight (number of input bytes).
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { .. } => count += 1,
                Node::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        count
    }

    /// Length of the longest root-to-leaf path (0 for a lone leaf).
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(&self.root, 0usize)];
        while let Some((node, d)) = stack.pop() {
            match node {
                Node::Leaf { .. } => max = max.max(d),
                Node::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), d + 1));
                    stack.push((left.as_ref(), d + 1));
                }
            }
        }
        max
    }
}
