//! Code derivation by tree traversal.

use std::fmt;
use std::io::{self, Write};

use crate::frequency::{display_byte, FrequencyTable, ALPHABET_SIZE};
use crate::tree::{HuffmanTree, Node};

/// A variable-length bit string, first bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for a zero-length code. Never produced by [`Codebook::from_tree`].
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits, in emission order.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its code. Only occurring bytes have an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    codes: Vec<Option<Code>>,
}

impl Codebook {
    /// Assign a code to every leaf of `tree`: `0` for left, `1` for right.
    ///
    /// A tree consisting of a single leaf gets the one-bit code `0`, so every
    /// occurrence still costs one bit of output.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; ALPHABET_SIZE];

        if let Node::Leaf { byte, .. } = tree.root() {
            codes[*byte as usize] = Some(Code::from(vec![false]));
            return Self { codes };
        }

        // Right is pushed before left so the left subtree is assigned first.
        let mut stack: Vec<(&Node, Vec<bool>)> = vec![(tree.root(), Vec::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { byte, .. } => {
                    codes[*byte as usize] = Some(Code::from(path));
                }
                Node::Internal { left, right, .. } => {
                    let mut right_path = path.clone();
                    right_path.push(true);
                    stack.push((right.as_ref(), right_path));

                    let mut left_path = path;
                    left_path.push(false);
                    stack.push((left.as_ref(), left_path));
                }
            }
        }

        Self { codes }
    }

    /// Code for `byte`, if it occurred in the input.
    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes[byte as usize].as_ref()
    }

    /// Assigned `(byte, code)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(b, c)| c.as_ref().map(|c| (b as u8, c)))
    }

    /// Number of bytes with an assigned code.
    pub fn len(&self) -> usize {
        self.codes.iter().filter(|c| c.is_some()).count()
    }

    /// True when no code is assigned.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest assigned code length in bits.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Bits needed to encode an input with the given frequencies.
    ///
    /// Bytes without a code contribute nothing.
    pub fn encoded_bits(&self, freqs: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(b, c)| freqs.count(b) * c.len() as u64)
            .sum()
    }

    /// Human-readable `byte: code` listing for diagnostics.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Codes:")?;
        for (b, code) in self.iter() {
            writeln!(out, "{}: {}", display_byte(b), code)?;
        }
        Ok(())
    }

    /// Machine-readable export: one `byte<TAB>code` line per assigned byte,
    /// byte in decimal.
    pub fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (b, code) in self.iter() {
            writeln!(out, "{}\t{}", b, code)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(data: &[u8]) -> Codebook {
        let tree = HuffmanTree::build(&FrequencyTable::from_bytes(data)).unwrap();
        Codebook::from_tree(&tree)
    }

    #[test]
    fn test_aab_codes() {
        let book = book(b"aab");
        assert_eq!(book.get(b'b').unwrap().to_string(), "0");
        assert_eq!(book.get(b'a').unwrap().to_string(), "1");
        assert_eq!(book.len(), 2);
        assert!(book.get(b'c').is_none());
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let book = book(b"qqqqqq");
        assert_eq!(book.len(), 1);
        assert_eq!(book.get(b'q').unwrap().to_string(), "0");
        assert_eq!(book.encoded_bits(&FrequencyTable::from_bytes(b"qqqqqq")), 6);
    }

    #[test]
    fn test_abracadabra_prefix_free_and_optimal() {
        let data = b"abracadabra";
        let book = book(data);
        let codes: Vec<_> = book.iter().collect();
        for (i, (_, a)) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, (_, b)) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} prefixes {}", a, b);
                }
            }
        }
        // a:5 b:2 r:2 c:1 d:1 has an optimal cost of 23 bits.
        assert_eq!(book.encoded_bits(&FrequencyTable::from_bytes(data)), 23);
        assert_eq!(book.get(b'a').unwrap().len(), 1);
    }

    #[test]
    fn test_left_first_assignment() {
        let book = book(b"abcd");
        let listing: Vec<String> = book
            .iter()
            .map(|(b, c)| format!("{}={}", b as char, c))
            .collect();
        assert_eq!(listing, vec!["a=00", "b=01", "c=10", "d=11"]);
        assert_eq!(book.max_len(), 2);
    }

    #[test]
    fn test_table_export_format() {
        let mut out = Vec::new();
        book(b"aab").write_table(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "97\t1\n98\t0\n");
    }

    #[test]
    fn test_listing_mentions_every_code() {
        let mut out = Vec::new();
        book(b"hello").write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1 + 4);
        assert!(text.contains("'l' (0x6c)"));
    }
}
