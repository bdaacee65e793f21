//! Huffman encoder: frequencies in, packed bits out.
//!
//! The packed output carries no header and no codebook. Keep the
//! [`Codebook`] (see [`Codebook::write_table`]) if the data needs to be
//! decoded later.

use std::io::{self, Read, Write};

use tracing::debug;

use crate::bitio::BitWriter;
use crate::codebook::Codebook;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

const READ_CHUNK: usize = 8 * 1024;

/// Huffman encoder.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder {
    codebook: Codebook,
}

impl HuffmanEncoder {
    /// Create an encoder from symbol frequencies.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if every count is zero.
    pub fn new(freqs: &FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::build(freqs)?;
        Ok(Self::from_tree(&tree))
    }

    /// Create an encoder from an already built tree.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        Self {
            codebook: Codebook::from_tree(tree),
        }
    }

    /// The code table in use.
    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Encode everything `input` yields into `output`.
    ///
    /// Returns the number of code bits written, excluding final padding.
    ///
    /// # Errors
    /// Returns `Error::UnknownSymbol` for a byte that has no code, and
    /// `Error::Io` if reading or writing fails.
    pub fn encode_into<R: Read, W: Write>(&self, input: &mut R, output: W) -> Result<u64> {
        let mut writer = BitWriter::new(output);
        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &b in &buf[..n] {
                let code = self.codebook.get(b).ok_or(Error::UnknownSymbol(b))?;
                writer.write_code(code)?;
            }
        }
        let (_, bits) = writer.finish()?;
        debug!(bits, bytes = bits.div_ceil(8), "packed input");
        Ok(bits)
    }

    /// Encode a byte slice into a freshly allocated buffer.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(&mut &data[..], &mut out)?;
        Ok(out)
    }
}
