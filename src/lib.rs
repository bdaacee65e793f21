//! # Static Huffman Coding for Byte Streams
//!
//! *Frequency count, optimal prefix code, MSB-first bit packing.*
//!
//! ## Intuition First
//!
//! Fixed-width bytes spend 8 bits on every symbol, whether it shows up once or
//! a million times. A Huffman code gives frequent bytes short bit strings and
//! rare bytes long ones. Because no code is a prefix of another, the bit
//! strings can be concatenated without separators and still be read back
//! unambiguously.
//!
//! ## The Pipeline
//!
//! ```text
//! bytes ──► FrequencyTable ──► MinHeap ──► HuffmanTree ──► Codebook
//!   │                                                         │
//!   └──────────────── (rewind) ──────────► BitWriter ◄────────┘
//!                                              │
//!                                              ▼
//!                                        packed output
//! ```
//!
//! 1. Count every byte value (first pass).
//! 2. Queue one leaf per occurring byte, ordered by weight.
//! 3. Merge the two lightest nodes until one root remains.
//! 4. Walk the tree: left is `0`, right is `1`.
//! 5. Re-read the input and pack each byte's code, MSB first (second pass).
//!
//! ## Mathematical Formulation
//!
//! For observed counts $c_s$ with total $N$, the code lengths $\ell_s$ chosen
//! by the greedy merge minimize $\sum_s c_s \ell_s$ over all prefix codes, and
//! satisfy
//!
//! ```text
//! H(p) <= (1/N) * sum_s c_s * l_s < H(p) + 1
//! ```
//!
//! where $H(p)$ is the Shannon entropy of the empirical distribution.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(N)$ for the two passes plus $O(k \log k)$ queue work for
//!   $k \le 256$ distinct bytes.
//! - **Space**: $O(k)$ for the tree and codebook; the input is streamed.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: no alphabet, no tree. Reported as [`Error::EmptyInput`].
//! 2. **One distinct byte**: the tree is a lone leaf. It is given the 1-bit
//!    code `0` rather than an empty code.
//! 3. **No framing**: the output holds only code bits. The trailing pad bits
//!    are indistinguishable from data, and decoding needs the [`Codebook`]
//!    kept alongside.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use huffpack::{compress, Config};
//!
//! let mut input = Cursor::new(b"aab".to_vec());
//! let mut output = Vec::new();
//! let summary = compress(&mut input, &mut output, &Config::default())?;
//!
//! assert_eq!(output, vec![0b1100_0000]);
//! assert_eq!(summary.codebook.get(b'a').unwrap().to_string(), "1");
//! # Ok::<(), huffpack::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cormen, T. H., et al. *Introduction to Algorithms*, §16.3 (Huffman codes) and ch. 6 (heaps).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitio;
pub mod codebook;
pub mod config;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod huffman;
pub mod pipeline;
pub mod tree;

pub use codebook::{Code, Codebook};
pub use config::Config;
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, Symbol};
pub use huffman::HuffmanEncoder;
pub use pipeline::{compress, Compressor, Prepared, Summary};
pub use tree::{HuffmanTree, Node};
