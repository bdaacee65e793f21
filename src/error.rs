//! Error types for Huffman code construction and packing.

use thiserror::Error;

/// Error variants for huffpack operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input contained no bytes, so there is no alphabet to build a tree from.
    #[error("empty input: no symbols to build a code from")]
    EmptyInput,

    /// A byte appeared during encoding that has no code assigned.
    ///
    /// Happens when the input changes between the counting pass and the
    /// encoding pass.
    #[error("no code assigned for byte 0x{0:02x}")]
    UnknownSymbol(u8),

    /// An I/O error occurred while reading input or writing output.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for huffpack operations.
pub type Result<T> = std::result::Result<T, Error>;
