//! MSB-first bit packing onto a byte sink.

use std::io::{self, Write};

use crate::codebook::Code;

/// Packs bits into bytes, most significant bit first, and writes each byte
/// to the inner writer as soon as it is full.
///
/// The writer does no buffering of its own beyond the partial byte; wrap the
/// sink in a `BufWriter` for file output.
pub struct BitWriter<W: Write> {
    inner: W,
    acc: u8,
    nbits: u8,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            acc: 0,
            nbits: 0,
            bits_written: 0,
        }
    }

    /// Append one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.acc = (self.acc << 1) | bit as u8;
        self.nbits += 1;
        self.bits_written += 1;
        if self.nbits == 8 {
            self.inner.write_all(&[self.acc])?;
            self.acc = 0;
            self.nbits = 0;
        }
        Ok(())
    }

    /// Append every bit of `code`, first bit first.
    pub fn write_code(&mut self, code: &Code) -> io::Result<()> {
        for &bit in code.bits() {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Total bits appended so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Flush a partial byte, zero-padded on the right, and return the inner
    /// writer with the number of data bits written.
    pub fn finish(mut self) -> io::Result<(W, u64)> {
        if self.nbits > 0 {
            let byte = self.acc << (8 - self.nbits);
            self.inner.write_all(&[byte])?;
            self.acc = 0;
            self.nbits = 0;
        }
        self.inner.flush()?;
        Ok((self.inner, self.bits_written))
    }
}
