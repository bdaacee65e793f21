//! Byte frequency analysis.
//!
//! The first pass of the pipeline: count how often each of the 256 byte
//! values occurs in the input.

use std::fmt;
use std::io::{self, Read, Write};

/// Size of the byte alphabet.
pub const ALPHABET_SIZE: usize = 256;

const READ_CHUNK: usize = 8 * 1024;

/// A byte value together with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    /// The byte value.
    pub byte: u8,
    /// Number of occurrences in the input.
    pub count: u64,
}

/// Occurrence counts for every byte value.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// An all-zero table.
    pub fn new() -> Self {
        Self {
            counts: [0; ALPHABET_SIZE],
        }
    }

    /// Count the bytes of an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Count every byte a reader yields until EOF.
    pub fn from_reader<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut table = Self::new();
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => table.update(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(table)
    }

    /// Add the bytes of `data` to the counts.
    pub fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
    }

    /// Occurrence count of `byte`.
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Raw counts indexed by byte value.
    pub fn counts(&self) -> &[u64; ALPHABET_SIZE] {
        &self.counts
    }

    /// Symbols with a non-zero count, in ascending byte order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(b, &count)| Symbol {
                byte: b as u8,
                count,
            })
    }

    /// Number of distinct byte values that occur.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True when no byte has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Shannon entropy of the observed distribution, in bits per byte.
    ///
    /// This is the lower bound on the average code length of any prefix code
    /// for this table. Returns 0.0 for an empty table.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total = total as f64;
        self.symbols()
            .map(|s| {
                let p = s.count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }

    /// Write one `byte: count` line per occurring byte.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Byte frequencies:")?;
        for s in self.symbols() {
            writeln!(out, "{}: {}", display_byte(s.byte), s.count)?;
        }
        Ok(())
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.symbols().map(|s| (s.byte, s.count)))
            .finish()
    }
}

/// Render a byte for human-readable listings: printable ASCII as a quoted
/// character, everything else as hex.
pub(crate) fn display_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}' (0x{:02x})", byte as char, byte)
    } else {
        format!("    (0x{:02x})", byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_counts_abracadabra() {
        let table = FrequencyTable::from_bytes(b"abracadabra");
        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);
        assert_eq!(table.distinct(), 5);
        assert_eq!(table.total(), 11);
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.symbols().count(), 0);
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn test_reader_matches_slice() {
        // Larger than one read chunk so the loop runs more than once.
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * 7 % 251) as u8).collect();
        let from_reader = FrequencyTable::from_reader(&mut Cursor::new(&data)).unwrap();
        assert_eq!(from_reader, FrequencyTable::from_bytes(&data));
    }

    #[test]
    fn test_symbols_ascending() {
        let table = FrequencyTable::from_bytes(b"zyxa");
        let bytes: Vec<u8> = table.symbols().map(|s| s.byte).collect();
        assert_eq!(bytes, b"axyz");
    }

    #[test]
    fn test_entropy_uniform() {
        let table = FrequencyTable::from_bytes(b"abcd");
        assert!((table.entropy() - 2.0).abs() < 1e-12);

        let single = FrequencyTable::from_bytes(b"aaaa");
        assert_eq!(single.entropy(), 0.0);
    }

    #[test]
    fn test_listing_only_nonzero() {
        let table = FrequencyTable::from_bytes(b"aab\n");
        let mut out = Vec::new();
        table.write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("'a' (0x61): 2"));
        assert!(text.contains("(0x0a): 1"));
    }
}
