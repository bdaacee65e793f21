//! The two-pass compression pipeline.
//!
//! Pass one counts byte frequencies, the input is rewound, and pass two packs
//! each byte's code into the output.

use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use tracing::debug;

use crate::codebook::Codebook;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::huffman::HuffmanEncoder;
use crate::tree::HuffmanTree;

/// Outcome of one compression run.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Byte frequencies of the input.
    pub frequencies: FrequencyTable,
    /// Codes used for packing. Needed to decode the output.
    pub codebook: Codebook,
    /// Input length in bytes.
    pub input_bytes: u64,
    /// Code bits written, excluding padding.
    pub total_bits: u64,
    /// Output length in bytes.
    pub output_bytes: u64,
}

impl Summary {
    /// Number of distinct byte values in the input.
    pub fn distinct_symbols(&self) -> usize {
        self.codebook.len()
    }

    /// Longest code length in bits.
    pub fn max_code_len(&self) -> usize {
        self.codebook.max_len()
    }

    /// Mean code bits per input byte.
    pub fn average_code_len(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.total_bits as f64 / self.input_bytes as f64
    }

    /// Shannon entropy of the input, in bits per byte.
    pub fn entropy(&self) -> f64 {
        self.frequencies.entropy()
    }

    /// Output size as a fraction of input size.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Runs the pipeline under a [`Config`], writing diagnostic listings to `D`.
pub struct Compressor<D: Write = io::Sink> {
    config: Config,
    diagnostics: D,
}

impl Compressor<io::Sink> {
    /// Compressor that discards diagnostics.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            diagnostics: io::sink(),
        }
    }
}

impl<D: Write> Compressor<D> {
    /// Route diagnostic listings to `sink`. They are only written when
    /// `config.diagnostics` is set.
    pub fn with_diagnostics<E: Write>(self, sink: E) -> Compressor<E> {
        Compressor {
            config: self.config,
            diagnostics: sink,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the counting pass over `input` and build the code.
    ///
    /// Nothing is written anywhere except the diagnostic sink, so callers can
    /// defer opening the output until this succeeds.
    ///
    /// # Errors
    /// `Error::EmptyInput` for an empty input, `Error::Io` when reading or
    /// seeking fails.
    pub fn prepare<R>(&mut self, input: &mut R) -> Result<Prepared>
    where
        R: Read + Seek,
    {
        let capacity = self.config.buffer_capacity;

        input.seek(SeekFrom::Start(0))?;
        let frequencies =
            FrequencyTable::from_reader(&mut BufReader::with_capacity(capacity, &mut *input))?;
        debug!(
            input_bytes = frequencies.total(),
            distinct = frequencies.distinct(),
            "counted frequencies"
        );
        if self.config.diagnostics {
            frequencies.write_listing(&mut self.diagnostics)?;
        }
        if frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }

        let tree = HuffmanTree::build(&frequencies)?;
        let encoder = HuffmanEncoder::from_tree(&tree);
        if self.config.diagnostics {
            encoder.codebook().write_listing(&mut self.diagnostics)?;
            self.diagnostics.flush()?;
        }

        Ok(Prepared {
            frequencies,
            encoder,
            capacity,
        })
    }

    /// Compress `input` into `output`.
    ///
    /// `input` is read to the end twice; it is rewound to its start before
    /// each pass. Nothing is written to `output` when the input is empty.
    ///
    /// # Errors
    /// `Error::EmptyInput` for an empty input, `Error::Io` when reading,
    /// seeking or writing fails, and `Error::UnknownSymbol` if the input
    /// changed between the two passes.
    pub fn compress<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<Summary>
    where
        R: Read + Seek,
        W: Write,
    {
        self.prepare(input)?.encode(input, output)
    }
}

/// Frequencies and code from a finished counting pass, ready to encode.
#[derive(Debug, Clone)]
pub struct Prepared {
    frequencies: FrequencyTable,
    encoder: HuffmanEncoder,
    capacity: usize,
}

impl Prepared {
    /// Byte frequencies of the counted input.
    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// The code that [`Prepared::encode`] will use.
    pub fn codebook(&self) -> &Codebook {
        self.encoder.codebook()
    }

    /// Rewind `input` and pack it into `output`.
    ///
    /// `input` must hold the same bytes that were counted.
    ///
    /// # Errors
    /// `Error::Io` when seeking, reading or writing fails, and
    /// `Error::UnknownSymbol` for a byte that was not counted.
    pub fn encode<R, W>(self, input: &mut R, output: &mut W) -> Result<Summary>
    where
        R: Read + Seek,
        W: Write,
    {
        input.seek(SeekFrom::Start(0))?;
        let mut reader = BufReader::with_capacity(self.capacity, &mut *input);
        let mut writer = BufWriter::with_capacity(self.capacity, &mut *output);
        let total_bits = self.encoder.encode_into(&mut reader, &mut writer)?;
        writer.flush()?;

        let summary = Summary {
            input_bytes: self.frequencies.total(),
            frequencies: self.frequencies,
            codebook: self.encoder.codebook().clone(),
            total_bits,
            output_bytes: total_bits.div_ceil(8),
        };
        debug!(
            output_bytes = summary.output_bytes,
            ratio = summary.ratio(),
            "compression complete"
        );
        Ok(summary)
    }
}

/// Compress with the given configuration, discarding diagnostics.
pub fn compress<R, W>(input: &mut R, output: &mut W, config: &Config) -> Result<Summary>
where
    R: Read + Seek,
    W: Write,
{
    Compressor::new(config.clone()).compress(input, output)
}
