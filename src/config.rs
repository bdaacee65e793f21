//! Per-run configuration.

/// Default capacity of the buffered reader and writer used by the pipeline.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Settings for one compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Write the frequency and code listings to the diagnostic sink.
    pub diagnostics: bool,
    /// Capacity of the I/O buffers around input and output.
    pub buffer_capacity: usize,
}

impl Config {
    /// Default settings: no diagnostics, 64 KiB buffers.
    pub fn new() -> Self {
        Self {
            diagnostics: false,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }

    /// Enable or disable the diagnostic listings.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Set the I/O buffer capacity. Zero is bumped to one byte.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(1);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
