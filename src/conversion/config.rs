//! Configuration options for JSON to table conversion

use crate::table::FlattenOptions;

/// CSV field delimiter options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DelimiterType {
    /// Comma delimiter (,)
    Comma,
    /// Tab delimiter (\\t)
    Tab,
    /// Pipe delimiter (|)
    Pipe,
}

impl DelimiterType {
    pub fn as_byte(&self) -> u8 {
        match self {
            DelimiterType::Comma => b',',
            DelimiterType::Tab => b'\t',
            DelimiterType::Pipe => b'|',
        }
    }
}

/// Compression codec for Parquet column chunks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParquetCompression {
    Snappy,
    Zstd,
    Gzip,
    Lz4,
    Uncompressed,
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Separator joining nested object keys into column names
    pub separator: String,
    /// Deepest object level flattened; deeper objects stay whole
    pub max_level: Option<usize>,
    /// Nesting depth at which flattening falls back to a single value
    pub max_depth: usize,
    /// Maximum input size in bytes
    pub memory_limit: usize,
    /// CSV field delimiter
    pub delimiter: DelimiterType,
    /// Parquet compression codec
    pub compression: ParquetCompression,
    /// Maximum rows per Parquet row group
    pub max_row_group_size: usize,
    /// Rows shown in the preview
    pub preview_rows: usize,
    /// Widest preview cell before truncation, in characters
    pub preview_cell_width: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            max_level: None,
            max_depth: 100,
            memory_limit: 100 * 1024 * 1024, // 100MB
            delimiter: DelimiterType::Comma,
            compression: ParquetCompression::Snappy,
            max_row_group_size: 1024 * 1024,
            preview_rows: 100,
            preview_cell_width: 32,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration for small interactive uploads (<10MB)
    pub fn small_files() -> Self {
        Self {
            memory_limit: 10 * 1024 * 1024, // 10MB
            preview_rows: 20,
            ..Default::default()
        }
    }

    /// Create configuration for large inputs (up to 1GB)
    pub fn large_files() -> Self {
        Self {
            memory_limit: 1024 * 1024 * 1024, // 1GB
            compression: ParquetCompression::Zstd,
            ..Default::default()
        }
    }

    /// Set key separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set maximum flatten level
    pub fn with_max_level(mut self, max_level: Option<usize>) -> Self {
        self.max_level = max_level;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Set CSV delimiter
    pub fn with_delimiter(mut self, delimiter: DelimiterType) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set Parquet compression
    pub fn with_compression(mut self, compression: ParquetCompression) -> Self {
        self.compression = compression;
        self
    }

    /// Flatten settings derived from this configuration
    pub fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            separator: self.separator.clone(),
            max_level: self.max_level,
            max_depth: self.max_depth,
        }
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.separator.is_empty() {
            return Err("Key separator must not be empty".to_string());
        }

        if self.max_depth == 0 {
            return Err("Max depth must be at least 1".to_string());
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if self.max_row_group_size == 0 {
            return Err("Row group size must be greater than 0".to_string());
        }

        if self.preview_cell_width < 4 {
            return Err("Preview cell width must be at least 4 characters".to_string());
        }

        Ok(())
    }
}
