//! Statistics collected for one conversion

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-format encoding figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatStatistics {
    pub format: String,
    pub succeeded: bool,
    pub output_size_bytes: u64,
    pub encode_time_ms: u64,
}

/// Statistics for one load-and-encode cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Input JSON size in bytes
    pub input_size_bytes: u64,
    /// Rows in the loaded table
    pub row_count: usize,
    /// Columns in the loaded table
    pub column_count: usize,
    /// Time spent parsing and building the table
    pub load_time_ms: u64,
    /// Figures for each requested output format
    pub outputs: Vec<FormatStatistics>,
    /// Total wall time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl ConversionStatistics {
    /// Start statistics once the table is loaded
    pub fn for_load(input_size: u64, shape: (usize, usize), load_time: Duration) -> Self {
        Self {
            input_size_bytes: input_size,
            row_count: shape.0,
            column_count: shape.1,
            load_time_ms: load_time.as_millis() as u64,
            outputs: Vec::new(),
            processing_time_ms: load_time.as_millis() as u64,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Record the outcome of one encoding
    pub fn record_output(&mut self, format: &str, output_size: Option<u64>, encode_time: Duration) {
        self.outputs.push(FormatStatistics {
            format: format.to_string(),
            succeeded: output_size.is_some(),
            output_size_bytes: output_size.unwrap_or(0),
            encode_time_ms: encode_time.as_millis() as u64,
        });
    }

    /// Close the statistics with the total elapsed time
    pub fn finish(&mut self, total: Duration) {
        self.processing_time_ms = total.as_millis() as u64;
        self.collected_at = chrono::Utc::now();
    }

    /// Output size relative to input size, as a percentage
    pub fn size_ratio(&self, format: &str) -> Option<f32> {
        if self.input_size_bytes == 0 {
            return None;
        }
        self.outputs
            .iter()
            .find(|o| o.format == format && o.succeeded)
            .map(|o| o.output_size_bytes as f32 / self.input_size_bytes as f32 * 100.0)
    }

    /// Render as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
