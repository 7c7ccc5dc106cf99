//! JSON to table conversion module
//!
//! This module contains the conversion engine, configuration, input limits and statistics.

pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;

pub use config::{ConversionConfig, DelimiterType, ParquetCompression};

pub use engine::{
    convert_json_bytes, convert_json_string, ConversionEngine, ConversionReport, FormatOutcome,
};
pub use stats::ConversionStatistics;

use crate::error::ConversionError;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
