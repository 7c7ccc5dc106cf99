//! Output encodings of a [`Table`]

pub mod csv;
pub mod parquet;
pub mod preview;

use crate::conversion::ConversionConfig;
use crate::error::EncodingResult;
use crate::table::Table;
use std::fmt;

pub use self::csv::{encode_csv, encode_csv_with_config};
pub use self::parquet::{encode_parquet, encode_parquet_with_config};
pub use self::preview::{render_preview, shape_summary};

/// Downloadable output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Csv, OutputFormat::Parquet];

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "converted.csv",
            OutputFormat::Parquet => "converted.parquet",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Parquet => "application/octet-stream",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An encoded table ready to be offered as a download
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedOutput {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl EncodedOutput {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Encode a table into one output format
pub fn encode(
    table: &Table,
    format: OutputFormat,
    config: &ConversionConfig,
) -> EncodingResult<EncodedOutput> {
    let bytes = match format {
        OutputFormat::Csv => encode_csv_with_config(table, config)?,
        OutputFormat::Parquet => encode_parquet_with_config(table, config)?,
    };
    Ok(EncodedOutput { format, bytes })
}
