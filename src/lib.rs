//! JSON to table converter
//!
//! Loads a JSON document (a list of records or a single object) into a
//! rectangular table and encodes it as CSV and Parquet.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod table;

// Re-export commonly used types
pub use conversion::{
    convert_json_bytes, convert_json_string, ConversionConfig, ConversionEngine,
    ConversionReport, ConversionResult,
};
pub use error::{ConversionError, ConversionErrorKind, EncodingError, JsonKind, ParseError};
pub use formatter::{encode_csv, encode_parquet, EncodedOutput, OutputFormat};
pub use parser::JsonSource;
pub use table::{load_table, load_table_with_config, Cell, Column, ColumnType, Table};
