//! CSV encoding: header row, one record per table row, no index column

use crate::conversion::ConversionConfig;
use crate::error::{EncodingError, EncodingResult};
use crate::table::Table;

/// Encode a table as comma-separated UTF-8 text
pub fn encode_csv(table: &Table) -> EncodingResult<Vec<u8>> {
    encode_csv_with_config(table, &ConversionConfig::default())
}

/// Encode a table as delimited UTF-8 text using the configured delimiter.
///
/// Fields are quoted only when they contain the delimiter, a quote or a line
/// break. A table without columns encodes to an empty buffer.
pub fn encode_csv_with_config(table: &Table, config: &ConversionConfig) -> EncodingResult<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(config.delimiter.as_byte())
        .from_writer(Vec::new());

    writer
        .write_record(table.columns().iter().map(|c| c.name.as_str()))
        .map_err(|e| EncodingError::csv(e.to_string()))?;

    for row in table.rows() {
        writer
            .write_record(
                row.iter()
                    .zip(table.columns())
                    .map(|(cell, column)| cell.render_as(column.data_type)),
            )
            .map_err(|e| EncodingError::csv(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| EncodingError::csv(e.to_string()))
}
