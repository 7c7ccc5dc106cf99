//! Parquet encoding of a [`Table`] as a single self-contained file
//!
//! Encodes through an Arrow `RecordBatch` and `ArrowWriter<Vec<u8>>`. Column
//! types map as follows; every field is nullable:
//!
//! | column   | parquet |
//! |----------|---------|
//! | bool     | BOOLEAN |
//! | int64    | INT64   |
//! | float64  | DOUBLE  |
//! | string, json, null | UTF8 string |
//!
//! Columns of mixed kinds have no Parquet type and fail the whole encoding.

use crate::conversion::{ConversionConfig, ParquetCompression};
use crate::error::{EncodingError, EncodingResult};
use crate::table::{Cell, Column, ColumnType, Table};
use arrow_array::{ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, GzipLevel, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::sync::Arc;
use tracing::debug;

/// Encode a table as Parquet with the default configuration
pub fn encode_parquet(table: &Table) -> EncodingResult<Vec<u8>> {
    encode_parquet_with_config(table, &ConversionConfig::default())
}

/// Encode a table as Parquet file bytes
pub fn encode_parquet_with_config(
    table: &Table,
    config: &ConversionConfig,
) -> EncodingResult<Vec<u8>> {
    if table.column_count() == 0 {
        return Err(EncodingError::EmptySchema);
    }

    let mut fields = Vec::with_capacity(table.column_count());
    let mut arrays = Vec::with_capacity(table.column_count());
    for (idx, column) in table.columns().iter().enumerate() {
        let (field, array) = column_array(table, idx, column)?;
        fields.push(field);
        arrays.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .map_err(|e| EncodingError::writer(format!("record batch: {e}")))?;

    let props = WriterProperties::builder()
        .set_compression(codec(config.compression))
        .set_max_row_group_size(config.max_row_group_size)
        .set_created_by(format!("jsontab version {}", env!("CARGO_PKG_VERSION")))
        .build();

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, schema, Some(props))
        .map_err(|e| EncodingError::writer(format!("writer init: {e}")))?;
    writer
        .write(&batch)
        .map_err(|e| EncodingError::writer(format!("write: {e}")))?;
    writer
        .close()
        .map_err(|e| EncodingError::writer(format!("close: {e}")))?;

    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        bytes = buf.len(),
        "encoded parquet"
    );
    Ok(buf)
}

fn codec(compression: ParquetCompression) -> Compression {
    match compression {
        ParquetCompression::Snappy => Compression::SNAPPY,
        ParquetCompression::Zstd => Compression::ZSTD(ZstdLevel::default()),
        ParquetCompression::Gzip => Compression::GZIP(GzipLevel::default()),
        ParquetCompression::Lz4 => Compression::LZ4_RAW,
        ParquetCompression::Uncompressed => Compression::UNCOMPRESSED,
    }
}

fn column_array(table: &Table, idx: usize, column: &Column) -> EncodingResult<(Field, ArrayRef)> {
    let cells = table.column_cells(idx);

    let (data_type, array): (DataType, ArrayRef) = match column.data_type {
        ColumnType::Boolean => {
            let values: BooleanArray = cells
                .map(|cell| match cell {
                    Cell::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            (DataType::Boolean, Arc::new(values))
        }
        ColumnType::Int64 => {
            let values: Int64Array = cells
                .map(|cell| match cell {
                    Cell::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            (DataType::Int64, Arc::new(values))
        }
        ColumnType::Float64 => {
            let values: Float64Array = cells.map(Cell::as_f64).collect();
            (DataType::Float64, Arc::new(values))
        }
        ColumnType::Utf8 | ColumnType::Json | ColumnType::Null => {
            let values: StringArray = cells
                .map(|cell| (!cell.is_null()).then(|| cell.render()))
                .collect();
            (DataType::Utf8, Arc::new(values))
        }
        ColumnType::Mixed => {
            return Err(EncodingError::UnsupportedColumnType {
                column: column.name.clone(),
                found: value_kinds(table, idx),
            })
        }
    };

    Ok((Field::new(column.name.as_str(), data_type, true), array))
}

/// Distinct non-null value kinds of a column, in order of appearance
fn value_kinds(table: &Table, idx: usize) -> String {
    let mut kinds: Vec<&'static str> = Vec::new();
    for cell in table.column_cells(idx).filter(|c| !c.is_null()) {
        let kind = cell.data_type().as_str();
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    kinds.join(", ")
}
