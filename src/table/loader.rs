//! Builds a [`Table`] from a JSON document

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionResult};
use crate::parser::parse_bytes;
use crate::table::flatten::{flatten_object, FlattenError};
use crate::table::shape::{classify, JsonShape, RecordLayout};
use crate::table::{Cell, Table, TableBuilder, TableOrigin};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Column name used for a list of scalars
pub const SCALAR_COLUMN: &str = "0";

/// Column name holding a whole object when it cannot be flattened
pub const WRAPPED_COLUMN: &str = "value";

/// Load a table from raw JSON bytes with the default configuration
pub fn load_table(input: &[u8]) -> ConversionResult<Table> {
    load_table_with_config(input, &ConversionConfig::default())
}

/// Load a table from raw JSON bytes
pub fn load_table_with_config(input: &[u8], config: &ConversionConfig) -> ConversionResult<Table> {
    let value = parse_bytes(input).map_err(ConversionError::ParseError)?;
    table_from_value(&value, config)
}

/// Build a table from an already parsed JSON value
pub fn table_from_value(value: &Value, config: &ConversionConfig) -> ConversionResult<Table> {
    let table = match classify(value)? {
        JsonShape::Records(layout) => records_table(layout),
        JsonShape::Object(object) => object_table(object, config),
    };

    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        origin = ?table.origin(),
        "loaded table"
    );
    Ok(table)
}

fn records_table(layout: RecordLayout<'_>) -> Table {
    let mut builder = TableBuilder::new();

    match layout {
        RecordLayout::Empty => {}
        RecordLayout::Objects(objects) => {
            for object in objects {
                let cells: Vec<_> = object
                    .iter()
                    .map(|(key, value)| (builder.column(key), Cell::from_json(value)))
                    .collect();
                builder.push_row(cells);
            }
        }
        RecordLayout::Arrays(arrays) => {
            for items in arrays {
                let cells: Vec<_> = items
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| (builder.column(&idx.to_string()), Cell::from_json(value)))
                    .collect();
                builder.push_row(cells);
            }
        }
        RecordLayout::Scalars(items) => {
            let column = builder.column(SCALAR_COLUMN);
            for value in items {
                builder.push_row([(column, Cell::from_json(value))]);
            }
        }
    }

    builder.build(TableOrigin::Records)
}

/// Flatten first; only a [`FlattenError`] selects the whole-object fallback
fn object_table(object: &Map<String, Value>, config: &ConversionConfig) -> Table {
    match flatten_object(object, &config.flatten_options()) {
        Ok(flat) => {
            let mut builder = TableBuilder::new();
            let cells: Vec<_> = flat
                .into_iter()
                .map(|(name, value)| (builder.column(&name), Cell::from_json(value)))
                .collect();
            builder.push_row(cells);
            builder.build(TableOrigin::FlattenedObject)
        }
        Err(reason) => wrapped_object_table(object, reason),
    }
}

fn wrapped_object_table(object: &Map<String, Value>, reason: FlattenError) -> Table {
    warn!(%reason, "object could not be flattened, keeping it as a single value");

    let mut builder = TableBuilder::new();
    let column = builder.column(WRAPPED_COLUMN);
    builder.push_row([(column, Cell::Json(Value::Object(object.clone())))]);
    builder.build(TableOrigin::WrappedObject { reason })
}
