//! Tabular representation shared by the loader and every output encoder
//!
//! A [`Table`] is an ordered set of named columns and an ordered sequence of
//! rows. Every row holds exactly one [`Cell`] per column; missing values are
//! [`Cell::Null`]. Column types are inferred once, when the table is built.

pub mod flatten;
pub mod loader;
pub mod shape;

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub use flatten::{flatten_object, FlattenError, FlattenOptions};
pub use loader::{load_table, load_table_with_config, table_from_value};
pub use shape::{classify, JsonShape, RecordLayout};

/// A single table value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Array or object kept whole
    Json(Value),
}

impl Cell {
    /// Convert one JSON value without descending into containers
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n
                    .as_f64()
                    .map(Cell::Float)
                    .unwrap_or_else(|| Cell::Text(n.to_string())),
            },
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => Cell::Json(value.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Column type this value would give a column on its own
    pub fn data_type(&self) -> ColumnType {
        match self {
            Cell::Null => ColumnType::Null,
            Cell::Bool(_) => ColumnType::Boolean,
            Cell::Int(_) => ColumnType::Int64,
            Cell::Float(_) => ColumnType::Float64,
            Cell::Text(_) => ColumnType::Utf8,
            Cell::Json(_) => ColumnType::Json,
        }
    }

    /// Text form used by CSV output and the preview. Null renders empty.
    pub fn render(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Text(s) => s.clone(),
            Cell::Json(v) => v.to_string(),
        }
    }

    /// Text form of this value inside a column of `data_type`. Integers in a
    /// float column render as floats, matching the Parquet value.
    pub fn render_as(&self, data_type: ColumnType) -> String {
        match (data_type, self) {
            (ColumnType::Float64, Cell::Int(i)) => format_float(*i as f64),
            _ => self.render(),
        }
    }

    /// Numeric value for float columns, which may hold integers too
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Integral floats keep a trailing `.0` so they read back as floats.
/// Large and tiny magnitudes use exponent notation.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{:?}", value)
    }
}

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every value is null
    Null,
    Boolean,
    Int64,
    /// Floats, or integers mixed with floats
    Float64,
    Utf8,
    /// Arrays or objects rendered as JSON text
    Json,
    /// Incompatible value kinds in one column
    Mixed,
}

impl ColumnType {
    /// Widen two column types into one that can hold both
    pub fn merge(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (ColumnType::Null, t) | (t, ColumnType::Null) => t,
            (a, b) if a == b => a,
            (ColumnType::Int64, ColumnType::Float64) | (ColumnType::Float64, ColumnType::Int64) => {
                ColumnType::Float64
            }
            _ => ColumnType::Mixed,
        }
    }

    /// Infer the type of a column from its values
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> ColumnType {
        cells
            .into_iter()
            .fold(ColumnType::Null, |acc, cell| acc.merge(cell.data_type()))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Null => "null",
            ColumnType::Boolean => "bool",
            ColumnType::Int64 => "int64",
            ColumnType::Float64 => "float64",
            ColumnType::Utf8 => "string",
            ColumnType::Json => "json",
            ColumnType::Mixed => "mixed",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data_type: ColumnType,
}

/// How a table was derived from its JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum TableOrigin {
    /// One row per array element
    Records,
    /// One row from a flattened object
    FlattenedObject,
    /// One row holding the whole object after flattening failed
    WrappedObject { reason: FlattenError },
}

/// Ordered columns and rows produced from one JSON document
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    origin: TableOrigin,
}

impl Table {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn origin(&self) -> &TableOrigin {
        &self.origin
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Values of one column in row order
    pub fn column_cells(&self, column: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// First `n` rows, keeping the column types of the full table
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
            origin: self.origin.clone(),
        }
    }
}

/// Accumulates columns in order of first appearance and rows of cells
#[derive(Debug, Default)]
pub struct TableBuilder {
    names: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of a column, registering it when seen for the first time
    pub fn column(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Append a row from `(column index, cell)` pairs
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = (usize, Cell)>) {
        let mut row = vec![Cell::Null; self.names.len()];
        for (idx, cell) in cells {
            if idx >= row.len() {
                row.resize(idx + 1, Cell::Null);
            }
            row[idx] = cell;
        }
        self.rows.push(row);
    }

    /// Pad every row to the final width and infer column types
    pub fn build(self, origin: TableOrigin) -> Table {
        let width = self.names.len();
        let mut rows = self.rows;
        for row in &mut rows {
            row.resize(width, Cell::Null);
        }

        let columns: Vec<Column> = self
            .names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                name,
                data_type: ColumnType::infer(rows.iter().map(|row| &row[idx])),
            })
            .collect();

        Table {
            columns,
            rows,
            origin,
        }
    }
}
