//! Plain-text preview of the first rows of a table

use crate::table::{ColumnType, Table};
use console::{measure_text_width, pad_str, style, truncate_str, Alignment};

const ELLIPSIS: &str = "…";
const COLUMN_GAP: &str = "  ";

/// Options for [`render_preview`]
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Rows shown before the listing is cut
    pub rows: usize,
    /// Widest cell, in terminal columns
    pub cell_width: usize,
    /// Total width available, if known
    pub max_width: Option<usize>,
    /// Emphasise the header with terminal styling
    pub color: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            rows: 100,
            cell_width: 32,
            max_width: None,
            color: false,
        }
    }
}

/// One-line description of the table dimensions
pub fn shape_summary(table: &Table) -> String {
    let (rows, columns) = table.shape();
    format!("Loaded JSON -> table shape ({}, {})", rows, columns)
}

/// Render the head of a table as an aligned grid with a row-index gutter.
///
/// Numeric columns are right-aligned. Columns that do not fit in
/// `max_width` are dropped from the right and counted in a footer line.
pub fn render_preview(table: &Table, options: &PreviewOptions) -> String {
    let head = table.head(options.rows);
    let gutter = head.row_count().saturating_sub(1).to_string().len();

    let texts: Vec<Vec<String>> = head
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(head.columns())
                .map(|(cell, column)| single_line(&cell.render_as(column.data_type)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = head
        .columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            texts
                .iter()
                .map(|row| measure_text_width(&row[idx]))
                .chain(std::iter::once(measure_text_width(&column.name)))
                .max()
                .unwrap_or(0)
                .min(options.cell_width)
        })
        .collect();

    let mut shown = widths.len();
    if let Some(max_width) = options.max_width {
        let mut used = gutter;
        for (idx, width) in widths.iter().enumerate() {
            used += COLUMN_GAP.len() + width;
            if used > max_width {
                shown = idx;
                break;
            }
        }
    }

    let mut lines = Vec::with_capacity(head.row_count() + 2);

    let mut header = " ".repeat(gutter);
    for (column, width) in head.columns().iter().zip(&widths).take(shown) {
        header.push_str(COLUMN_GAP);
        let name = fit(&column.name, *width, align(column.data_type));
        if options.color {
            header.push_str(&style(name).bold().to_string());
        } else {
            header.push_str(&name);
        }
    }
    lines.push(header.trim_end().to_string());

    for (row_idx, row) in texts.iter().enumerate() {
        let mut line = format!("{:>gutter$}", row_idx, gutter = gutter);
        for ((text, column), width) in row.iter().zip(head.columns()).zip(&widths).take(shown) {
            line.push_str(COLUMN_GAP);
            line.push_str(&fit(text, *width, align(column.data_type)));
        }
        lines.push(line.trim_end().to_string());
    }

    let hidden_columns = head.column_count() - shown;
    let hidden_rows = table.row_count() - head.row_count();
    if hidden_rows > 0 || hidden_columns > 0 {
        let mut footer = Vec::new();
        if hidden_rows > 0 {
            footer.push(format!("{} more rows", hidden_rows));
        }
        if hidden_columns > 0 {
            footer.push(format!("{} more columns", hidden_columns));
        }
        lines.push(format!("[{}]", footer.join(", ")));
    }

    lines.join("\n")
}

/// Pad `text` to `width`, cutting it with an ellipsis only when it is wider
fn fit(text: &str, width: usize, alignment: Alignment) -> String {
    if measure_text_width(text) > width {
        let cut = truncate_str(text, width, ELLIPSIS);
        pad_str(&cut, width, alignment, None).into_owned()
    } else {
        pad_str(text, width, alignment, None).into_owned()
    }
}

fn align(data_type: ColumnType) -> Alignment {
    match data_type {
        ColumnType::Int64 | ColumnType::Float64 => Alignment::Right,
        _ => Alignment::Left,
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}
