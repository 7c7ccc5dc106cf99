//! Classification of a parsed JSON document into a table-producing shape

use crate::error::{ConversionError, ConversionResult, JsonKind};
use serde_json::{Map, Value};

/// Layout of the elements of a top-level array
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLayout<'a> {
    /// No elements
    Empty,
    /// Every element is an object
    Objects(Vec<&'a Map<String, Value>>),
    /// Every element is an array; values are positional
    Arrays(Vec<&'a [Value]>),
    /// Every element is a scalar (null, boolean, number or string)
    Scalars(&'a [Value]),
}

/// Table-producing shape of a JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum JsonShape<'a> {
    Records(RecordLayout<'a>),
    Object(&'a Map<String, Value>),
}

/// Dispatch a JSON value once into the shape the loader builds from.
///
/// Top-level scalars and arrays that mix containers with other values are
/// rejected as unsupported.
pub fn classify(value: &Value) -> ConversionResult<JsonShape<'_>> {
    match value {
        Value::Array(items) => classify_records(items).map(JsonShape::Records),
        Value::Object(map) => Ok(JsonShape::Object(map)),
        other => Err(ConversionError::unsupported_shape(JsonKind::of(other))),
    }
}

fn classify_records(items: &[Value]) -> ConversionResult<RecordLayout<'_>> {
    let Some(first) = items.first() else {
        return Ok(RecordLayout::Empty);
    };

    match first {
        Value::Object(_) => items
            .iter()
            .map(|item| item.as_object().ok_or_else(|| mixed_elements("objects", item)))
            .collect::<ConversionResult<Vec<_>>>()
            .map(RecordLayout::Objects),
        Value::Array(_) => items
            .iter()
            .map(|item| {
                item.as_array()
                    .map(Vec::as_slice)
                    .ok_or_else(|| mixed_elements("arrays", item))
            })
            .collect::<ConversionResult<Vec<_>>>()
            .map(RecordLayout::Arrays),
        _ => match items.iter().find(|item| item.is_object() || item.is_array()) {
            Some(item) => Err(mixed_elements("scalars", item)),
            None => Ok(RecordLayout::Scalars(items)),
        },
    }
}

fn mixed_elements(expected: &str, found: &Value) -> ConversionError {
    ConversionError::unsupported_shape_with_detail(
        JsonKind::Array,
        format!(
            "array of {} also contains a {} element",
            expected,
            JsonKind::of(found)
        ),
    )
}
