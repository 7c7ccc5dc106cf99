//! Flattening of nested objects into compound column names
//!
//! `{"a": {"b": 1}}` becomes the single column `a.b`. Top-level values that
//! are not objects come first, followed by the flattened nested keys, each
//! group in document order. Empty nested objects contribute no column.
//!
//! Flattening fails, with a typed [`FlattenError`], when two key paths join
//! to the same column name or when nesting exceeds the configured depth.

use serde_json::{Map, Value};
use std::collections::HashSet;

/// Options controlling how far and with what separator keys are joined
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenOptions {
    /// Joins parent and child keys
    pub separator: String,
    /// Objects nested deeper than this are kept whole; `None` descends fully
    pub max_level: Option<usize>,
    /// Nesting depth at which flattening gives up
    pub max_depth: usize,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            separator: ".".to_string(),
            max_level: None,
            max_depth: 100,
        }
    }
}

impl FlattenOptions {
    fn descends(&self, level: usize) -> bool {
        self.max_level.map_or(true, |max| level < max)
    }
}

/// Reasons an object cannot be flattened into one row
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    #[error("key path '{key}' is produced more than once")]
    KeyCollision { key: String },

    #[error("object nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

/// Flatten an object into `(column name, value)` pairs for a single row
pub fn flatten_object<'a>(
    object: &'a Map<String, Value>,
    options: &FlattenOptions,
) -> Result<Vec<(String, &'a Value)>, FlattenError> {
    let mut flat = Vec::with_capacity(object.len());
    let mut nested = Vec::new();

    for (key, value) in object {
        match value {
            Value::Object(inner) if options.descends(0) => nested.push((key, inner)),
            _ => flat.push((key.clone(), value)),
        }
    }

    for (key, inner) in nested {
        flatten_into(inner, key, 1, options, &mut flat)?;
    }

    let mut seen = HashSet::with_capacity(flat.len());
    for (name, _) in &flat {
        if !seen.insert(name.as_str()) {
            return Err(FlattenError::KeyCollision { key: name.clone() });
        }
    }

    Ok(flat)
}

fn flatten_into<'a>(
    object: &'a Map<String, Value>,
    prefix: &str,
    level: usize,
    options: &FlattenOptions,
    out: &mut Vec<(String, &'a Value)>,
) -> Result<(), FlattenError> {
    if level > options.max_depth {
        return Err(FlattenError::TooDeep {
            limit: options.max_depth,
        });
    }

    for (key, value) in object {
        let name = format!("{}{}{}", prefix, options.separator, key);
        match value {
            Value::Object(inner) if options.descends(level) => {
                flatten_into(inner, &name, level + 1, options, out)?
            }
            _ => out.push((name, value)),
        }
    }

    Ok(())
}
