//! JSON input sources and parsing

pub mod filter;

use crate::error::{ParseError, ParseResult};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Source of one JSON document
#[derive(Debug, Clone)]
pub enum JsonSource {
    /// Inline JSON text
    String(String),
    /// Raw uploaded bytes
    Bytes(Vec<u8>),
    /// Single JSON file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl JsonSource {
    /// Read the raw document bytes
    pub fn read_bytes(&self) -> Result<Vec<u8>, std::io::Error> {
        match self {
            JsonSource::String(content) => Ok(content.as_bytes().to_vec()),
            JsonSource::Bytes(bytes) => Ok(bytes.clone()),
            JsonSource::File(path) => std::fs::read(path),
            JsonSource::Stdin => {
                let mut buffer = Vec::new();
                std::io::stdin().read_to_end(&mut buffer)?;
                Ok(buffer)
            }
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::Bytes(_) => "uploaded bytes".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }

    /// Get the size of the source in bytes, if it is known without reading it
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            JsonSource::String(s) => Some(s.len() as u64),
            JsonSource::Bytes(b) => Some(b.len() as u64),
            JsonSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            JsonSource::Stdin => None,
        }
    }
}

/// Parse one JSON document from raw bytes.
///
/// A leading UTF-8 byte-order mark is skipped. Empty or whitespace-only
/// input is rejected before reaching the parser.
pub fn parse_bytes(bytes: &[u8]) -> ParseResult<Value> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(ParseError::new("Empty JSON input".to_string(), None));
    }

    serde_json::from_slice(bytes).map_err(|e| {
        let location = error_location(&e);
        let mut err = ParseError::new(format!("Invalid JSON: {}", e), location);
        if let Some(preview) = error_preview(bytes, location) {
            err = err.with_preview(preview);
        }
        err
    })
}

/// Line and column of a serde_json error, when it points into the input
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    if error.line() == 0 {
        None
    } else {
        Some((error.line(), error.column()))
    }
}

/// The offending line with a caret under the reported column
fn error_preview(bytes: &[u8], location: Option<(usize, usize)>) -> Option<String> {
    let (line, col) = location?;
    let text = String::from_utf8_lossy(bytes);
    let error_line = text.lines().nth(line.checked_sub(1)?)?;
    let caret_at = col.saturating_sub(1).min(error_line.chars().count());
    Some(format!("{}\n{}^", error_line, " ".repeat(caret_at)))
}
