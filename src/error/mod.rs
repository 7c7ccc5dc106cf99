//! Error types and handling infrastructure for JSON to table conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Kind of JSON value found at the top of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    pub fn of(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonKind::Null,
            serde_json::Value::Bool(_) => JsonKind::Bool,
            serde_json::Value::Number(_) => JsonKind::Number,
            serde_json::Value::String(_) => JsonKind::String,
            serde_json::Value::Array(_) => JsonKind::Array,
            serde_json::Value::Object(_) => JsonKind::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secondary error kinds raised around the conversion itself
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("JSON too large: {size} bytes (limit: {limit} bytes)")]
    JsonTooLarge { size: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("Unsupported JSON shape: found {found}, expected a list of objects or a flat object")]
    UnsupportedShape { found: JsonKind, detail: Option<String> },

    #[error(transparent)]
    EncodingError(#[from] EncodingError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn unsupported_shape(found: JsonKind) -> Self {
        Self::UnsupportedShape {
            found,
            detail: None,
        }
    }

    pub fn unsupported_shape_with_detail(found: JsonKind, detail: String) -> Self {
        Self::UnsupportedShape {
            found,
            detail: Some(detail),
        }
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "JSON parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("JSON parse error: {}", err.message)
                }
            }
            Self::UnsupportedShape { found, detail } => {
                let mut message = format!(
                    "Unsupported JSON shape ({}): upload a list of objects or a flat object",
                    found
                );
                if let Some(detail) = detail {
                    message.push_str(&format!(" ({})", detail));
                }
                message
            }
            Self::EncodingError(err) => format!("{} encoding failed: {}", err.format_name(), err),
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::JsonTooLarge { size, limit } => {
                    format!(
                        "JSON input too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => format!("{} ({})", message, path.display()),
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Failures while producing an output encoding
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("column '{column}' mixes value types ({found}) and has no Parquet representation")]
    UnsupportedColumnType { column: String, found: String },

    #[error("table has no columns")]
    EmptySchema,

    #[error("CSV writer error: {message}")]
    Csv { message: String },

    #[error("Parquet writer error: {message}")]
    Writer { message: String },
}

impl EncodingError {
    pub fn csv(message: String) -> Self {
        Self::Csv { message }
    }

    pub fn writer(message: String) -> Self {
        Self::Writer { message }
    }

    /// Name of the output format the error belongs to
    pub fn format_name(&self) -> &'static str {
        match self {
            Self::Csv { .. } => "CSV",
            Self::UnsupportedColumnType { .. } | Self::EmptySchema | Self::Writer { .. } => {
                "Parquet"
            }
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;
