//! Core conversion engine: load once, encode each format independently

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::formatter::{self, EncodedOutput, OutputFormat};
use crate::parser::{parse_bytes, JsonSource};
use crate::table::{table_from_value, Table};
use std::time::Instant;
use tracing::{debug, info};

/// Result of encoding one output format
#[derive(Debug)]
pub struct FormatOutcome {
    pub format: OutputFormat,
    pub result: ConversionResult<EncodedOutput>,
}

/// Everything one conversion produced
#[derive(Debug)]
pub struct ConversionReport {
    pub table: Table,
    pub outputs: Vec<FormatOutcome>,
    pub statistics: ConversionStatistics,
}

impl ConversionReport {
    /// Successfully encoded output for a format
    pub fn output(&self, format: OutputFormat) -> Option<&EncodedOutput> {
        self.outputs
            .iter()
            .find(|o| o.format == format)
            .and_then(|o| o.result.as_ref().ok())
    }

    /// Formats that failed, with their errors
    pub fn failures(&self) -> impl Iterator<Item = (OutputFormat, &ConversionError)> + '_ {
        self.outputs
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.format, e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.outputs.iter().all(|o| o.result.is_ok())
    }
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Read a source and build its table
    pub fn load(&self, source: &JsonSource) -> ConversionResult<Table> {
        let input = self.read_source(source)?;
        self.load_bytes(&input)
    }

    /// Build a table from raw JSON bytes
    pub fn load_bytes(&self, input: &[u8]) -> ConversionResult<Table> {
        limits::check_input_size(input.len(), &self.config)?;
        let value = parse_bytes(input).map_err(ConversionError::ParseError)?;
        table_from_value(&value, &self.config)
    }

    /// Encode a loaded table into one format
    pub fn encode(&self, table: &Table, format: OutputFormat) -> ConversionResult<EncodedOutput> {
        formatter::encode(table, format, &self.config).map_err(ConversionError::from)
    }

    /// Load a source and encode it into every requested format.
    ///
    /// Loading failures abort the conversion. Encoding failures are kept per
    /// format and never prevent the other formats from being produced.
    pub fn convert(
        &self,
        source: &JsonSource,
        formats: &[OutputFormat],
    ) -> ConversionResult<ConversionReport> {
        let start_time = Instant::now();

        let input = self.read_source(source)?;
        let table = self.load_bytes(&input)?;
        info!(
            source = %source.description(),
            rows = table.row_count(),
            columns = table.column_count(),
            "table loaded"
        );

        let mut statistics = ConversionStatistics::for_load(
            input.len() as u64,
            table.shape(),
            start_time.elapsed(),
        );

        let mut outputs = Vec::with_capacity(formats.len());
        for &format in formats {
            let encode_start = Instant::now();
            let result = self.encode(&table, format);
            match &result {
                Ok(output) => debug!(%format, bytes = output.len(), "encoded"),
                Err(e) => debug!(%format, error = %e, "encoding failed"),
            }
            statistics.record_output(
                format.as_str(),
                result.as_ref().ok().map(|o| o.len() as u64),
                encode_start.elapsed(),
            );
            outputs.push(FormatOutcome { format, result });
        }

        statistics.finish(start_time.elapsed());

        Ok(ConversionReport {
            table,
            outputs,
            statistics,
        })
    }

    fn read_source(&self, source: &JsonSource) -> ConversionResult<Vec<u8>> {
        limits::check_source_size_before_read(source, &self.config)?;
        source.read_bytes().map_err(|e| {
            let path = match source {
                JsonSource::File(path) => Some(path.clone()),
                _ => None,
            };
            ConversionError::conversion_with_source(
                ConversionErrorKind::io(format!("Failed to read {}: {}", source.description(), e), path),
                e.into(),
            )
        })
    }
}

/// Convert JSON bytes into every output format
pub fn convert_json_bytes(
    input: &[u8],
    config: &ConversionConfig,
) -> ConversionResult<ConversionReport> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert(&JsonSource::Bytes(input.to_vec()), &OutputFormat::ALL)
}

/// Convert JSON text into every output format
pub fn convert_json_string(
    json_str: &str,
    config: &ConversionConfig,
) -> ConversionResult<ConversionReport> {
    convert_json_bytes(json_str.as_bytes(), config)
}
