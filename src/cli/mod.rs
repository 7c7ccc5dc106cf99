//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::conversion::config::{DelimiterType, ParquetCompression};
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::formatter::preview::PreviewOptions;
use crate::formatter::OutputFormat;
use crate::parser::filter::looks_like_inline_json;
use crate::parser::JsonSource;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "jsontab")]
#[command(about = "Convert a JSON document to CSV and Parquet tables")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input JSON source (file path or inline JSON)
    #[arg()]
    pub input: Option<String>,

    /// Read JSON from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Directory for converted.csv / converted.parquet (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output formats to produce
    #[arg(long, value_enum, default_value_t = FormatChoice::Both)]
    pub format: FormatChoice,

    /// Write CSV to standard output instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Separator for flattened object keys (default: ".")
    #[arg(long)]
    pub separator: Option<String>,

    /// Deepest object level to flatten (default: unlimited)
    #[arg(long)]
    pub max_level: Option<usize>,

    /// CSV delimiter: comma, tab, or pipe (default: comma)
    #[arg(long)]
    pub delimiter: Option<Delimiter>,

    /// Parquet compression codec (default: snappy)
    #[arg(long)]
    pub compression: Option<Compression>,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Rows shown in the preview (default: 100)
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Do not print the table preview
    #[arg(long)]
    pub no_preview: bool,

    /// Only load the table and report its shape, don't write outputs
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Output conversion statistics as JSON on stderr
    #[arg(long)]
    pub stats_json: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// Which outputs to produce
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatChoice {
    Csv,
    Parquet,
    Both,
}

impl FormatChoice {
    pub fn formats(&self) -> Vec<OutputFormat> {
        match self {
            FormatChoice::Csv => vec![OutputFormat::Csv],
            FormatChoice::Parquet => vec![OutputFormat::Parquet],
            FormatChoice::Both => OutputFormat::ALL.to_vec(),
        }
    }
}

/// Delimiter types for CLI
#[derive(ValueEnum, Debug, Clone)]
pub enum Delimiter {
    #[value(name = "comma", alias = ",")]
    Comma,
    #[value(name = "tab", alias = "\t")]
    Tab,
    #[value(name = "pipe", alias = "|")]
    Pipe,
}

impl From<Delimiter> for DelimiterType {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Comma => DelimiterType::Comma,
            Delimiter::Tab => DelimiterType::Tab,
            Delimiter::Pipe => DelimiterType::Pipe,
        }
    }
}

/// Parquet codecs for CLI
#[derive(ValueEnum, Debug, Clone)]
pub enum Compression {
    Snappy,
    Zstd,
    Gzip,
    Lz4,
    #[value(alias = "uncompressed")]
    None,
}

impl From<Compression> for ParquetCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Snappy => ParquetCompression::Snappy,
            Compression::Zstd => ParquetCompression::Zstd,
            Compression::Gzip => ParquetCompression::Gzip,
            Compression::Lz4 => ParquetCompression::Lz4,
            Compression::None => ParquetCompression::Uncompressed,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        if args.stdout && args.format == FormatChoice::Parquet {
            return Err(configuration_error(
                "--stdout writes CSV only; it cannot be combined with --format parquet",
            ));
        }

        if args.stdin && args.input.is_some() {
            return Err(configuration_error(
                "Use either --stdin or an input argument, not both",
            ));
        }

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let defaults = ConversionConfig::default();

        let config = ConversionConfig {
            separator: args.separator.clone().unwrap_or(defaults.separator),
            max_level: args.max_level,
            delimiter: args
                .delimiter
                .clone()
                .map(Into::into)
                .unwrap_or(defaults.delimiter),
            compression: args
                .compression
                .clone()
                .map(Into::into)
                .unwrap_or(defaults.compression),
            memory_limit: parse_memory_limit(&args.memory_limit)?,
            preview_rows: args.preview_rows.unwrap_or(defaults.preview_rows),
            ..defaults
        };

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Resolve the input arguments into a JSON source
    pub fn source(&self) -> ConversionResult<JsonSource> {
        if self.args.stdin {
            return Ok(JsonSource::Stdin);
        }

        match &self.args.input {
            Some(input) if looks_like_inline_json(input) => Ok(JsonSource::String(input.clone())),
            Some(input) => Ok(JsonSource::File(PathBuf::from(input))),
            None => Err(configuration_error(
                "No input provided. Use --stdin or provide an input path",
            )),
        }
    }

    /// Requested output formats
    pub fn formats(&self) -> Vec<OutputFormat> {
        if self.args.stdout {
            vec![OutputFormat::Csv]
        } else {
            self.args.format.formats()
        }
    }

    /// Directory the converted files are written to
    pub fn output_dir(&self) -> PathBuf {
        self.args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Preview settings for the current terminal
    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            rows: self.conversion_config.preview_rows,
            cell_width: self.conversion_config.preview_cell_width,
            max_width: Some(CliUtils::get_terminal_size().0 as usize),
            color: CliUtils::should_use_color(),
        }
    }

    /// Check if the preview should be printed
    pub fn show_preview(&self) -> bool {
        !self.args.no_preview && !self.args.quiet && !self.args.stdout
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if only validation is requested
    pub fn is_validate_only(&self) -> bool {
        self.args.validate_only
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }
}

fn configuration_error(message: &str) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::configuration(message.to_string()))
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(100 * 1024 * 1024); // 100MB default
    };

    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || configuration_error(&format!("Invalid memory limit: {}", limit_str));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }

    /// Check if output should be colored
    pub fn should_use_color() -> bool {
        // Check if stdout is a terminal and supports color
        atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err()
    }

    /// Get the terminal size
    pub fn get_terminal_size() -> (u16, u16) {
        terminal_size::terminal_size()
            .map(|(width, height)| (width.0, height.0))
            .unwrap_or((80, 24))
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    match error {
        ConversionError::ParseError(err) => {
            if let Some(preview) = &err.input_preview {
                eprintln!("\n{}", preview);
            }
            eprintln!("\nTip: Use --validate-only to check the input before converting");
        }
        ConversionError::UnsupportedShape { .. } => {
            eprintln!("\nTip: Provide a JSON array of objects, or a single JSON object");
        }
        ConversionError::Conversion {
            kind: ConversionErrorKind::JsonTooLarge { .. },
            ..
        } => {
            eprintln!("\nTip: Use --memory-limit to increase the input size allowance");
        }
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'jsontab --help' for usage information.");
}
