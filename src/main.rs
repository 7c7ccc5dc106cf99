use clap::Parser;
use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use jsontab::cli::path_mapping::prepare_output_dir;
use jsontab::cli::{handle_error, Args, CliConfig, CliUtils};
use jsontab::conversion::{ConversionEngine, ConversionReport};
use jsontab::error::ConversionError;
use jsontab::formatter::{render_preview, shape_summary, OutputFormat};
use jsontab::parser::filter::has_json_extension;
use jsontab::parser::JsonSource;
use jsontab::table::Table;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            match err.downcast_ref::<ConversionError>() {
                Some(conversion_error) => handle_error(conversion_error),
                None => CliUtils::show_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG wins over the verbosity flags
fn init_logging(args: &Args) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns whether every requested output was produced
fn run(args: Args) -> Result<bool> {
    let cli = CliConfig::from_args(args)?;
    let source = cli.source()?;
    debug!(source = %source.description(), "resolved input");

    if let JsonSource::File(path) = &source {
        if !has_json_extension(path) {
            CliUtils::show_warning(
                &format!("{} does not have a .json extension", path.display()),
                cli.is_quiet(),
            );
        }
    }

    let engine = ConversionEngine::new(cli.conversion_config.clone());

    if cli.is_validate_only() {
        return handle_validation(&cli, &engine, &source);
    }

    handle_conversion(&cli, &engine, &source)
}

fn handle_validation(
    cli: &CliConfig,
    engine: &ConversionEngine,
    source: &JsonSource,
) -> Result<bool> {
    let table = engine.load(source)?;

    if !cli.is_quiet() {
        println!("✓ Valid JSON table from {}", cli.input_description());
        println!("{}", shape_summary(&table));
        print_column_types(&table);
    }

    Ok(true)
}

fn handle_conversion(
    cli: &CliConfig,
    engine: &ConversionEngine,
    source: &JsonSource,
) -> Result<bool> {
    let formats = cli.formats();
    let report = engine.convert(source, &formats)?;

    if !cli.is_quiet() && !cli.args.stdout {
        println!("{}", shape_summary(&report.table));
        if cli.show_preview() {
            println!("{}", render_preview(&report.table, &cli.preview_options()));
        }
        if cli.is_verbose() {
            print_column_types(&report.table);
        }
    }

    let written = if cli.args.stdout {
        write_stdout(&report)?
    } else {
        write_files(cli, &report)?
    };

    if cli.want_stats() {
        output_statistics(&report, cli.is_quiet());
    }

    if cli.args.stats_json {
        let json = report
            .statistics
            .to_json()
            .context("Failed to serialize statistics")?;
        eprintln!("{}", json);
    }

    Ok(written)
}

/// Write CSV to stdout. Returns whether it succeeded.
fn write_stdout(report: &ConversionReport) -> Result<bool> {
    match report.outputs.iter().find(|o| o.format == OutputFormat::Csv) {
        Some(outcome) => match &outcome.result {
            Ok(output) => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&output.bytes)
                    .and_then(|_| stdout.flush())
                    .context("Failed to write CSV to stdout")?;
                Ok(true)
            }
            Err(e) => {
                CliUtils::show_error(&e.user_message());
                Ok(false)
            }
        },
        None => Ok(false),
    }
}

/// Write every successful output into the output directory.
/// Returns whether all requested formats were written.
fn write_files(cli: &CliConfig, report: &ConversionReport) -> Result<bool> {
    let output_dir = cli.output_dir();
    let formats: Vec<OutputFormat> = report.outputs.iter().map(|o| o.format).collect();
    let paths = prepare_output_dir(&output_dir, &formats).with_context(|| {
        format!("Failed to create output directory {}", output_dir.display())
    })?;

    let mut all_written = true;
    for (outcome, (_, path)) in report.outputs.iter().zip(paths) {
        match &outcome.result {
            Ok(output) => match std::fs::write(&path, &output.bytes) {
                Ok(()) => CliUtils::show_success(
                    &format!(
                        "Wrote {} ({})",
                        path.display(),
                        CliUtils::format_file_size(output.len() as u64)
                    ),
                    cli.is_quiet(),
                ),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "write failed");
                    CliUtils::show_error(&format!("Failed to write {}: {}", path.display(), e));
                    all_written = false;
                }
            },
            Err(e) => {
                CliUtils::show_error(&e.user_message());
                all_written = false;
            }
        }
    }

    Ok(all_written)
}

fn print_column_types(table: &Table) {
    for column in table.columns() {
        println!("  {}: {}", column.name, column.data_type);
    }
}

fn output_statistics(report: &ConversionReport, quiet: bool) {
    if quiet {
        return;
    }

    let stats = &report.statistics;
    eprintln!("\nConversion Statistics:");
    eprintln!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    eprintln!("Table shape: ({}, {})", stats.row_count, stats.column_count);
    eprintln!("Load time: {}ms", stats.load_time_ms);
    for output in &stats.outputs {
        if output.succeeded {
            eprintln!(
                "{}: {} in {}ms ({:.1}% of input)",
                output.format,
                CliUtils::format_file_size(output.output_size_bytes),
                output.encode_time_ms,
                stats.size_ratio(&output.format).unwrap_or(0.0)
            );
        } else {
            eprintln!("{}: failed after {}ms", output.format, output.encode_time_ms);
        }
    }
    eprintln!("Processing time: {}ms", stats.processing_time_ms);
}
