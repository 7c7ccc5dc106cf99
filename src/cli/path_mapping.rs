use std::path::{Path, PathBuf};

use crate::formatter::OutputFormat;

/// Map an output format to its file inside `output_dir`.
pub fn map_output_path(output_dir: &Path, format: OutputFormat) -> PathBuf {
    output_dir.join(format.file_name())
}

/// Create the output directory if needed and return its output paths
pub fn prepare_output_dir(
    output_dir: &Path,
    formats: &[OutputFormat],
) -> std::io::Result<Vec<(OutputFormat, PathBuf)>> {
    std::fs::create_dir_all(output_dir)?;
    Ok(formats
        .iter()
        .map(|&format| (format, map_output_path(output_dir, format)))
        .collect())
}
