use crate::conversion::config::ConversionConfig;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::JsonSource;

/// Check the source size before attempting to read or parse the JSON.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &JsonSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    match source.estimated_size() {
        Some(size) => check_input_size(size as usize, config),
        None => Ok(()),
    }
}

/// Check the size of input that has already been read
pub fn check_input_size(size: usize, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit {
        return Err(ConversionError::conversion(
            ConversionErrorKind::JsonTooLarge {
                size,
                limit: config.memory_limit,
            },
        ));
    }
    Ok(())
}
