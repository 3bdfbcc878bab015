use crate::conversion::config::ConversionConfig;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::InputSource;

/// Reject a source whose size is known up front and exceeds the limit.
/// Stdin has no known size and always passes here.
pub fn check_source_size_before_read(
    source: &InputSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    match source.estimated_size() {
        Some(size) => check_input_size(size, config),
        None => Ok(()),
    }
}

/// Reject input larger than the configured memory limit
pub fn check_input_size(size: u64, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit as u64 {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size: size as usize,
                limit: config.memory_limit,
            },
        ));
    }

    Ok(())
}
