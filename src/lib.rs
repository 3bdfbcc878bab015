//! JSON ⇄ CSV tabular data converter
//!
//! Converts a JSON array of objects into delimited text with a header row,
//! and delimited text back into a JSON array, with optional flattening of
//! nested objects into dotted-path columns.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{ConversionConfig, ConversionEngine, ConversionResult, ConvertedData, DataFormat};
pub use error::{ConversionError, ConversionErrorKind, FormatError, ParseError};
pub use formatter::{csv_to_json, flatten_object, json_to_csv, TabularData};
pub use parser::{parse_csv_line, InputSource};

/// Convert raw input text according to `config`, returning the output text
pub fn convert(raw_input: &str, config: &ConversionConfig) -> ConversionResult<String> {
    Ok(convert_with_metadata(raw_input, config)?.content)
}

/// Convert raw input text and keep the conversion metadata
pub fn convert_with_metadata(
    raw_input: &str,
    config: &ConversionConfig,
) -> ConversionResult<ConvertedData> {
    conversion::convert_string(raw_input, config)
}
