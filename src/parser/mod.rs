//! Input acquisition and parsing module

pub mod csv;
pub mod directory;
pub mod filter;

pub use self::csv::{parse_csv, parse_csv_line, split_records};

use crate::error::{ConversionError, FormatError, ParseError, ParseResult};
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// Where raw input text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Raw text given directly
    String(String),
    /// A single file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl InputSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::String(_) => "string input".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Get the size of the source in bytes (if known before reading)
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            InputSource::String(s) => Some(s.len() as u64),
            InputSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            InputSource::Stdin => None,
        }
    }

    /// Read the whole source as UTF-8 text
    pub fn read_content(&self) -> Result<String, ConversionError> {
        match self {
            InputSource::String(content) => Ok(content.clone()),
            InputSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| ConversionError::read_failed(&e, Some(path.clone()))),
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ConversionError::read_failed(&e, None))?;
                Ok(buffer)
            }
        }
    }
}

/// Parse JSON text into a value
pub fn parse_json(content: &str) -> ParseResult<Value> {
    serde_json::from_str(content).map_err(|e| {
        let location = extract_error_location(&e);
        ParseError::json(e.to_string(), location).with_preview(get_error_preview(content, &e))
    })
}

/// Parse JSON text whose root must be an array of records
pub fn parse_json_array(content: &str) -> Result<Vec<Value>, ConversionError> {
    match parse_json(content)? {
        Value::Array(items) => Ok(items),
        other => Err(FormatError::NotAnArray {
            found: value_type_name(&other),
        }
        .into()),
    }
}

/// Short name of a JSON value's type, for messages
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// serde_json reports line 0 for errors that carry no position
fn extract_error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    match (error.line(), error.column()) {
        (0, _) => None,
        (line, column) => Some((line, column)),
    }
}

/// Show the offending line with a caret under the failing column
fn get_error_preview(content: &str, error: &serde_json::Error) -> String {
    if let Some((line, col)) = extract_error_location(error) {
        if let Some(error_line) = content.lines().nth(line - 1) {
            let caret = col.saturating_sub(1).min(error_line.chars().count());
            return format!("{}\n{}^", error_line, " ".repeat(caret));
        }
    }

    "Context not available".to_string()
}
