//! Error types and handling infrastructure for JSON/CSV conversion

use crate::conversion::config::DataFormat;
use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Failure kinds that are neither parse nor format errors
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Maximum nesting depth exceeded at '{path}' (limit: {limit})")]
    MaxDepthExceeded { path: String, limit: usize },

    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },
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
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    FormatError(#[from] FormatError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::conversion(ConversionErrorKind::configuration(message.into()))
    }

    pub fn read_failed(error: &std::io::Error, path: Option<PathBuf>) -> Self {
        Self::conversion(ConversionErrorKind::io(
            format!("Failed to read input file: {}", error),
            path,
        ))
    }

    pub fn write_failed(error: &std::io::Error, path: Option<PathBuf>) -> Self {
        Self::conversion(ConversionErrorKind::io(
            format!("Failed to write output file: {}", error),
            path,
        ))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => err.to_string(),
            Self::FormatError(err) => err.to_string(),
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::Io { message, path } => match path {
                    Some(path) => format!("{} ({})", message, path.display()),
                    None => message.clone(),
                },
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!(
                        "Input too large: {} bytes (limit: {} bytes)",
                        size, limit
                    )
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// Which input syntax failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Json,
    Csv,
}

impl ParseErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ParseErrorKind::Json => "JSON",
            ParseErrorKind::Csv => "CSV",
        }
    }
}

/// Input parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            kind,
            message,
            location,
            input_preview: None,
        }
    }

    pub fn json(message: String, location: Option<(usize, usize)>) -> Self {
        Self::new(ParseErrorKind::Json, message, location)
    }

    pub fn csv(message: String, location: Option<(usize, usize)>) -> Self {
        Self::new(ParseErrorKind::Csv, message, location)
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse {}: {}", self.kind.label(), self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Input has the wrong shape, or the requested conversion does not exist
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("JSON data must be an array (found {found})")]
    NotAnArray { found: &'static str },

    #[error("Unsupported conversion: {from} to {to}")]
    UnsupportedConversion { from: DataFormat, to: DataFormat },
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
