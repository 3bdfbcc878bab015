//! Configuration options for JSON/CSV conversion

use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Structured text formats the converter understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// A JSON array of objects
    Json,
    /// Delimited text with a header row
    Csv,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Csv => "csv",
        }
    }

    /// File extension used when writing this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// The format on the other side of a conversion
    pub fn counterpart(&self) -> Self {
        match self {
            DataFormat::Json => DataFormat::Csv,
            DataFormat::Csv => DataFormat::Json,
        }
    }

    /// Infer the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        ext.parse().ok()
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "csv" => Ok(DataFormat::Csv),
            other => Err(format!("Invalid format '{}'. Use 'json' or 'csv'", other)),
        }
    }
}

/// Parse a delimiter given by name (`comma`, `tab`, `pipe`, `semicolon`)
/// or as a single character.
pub fn parse_delimiter(s: &str) -> Result<char, String> {
    match s.to_lowercase().as_str() {
        "comma" => return Ok(','),
        "tab" | "\\t" => return Ok('\t'),
        "pipe" => return Ok('|'),
        "semicolon" => return Ok(';'),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => check_delimiter(c).map(|_| c),
        _ => Err(format!(
            "Invalid delimiter '{}'. Use a single character or 'comma', 'tab', 'pipe', 'semicolon'",
            s
        )),
    }
}

fn check_delimiter(c: char) -> Result<(), String> {
    if c == '"' || c == '\n' || c == '\r' {
        return Err(format!("Delimiter {:?} cannot be used in CSV", c));
    }
    Ok(())
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Format of the raw input
    pub input_format: DataFormat,
    /// Format to produce
    pub output_format: DataFormat,
    /// CSV cell delimiter
    pub delimiter: char,
    /// Explicit CSV columns, in output order
    pub fields: Option<Vec<String>>,
    /// Flatten nested objects into dotted-path columns
    pub flatten: bool,
    /// Pretty-print JSON output (vs compact)
    pub pretty: bool,
    /// Reject CSV lines that end inside a quoted field
    pub strict_quotes: bool,
    /// Maximum nesting depth followed while flattening
    pub max_depth: Option<usize>,
    /// Maximum input size in bytes
    pub memory_limit: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_format: DataFormat::Json,
            output_format: DataFormat::Csv,
            delimiter: ',',
            fields: None,
            flatten: false,
            pretty: true,
            strict_quotes: false,
            memory_limit: 100 * 1024 * 1024, // 100MB
            max_depth: Some(1000),
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON array in, CSV out
    pub fn json_to_csv() -> Self {
        Self::default()
    }

    /// CSV in, JSON array out
    pub fn csv_to_json() -> Self {
        Self {
            input_format: DataFormat::Csv,
            output_format: DataFormat::Json,
            ..Default::default()
        }
    }

    /// Set the input and output formats
    pub fn with_formats(mut self, input: DataFormat, output: DataFormat) -> Self {
        self.input_format = input;
        self.output_format = output;
        self
    }

    /// Set the CSV delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self, String> {
        check_delimiter(delimiter)?;
        self.delimiter = delimiter;
        Ok(self)
    }

    /// Restrict and order CSV columns
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Enable/disable flattening of nested objects
    pub fn with_flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable/disable strict quote checking for CSV input
    pub fn with_strict_quotes(mut self, strict: bool) -> Self {
        self.strict_quotes = strict;
        self
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        check_delimiter(self.delimiter)?;

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
