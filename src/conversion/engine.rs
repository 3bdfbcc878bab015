//! Core conversion engine for JSON/CSV transformation

use crate::conversion::config::{ConversionConfig, DataFormat};
use crate::conversion::limits;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind, FormatError};
use crate::formatter::{csv_to_json, format_json, is_record, json_to_csv};
use crate::parser::{parse_csv, parse_json_array, InputSource};
use crate::validation::TableValidator;
use std::path::Path;
use std::time::Instant;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct ConvertedData {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl ConvertedData {
    /// Create a new conversion result
    pub fn new(content: String, metadata: ConversionMetadata) -> Self {
        Self { content, metadata }
    }

    /// Get the formatted output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the conversion process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionMetadata {
    pub input_format: Option<DataFormat>,
    pub output_format: Option<DataFormat>,
    pub input_size: u64,
    pub output_size: u64,
    /// Data rows written (CSV) or records produced (JSON)
    pub row_count: usize,
    pub column_count: usize,
    /// JSON array elements that were neither objects nor arrays
    pub skipped_records: usize,
    pub processing_time_ms: u64,
}

/// Main conversion engine
#[derive(Debug, Clone)]
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

    /// Reject unsupported format pairs and inconsistent settings.
    /// Runs before any input is read.
    pub fn check(&self) -> ConversionResult<()> {
        let (from, to) = (self.config.input_format, self.config.output_format);
        if from == to {
            return Err(FormatError::UnsupportedConversion { from, to }.into());
        }

        self.config
            .validate()
            .map_err(ConversionError::configuration)
    }

    /// Convert raw input text to the configured output format.
    /// In-memory text is not subject to `memory_limit`; sources are.
    pub fn convert(&self, raw_input: &str) -> ConversionResult<ConvertedData> {
        let start_time = Instant::now();

        self.check()?;

        tracing::debug!(
            from = %self.config.input_format,
            to = %self.config.output_format,
            bytes = raw_input.len(),
            "converting"
        );

        let mut metadata = ConversionMetadata {
            input_format: Some(self.config.input_format),
            output_format: Some(self.config.output_format),
            input_size: raw_input.len() as u64,
            ..Default::default()
        };

        let content = match self.config.input_format {
            DataFormat::Json => self.json_to_csv(raw_input, &mut metadata)?,
            DataFormat::Csv => self.csv_to_json(raw_input, &mut metadata)?,
        };

        metadata.output_size = content.len() as u64;
        metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;

        Ok(ConvertedData::new(content, metadata))
    }

    /// Read a source and convert it, enforcing `memory_limit`
    pub fn convert_from_source(&self, source: &InputSource) -> ConversionResult<ConvertedData> {
        self.check()?;
        limits::check_source_size_before_read(source, &self.config)?;

        let content = source.read_content()?;
        if source.estimated_size().is_none() {
            // stdin: the size is only known once read
            limits::check_input_size(content.len() as u64, &self.config)?;
        }
        self.convert(&content)
    }

    /// Convert one file into another, creating the output's parent directories
    pub fn convert_file(&self, input: &Path, output: &Path) -> ConversionResult<ConvertedData> {
        let source = InputSource::File(input.to_path_buf());
        let result = self.convert_from_source(&source)?;
        write_output(output, &result.content)?;
        Ok(result)
    }

    fn json_to_csv(&self, raw: &str, metadata: &mut ConversionMetadata) -> ConversionResult<String> {
        let records = parse_json_array(raw)?;
        let table = json_to_csv(&records, &self.config)?;

        TableValidator::new(true).validate(&table)?;

        metadata.row_count = table.row_count();
        metadata.column_count = table.column_count();
        metadata.skipped_records = records.iter().filter(|r| !is_record(r)).count();

        Ok(table.render(self.config.delimiter))
    }

    fn csv_to_json(&self, raw: &str, metadata: &mut ConversionMetadata) -> ConversionResult<String> {
        let table = parse_csv(raw, self.config.delimiter, self.config.strict_quotes)?;

        let report = TableValidator::new(false).validate(&table)?;
        if !report.ragged_rows.is_empty() {
            tracing::warn!(
                rows = ?report.ragged_rows,
                "rows with a different cell count than the header"
            );
        }
        if !report.duplicate_headers.is_empty() {
            tracing::warn!(
                headers = ?report.duplicate_headers,
                "duplicate header names, later columns win"
            );
        }

        let records = csv_to_json(&table);
        metadata.row_count = records.len();
        metadata.column_count = table.column_count();

        format_json(records, self.config.pretty)
    }
}

/// Write converted text to a file, creating parent directories
pub fn write_output(path: &Path, content: &str) -> ConversionResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConversionError::write_failed(&e, Some(parent.to_path_buf())))?;
    }

    std::fs::write(path, content)
        .map_err(|e| ConversionError::write_failed(&e, Some(path.to_path_buf())))
}

/// Convert raw text with the given configuration
pub fn convert_string(raw: &str, config: &ConversionConfig) -> ConversionResult<ConvertedData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert(raw)
}

/// Convert the contents of a source
pub fn convert_source(
    source: &InputSource,
    config: &ConversionConfig,
) -> ConversionResult<ConvertedData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_from_source(source)
}

/// Convert one file into another
pub fn convert_file(
    input: &Path,
    output: &Path,
    config: &ConversionConfig,
) -> ConversionResult<ConvertedData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_file(input, output)
}

/// Streaming entry point; reads everything, checks `memory_limit`, then converts
pub fn convert_reader<R: std::io::Read>(
    reader: R,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    let content = std::io::read_to_string(reader).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::Io {
            message: format!("Failed to read stream: {}", e),
            path: None,
        })
    })?;
    limits::check_input_size(content.len() as u64, config)?;

    Ok(convert_string(&content, config)?.content)
}
