//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversion::config::{parse_delimiter, DataFormat};
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::ConversionError;
use crate::parser::InputSource;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "tabconv")]
#[command(about = "Convert JSON arrays to CSV and CSV back to JSON")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input file or directory (default: standard input)
    #[arg(short = 'i', long)]
    pub input_file: Option<PathBuf>,

    /// Output file or directory (default: standard output)
    #[arg(short = 'o', long)]
    pub output_file: Option<PathBuf>,

    /// Input format (default: from the input file extension)
    #[arg(long, value_enum)]
    pub input_format: Option<Format>,

    /// Output format (default: from the output file extension, else the other format)
    #[arg(long, value_enum)]
    pub output_format: Option<Format>,

    /// CSV delimiter: a single character, or comma, tab, pipe, semicolon
    #[arg(short, long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: char,

    /// Fields to include in CSV output, in order (space separated)
    #[arg(short, long, num_args = 1..)]
    pub fields: Option<Vec<String>>,

    /// Flatten nested JSON objects into dotted column names
    #[arg(long)]
    pub flatten: bool,

    /// Read input from standard input
    #[arg(long, conflicts_with = "input_file")]
    pub stdin: bool,

    /// Write compact JSON instead of pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Fail on CSV lines that end inside a quoted field
    #[arg(long)]
    pub strict_quotes: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Print conversion statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Format names accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Json,
    Csv,
}

impl From<Format> for DataFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => DataFormat::Json,
            Format::Csv => DataFormat::Csv,
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

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Build the conversion config, inferring formats from file extensions
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let input_format = resolve_input_format(args)?;
        let output_format = args
            .output_format
            .map(DataFormat::from)
            .or_else(|| args.output_file.as_deref().and_then(DataFormat::from_path))
            .unwrap_or_else(|| input_format.counterpart());

        let config = ConversionConfig {
            input_format,
            output_format,
            delimiter: args.delimiter,
            fields: args.fields.clone(),
            flatten: args.flatten,
            pretty: !args.plain,
            strict_quotes: args.strict_quotes,
            memory_limit: parse_memory_limit(&args.memory_limit)?,
            ..ConversionConfig::default()
        };

        config
            .validate()
            .map_err(ConversionError::configuration)?;

        Ok(config)
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Input path when it names a directory
    pub fn input_directory(&self) -> Option<&Path> {
        self.args.input_file.as_deref().filter(|p| p.is_dir())
    }

    /// Where the input text comes from
    pub fn input_source(&self) -> InputSource {
        match &self.args.input_file {
            Some(path) if !self.args.stdin => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        }
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        match self.input_source() {
            InputSource::File(path) => format!("'{}'", path.display()),
            other => other.description(),
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output_file {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

fn resolve_input_format(args: &Args) -> ConversionResult<DataFormat> {
    if let Some(format) = args.input_format {
        return Ok(format.into());
    }

    args.input_file
        .as_deref()
        .filter(|_| !args.stdin)
        .and_then(DataFormat::from_path)
        .ok_or_else(|| {
            ConversionError::configuration(
                "Cannot determine input format; use --input-format json|csv",
            )
        })
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    const UNITS: &[(&str, f64)] = &[
        ("GB", 1024.0 * 1024.0 * 1024.0),
        ("MB", 1024.0 * 1024.0),
        ("KB", 1024.0),
        ("B", 1.0),
    ];

    let Some(raw) = limit else {
        return Ok(100 * 1024 * 1024); // 100MB default
    };
    let limit_str = raw.trim().to_uppercase();
    let invalid = || ConversionError::configuration(format!("Invalid memory limit: {}", raw));

    for (suffix, factor) in UNITS {
        if let Some(size) = limit_str.strip_suffix(suffix) {
            let value = size.trim().parse::<f64>().map_err(|_| invalid())?;
            return Ok((value * factor) as usize);
        }
    }

    // Assume bytes
    limit_str.parse::<usize>().map_err(|_| invalid())
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

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
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
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match error {
        ConversionError::FormatError(_) => {
            eprintln!("\nTip: --input-format and --output-format must differ (json or csv)");
        }
        ConversionError::ParseError(err) => {
            if let Some(preview) = &err.input_preview {
                eprintln!("\n{}", preview);
            }
        }
        _ if error.to_string().contains("Input too large") => {
            eprintln!("\nTip: Use --memory-limit to increase the allowed input size");
        }
        _ => {}
    }

    eprintln!("\nTry 'tabconv --help' for usage information.");
}
