use crate::cli::path_mapping::map_input_to_output;
use crate::conversion::engine::{ConversionEngine, ConvertedData};
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::directory::find_input_files;
use crate::parser::InputSource;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Batch convert multiple sources. Optionally continue on errors.
pub fn convert_batch_sources(
    sources: Vec<InputSource>,
    config: &ConversionConfig,
    continue_on_error: bool,
) -> ConversionResult<Vec<(InputSource, ConvertedData)>> {
    let engine = ConversionEngine::new(config.clone());
    let mut results = Vec::new();

    for src in sources {
        match engine.convert_from_source(&src) {
            Ok(data) => results.push((src, data)),
            Err(e) => {
                if continue_on_error {
                    tracing::warn!(source = %src.description(), "{}", e.user_message());
                    continue;
                } else {
                    return Err(e);
                }
            }
        }
    }

    Ok(results)
}

/// Outcome of converting a directory
#[derive(Debug, Default)]
pub struct DirectoryReport {
    /// (input, output) pairs written
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Inputs that failed, with the error message
    pub failed: Vec<(PathBuf, String)>,
    pub stats: ConversionStatistics,
}

/// Convert every input-format file under `input_dir` into `output_dir`,
/// mirroring the directory structure and swapping the extension.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    config: &ConversionConfig,
    recursive: bool,
    continue_on_error: bool,
    progress: Option<&ProgressBar>,
) -> ConversionResult<DirectoryReport> {
    let engine = ConversionEngine::new(config.clone());
    engine.check()?;

    let files = find_input_files(input_dir, config.input_format, recursive).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::io(
            format!("Failed to list input directory: {}", e),
            Some(input_dir.to_path_buf()),
        ))
    })?;

    tracing::info!(
        count = files.len(),
        dir = %input_dir.display(),
        "found {} files",
        config.input_format
    );
    if let Some(pb) = progress {
        pb.set_length(files.len() as u64);
    }

    let mut report = DirectoryReport::default();
    for input in files {
        let output = map_input_to_output(
            input_dir,
            &input,
            output_dir,
            config.output_format.extension(),
        );

        match engine.convert_file(&input, &output) {
            Ok(data) => {
                report.stats.record(&data.metadata);
                report.converted.push((input, output));
            }
            Err(e) => {
                let message = e.user_message();
                tracing::debug!(file = %input.display(), "{}", message);
                report.stats.record_failure();
                if !continue_on_error {
                    return Err(ConversionError::conversion_with_source(
                        ConversionErrorKind::ConversionFailed {
                            message: format!(
                                "Aborting at {}: {}",
                                input.display(),
                                message
                            ),
                        },
                        e.into(),
                    ));
                }
                report.failed.push((input, message));
            }
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(report)
}
