use clap::Parser;
use std::io::Write;
use std::time::Duration;

use anyhow::Result;

use tabconv::cli::{handle_error, Args, CliConfig, CliUtils};
use tabconv::conversion::batch::convert_directory;
use tabconv::conversion::engine::write_output;
use tabconv::conversion::stats::ConversionStatistics;
use tabconv::conversion::ConversionEngine;
use tabconv::{logging, ConversionError};

fn main() {
    let args = Args::parse();
    logging::init_cli_logger(args.verbose, args.quiet);

    if let Err(error) = run(args) {
        match error.downcast_ref::<ConversionError>() {
            Some(conversion_error) => handle_error(conversion_error),
            None => CliUtils::show_error(&format!("{:#}", error)),
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let cli = CliConfig::from_args(args)?;
    tracing::debug!(config = ?cli.conversion_config, "resolved configuration");

    // Fail on an unsupported pair before touching any file
    let engine = ConversionEngine::new(cli.conversion_config.clone());
    engine.check()?;

    match cli.input_directory() {
        Some(_) => handle_directory(&cli),
        None => handle_single(&cli, &engine),
    }
}

fn handle_single(cli: &CliConfig, engine: &ConversionEngine) -> Result<()> {
    let source = cli.input_source();
    tracing::debug!(source = %source.description(), "reading input");
    let result = engine.convert_from_source(&source)?;

    match &cli.args.output_file {
        Some(path) => {
            write_output(path, &result.content)?;
            CliUtils::show_success(
                &format!(
                    "Converted {} to {}",
                    cli.input_description(),
                    cli.output_description()
                ),
                cli.is_quiet(),
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(result.content.as_bytes())?;
            if !result.content.is_empty() {
                writeln!(stdout)?;
            }
        }
    }

    if cli.want_stats() {
        output_statistics(&ConversionStatistics::for_conversion(&result.metadata), cli.is_quiet());
    }

    Ok(())
}

fn handle_directory(cli: &CliConfig) -> Result<()> {
    let input_dir = cli
        .input_directory()
        .ok_or_else(|| anyhow::anyhow!("Input directory not found"))?;
    let output_dir = cli
        .args
        .output_file
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Output directory required for directory conversion"))?;

    let progress = (!cli.is_quiet()).then(|| CliUtils::create_progress_bar(0));
    let report = convert_directory(
        input_dir,
        output_dir,
        &cli.conversion_config,
        cli.args.recursive,
        cli.continue_on_error(),
        progress.as_ref(),
    );
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let report = report?;

    if report.converted.is_empty() && report.failed.is_empty() {
        CliUtils::show_warning(
            &format!(
                "No {} files found in {}",
                cli.conversion_config.input_format,
                input_dir.display()
            ),
            cli.is_quiet(),
        );
        return Ok(());
    }

    for (input, output) in &report.converted {
        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        CliUtils::show_success(
            &format!("{} -> {}", relative.display(), output.display()),
            cli.is_quiet(),
        );
    }
    for (input, message) in &report.failed {
        CliUtils::show_error(&format!("Error converting {}: {}", input.display(), message));
    }

    if cli.want_stats() {
        output_statistics(&report.stats, cli.is_quiet());
    }

    Ok(())
}

fn output_statistics(stats: &ConversionStatistics, quiet: bool) {
    if quiet {
        return;
    }

    eprintln!("\nConversion Statistics:");
    eprintln!("{}", stats.summary());
    eprintln!(
        "Input size: {}",
        CliUtils::format_file_size(stats.input_size_bytes)
    );
    eprintln!(
        "Output size: {}",
        CliUtils::format_file_size(stats.output_size_bytes)
    );
    eprintln!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
    );
}
