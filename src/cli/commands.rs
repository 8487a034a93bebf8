use crate::cli::args::Cli;
use crate::error::ProcessingError;
use crate::geocoding::GoogleGeocoder;
use crate::processors::{GeocodePipeline, PipelineOptions, PipelineSummary, ValidityChecker};
use crate::readers::parse_delimiter;
use crate::settings::Settings;
use crate::utils::events::TracingSink;
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber: console on stderr, optionally a plain-text file
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coord_geocoder={}", level)));

    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let file_layer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Resolve settings with command-line overrides applied
pub fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    if let Some(timeout) = cli.timeout {
        settings.timeout_secs = Some(timeout);
    }
    if let Some(ref language) = cli.language {
        settings.language = Some(language.clone());
    }
    if let Some(policy) = cli.invalid_coordinates {
        settings.invalid_coordinates = policy;
    }
    settings.check().context("Invalid settings")?;

    Ok(settings)
}

/// Build pipeline options from flags and settings
pub fn pipeline_options(cli: &Cli, settings: &Settings) -> Result<PipelineOptions> {
    let delimiter = cli
        .delimiter
        .as_deref()
        .map(parse_delimiter)
        .transpose()
        .context("Invalid --delimiter")?;

    let mut options = PipelineOptions::new(&cli.input, &cli.output);
    options.cleaned = cli.cleaned.clone();
    options.delimiter = delimiter;
    options.sample_delimiter = settings.sample_delimiter()?;
    options.create_sample = cli.create_sample;
    options.skip_cleaning = cli.skip_cleaning;
    options.invalid_policy = settings.invalid_coordinates;
    options.show_progress = !cli.quiet;

    Ok(options)
}

pub fn run(cli: Cli) -> Result<PipelineSummary> {
    if cli.verbose {
        info!("Verbose logging enabled");
    }

    let settings = resolve_settings(&cli)?;
    let options = pipeline_options(&cli, &settings)?;
    let geocoder = GoogleGeocoder::new(&cli.api_key, &settings)
        .context("Failed to set up the geocoding client")?;

    info!("Input file: {}", options.input.display());
    info!("Output file: {}", options.output.display());

    let summary = GeocodePipeline::new(options, geocoder)
        .run(&TracingSink)
        .map_err(|e| match e {
            ProcessingError::Parse { .. } | ProcessingError::Schema { .. } => {
                anyhow::Error::new(e)
                    .context("Failed to process coordinates. Check the input file format.")
            }
            other => anyhow::Error::new(other),
        })?;

    if let Some(ref report) = summary.validity {
        println!("\n{}", ValidityChecker::new().generate_summary(report));
    }
    println!("{}", summary.enrichment.summary());

    Ok(summary)
}
