use crate::error::{ProcessingError, Result};
use crate::geocoding::ReverseGeocoder;
use crate::models::CoordinateTable;
use crate::processors::cleaner::{CleanedTable, CoordinateCleaner};
use crate::processors::enricher::{EnrichmentReport, GeocodingEnricher, InvalidCoordinatePolicy};
use crate::processors::validity_checker::ValidityReport;
use crate::readers::{file_already_cleaned, TableReader};
use crate::utils::constants::SAMPLE_DELIMITER;
use crate::utils::events::{Event, EventSink};
use crate::utils::progress::ProgressReporter;
use crate::writers::create_sample_file;
use std::path::PathBuf;

/// Everything a single run needs, resolved from flags and settings
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub cleaned: Option<PathBuf>,
    pub delimiter: Option<u8>,
    pub sample_delimiter: u8,
    pub create_sample: bool,
    pub skip_cleaning: bool,
    pub invalid_policy: InvalidCoordinatePolicy,
    pub show_progress: bool,
}

impl PipelineOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            cleaned: None,
            delimiter: None,
            sample_delimiter: SAMPLE_DELIMITER,
            create_sample: false,
            skip_cleaning: false,
            invalid_policy: InvalidCoordinatePolicy::default(),
            show_progress: false,
        }
    }
}

/// How the table reached the enricher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPath {
    /// Read as-is after the already-cleaned check passed (or was forced)
    Precleaned,
    /// Went through the cleaner
    Cleaned,
    /// Already-cleaned read failed and the cleaner ran instead
    CleanedAfterFallback,
}

#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub load_path: LoadPath,
    pub sample_created: bool,
    pub validity: Option<ValidityReport>,
    pub enrichment: EnrichmentReport,
}

/// Drives sample creation, cleaning and enrichment in sequence
pub struct GeocodePipeline<G: ReverseGeocoder> {
    options: PipelineOptions,
    enricher: GeocodingEnricher<G>,
}

impl<G: ReverseGeocoder> GeocodePipeline<G> {
    pub fn new(options: PipelineOptions, geocoder: G) -> Self {
        let enricher = GeocodingEnricher::new(geocoder).with_policy(options.invalid_policy);
        Self { options, enricher }
    }

    pub fn run(&self, sink: &dyn EventSink) -> Result<PipelineSummary> {
        let sample_created = self.ensure_input(sink)?;
        let (mut table, load_path, validity) = self.load(sink)?;

        let progress = ProgressReporter::new(
            table.len() as u64,
            "Geocoding coordinates...",
            !self.options.show_progress,
        );
        let enrichment =
            self.enricher
                .enrich(&mut table, &self.options.output, sink, Some(&progress))?;

        Ok(PipelineSummary {
            load_path,
            sample_created,
            validity,
            enrichment,
        })
    }

    /// Make sure the input exists, writing the sample dataset if allowed
    fn ensure_input(&self, sink: &dyn EventSink) -> Result<bool> {
        if self.options.input.exists() {
            return Ok(false);
        }
        if !self.options.create_sample {
            return Err(ProcessingError::InputNotFound {
                path: self.options.input.clone(),
            });
        }

        let delimiter = self.options.delimiter.unwrap_or(self.options.sample_delimiter);
        create_sample_file(&self.options.input, delimiter)?;
        sink.record(Event::SampleCreated {
            path: self.options.input.clone(),
        });
        Ok(true)
    }

    fn load(
        &self,
        sink: &dyn EventSink,
    ) -> Result<(CoordinateTable, LoadPath, Option<ValidityReport>)> {
        if self.is_precleaned(sink) {
            sink.record(Event::CleaningSkipped);
            match TableReader::new()
                .with_trim_headers(false)
                .read(&self.options.input)
            {
                Ok(loaded) => return Ok((loaded.table, LoadPath::Precleaned, None)),
                Err(e) => sink.record(Event::CleaningFallback {
                    reason: e.to_string(),
                }),
            }
            let cleaned = self.clean(sink)?;
            return Ok((
                cleaned.table,
                LoadPath::CleanedAfterFallback,
                Some(cleaned.report),
            ));
        }

        let cleaned = self.clean(sink)?;
        Ok((cleaned.table, LoadPath::Cleaned, Some(cleaned.report)))
    }

    fn clean(&self, sink: &dyn EventSink) -> Result<CleanedTable> {
        CoordinateCleaner::new()
            .with_delimiter(self.options.delimiter)
            .clean(&self.options.input, self.options.cleaned.as_deref(), sink)
    }

    fn is_precleaned(&self, sink: &dyn EventSink) -> bool {
        if self.options.skip_cleaning {
            return true;
        }

        // An unreadable file simply goes through the cleaner, which reports it
        match file_already_cleaned(&self.options.input) {
            Ok(Some(delimiter)) => {
                sink.record(Event::AlreadyCleaned {
                    delimiter: delimiter as char,
                });
                true
            }
            _ => false,
        }
    }
}
