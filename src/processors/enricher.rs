use crate::error::Result;
use crate::geocoding::ReverseGeocoder;
use crate::models::CoordinateTable;
use crate::utils::constants::{GEOCODING_ERROR, INVALID_COORDINATES, NO_ADDRESS_FOUND};
use crate::utils::events::{Event, EventSink, OutputKind};
use crate::utils::progress::ProgressReporter;
use crate::writers::TableWriter;
use serde::Deserialize;
use std::path::Path;

/// How rows that fail the range check are handled during enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InvalidCoordinatePolicy {
    /// Send numeric pairs to the provider even when out of range
    #[default]
    Geocode,
    /// Do not call the provider; mark the row as invalid
    Skip,
}

/// What happened to one row
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Found(String),
    NoResult,
    Failed(String),
    Skipped(String),
}

impl GeocodeOutcome {
    /// The value written to the address column
    pub fn address(&self) -> &str {
        match self {
            GeocodeOutcome::Found(address) => address,
            GeocodeOutcome::NoResult => NO_ADDRESS_FOUND,
            GeocodeOutcome::Failed(_) => GEOCODING_ERROR,
            GeocodeOutcome::Skipped(_) => INVALID_COORDINATES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    pub index: usize,
    pub latitude: String,
    pub longitude: String,
    pub outcome: GeocodeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentReport {
    pub outcomes: Vec<RowOutcome>,
}

impl EnrichmentReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn found(&self) -> usize {
        self.count(|o| matches!(o, GeocodeOutcome::Found(_)))
    }

    pub fn no_result(&self) -> usize {
        self.count(|o| matches!(o, GeocodeOutcome::NoResult))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, GeocodeOutcome::Failed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, GeocodeOutcome::Skipped(_)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes
            .iter()
            .filter(|row| matches!(row.outcome, GeocodeOutcome::Failed(_)))
    }

    fn count(&self, predicate: impl Fn(&GeocodeOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|row| predicate(&row.outcome)).count()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str("=== Geocoding Report ===\n");
        summary.push_str(&format!("Rows Processed: {}\n", self.total()));
        summary.push_str(&format!("Addresses Found: {}\n", self.found()));
        summary.push_str(&format!("No Address Found: {}\n", self.no_result()));
        summary.push_str(&format!("Geocoding Errors: {}\n", self.failed()));
        if self.skipped() > 0 {
            summary.push_str(&format!("Skipped (invalid coordinates): {}\n", self.skipped()));
        }
        summary
    }
}

/// Record an event with any active progress bar hidden while it is logged
fn emit(sink: &dyn EventSink, progress: Option<&ProgressReporter>, event: Event) {
    match progress {
        Some(p) => p.suspend(|| sink.record(event)),
        None => sink.record(event),
    }
}

/// Annotates each table row with a reverse-geocoded address.
///
/// Rows are processed strictly in order with exactly one provider call per
/// row. A failed lookup is recorded as a placeholder address and never stops
/// the run.
pub struct GeocodingEnricher<G: ReverseGeocoder> {
    geocoder: G,
    policy: InvalidCoordinatePolicy,
}

impl<G: ReverseGeocoder> GeocodingEnricher<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            policy: InvalidCoordinatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: InvalidCoordinatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Annotate every row, then write the table to `output_path`
    pub fn enrich(
        &self,
        table: &mut CoordinateTable,
        output_path: &Path,
        sink: &dyn EventSink,
        progress: Option<&ProgressReporter>,
    ) -> Result<EnrichmentReport> {
        let report = self.annotate(table, sink, progress);

        TableWriter::new().write(table, output_path)?;
        sink.record(Event::TableWritten {
            path: output_path.to_path_buf(),
            rows: table.len(),
            kind: OutputKind::Geocoded,
        });

        Ok(report)
    }

    /// Annotate every row in place without writing anything
    pub fn annotate(
        &self,
        table: &mut CoordinateTable,
        sink: &dyn EventSink,
        progress: Option<&ProgressReporter>,
    ) -> EnrichmentReport {
        table.ensure_address_column();

        let total = table.len();
        let mut report = EnrichmentReport {
            outcomes: Vec::with_capacity(total),
        };

        for index in 0..total {
            let (latitude, longitude) = table.coordinate_text(index);
            let started = Event::GeocodeStarted {
                latitude: latitude.clone(),
                longitude: longitude.clone(),
                position: index + 1,
                total,
            };
            if let Some(p) = progress {
                p.set_message(&started.to_string());
            }
            emit(sink, progress, started);

            let coordinate = table.rows()[index].coordinate();
            let skip = self.policy == InvalidCoordinatePolicy::Skip && !coordinate.is_valid();
            let outcome = if skip {
                let reason = coordinate
                    .problem()
                    .unwrap_or_else(|| "invalid coordinates".to_string());
                emit(
                    sink,
                    progress,
                    Event::GeocodeSkipped {
                        position: index + 1,
                        reason: reason.clone(),
                    },
                );
                GeocodeOutcome::Skipped(reason)
            } else {
                let outcome = match coordinate.pair() {
                    Some((lat, lon)) => self.lookup(lat, lon),
                    None => GeocodeOutcome::Failed(
                        coordinate
                            .problem()
                            .unwrap_or_else(|| "coordinates are not numeric".to_string()),
                    ),
                };
                if let GeocodeOutcome::Failed(ref reason) = outcome {
                    emit(
                        sink,
                        progress,
                        Event::GeocodeFailed {
                            latitude: latitude.clone(),
                            longitude: longitude.clone(),
                            reason: reason.clone(),
                        },
                    );
                }
                outcome
            };

            table.set_address(index, outcome.address());
            report.outcomes.push(RowOutcome {
                index,
                latitude,
                longitude,
                outcome,
            });

            if let Some(p) = progress {
                p.increment(1);
            }
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Geocoded {} rows", total));
        }

        report
    }

    fn lookup(&self, latitude: f64, longitude: f64) -> GeocodeOutcome {
        match self.geocoder.reverse_geocode(latitude, longitude) {
            Ok(results) => match results.into_iter().next() {
                Some(first) => GeocodeOutcome::Found(first.formatted_address),
                None => GeocodeOutcome::NoResult,
            },
            Err(e) => GeocodeOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::geocoding::GeocodeResult;
    use crate::readers::TableReader;
    use crate::utils::events::RecordingSink;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Answers by latitude: 0 fails, negative has no result, anything else is found
    struct StubGeocoder {
        calls: RefCell<Vec<(f64, f64)>>,
    }

    impl StubGeocoder {
        fn new() -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ReverseGeocoder for StubGeocoder {
        fn reverse_geocode(&self, latitude: f64, longitude: f64) -> Result<Vec<GeocodeResult>> {
            self.calls.borrow_mut().push((latitude, longitude));
            if latitude == 0.0 {
                Err(ProcessingError::Geocode("UNKNOWN_ERROR".to_string()))
            } else if latitude < 0.0 {
                Ok(Vec::new())
            } else {
                Ok(vec![
                    GeocodeResult::new(format!("Place {} {}", latitude, longitude)),
                    GeocodeResult::new("Second choice"),
                ])
            }
        }
    }

    fn table(text: &str) -> CoordinateTable {
        TableReader::new()
            .parse(text, &PathBuf::from("input.csv"))
            .unwrap()
            .table
    }

    #[test]
    fn test_outcomes_map_to_addresses() {
        let mut table = table("Latitude,Longitude\n27.34,35.7\n0,0\n-10,20\n");
        let geocoder = StubGeocoder::new();
        let sink = RecordingSink::new();

        let report = GeocodingEnricher::new(&geocoder).annotate(&mut table, &sink, None);

        assert_eq!(table.address(0), Some("Place 27.34 35.7"));
        assert_eq!(table.address(1), Some(GEOCODING_ERROR));
        assert_eq!(table.address(2), Some(NO_ADDRESS_FOUND));
        assert_eq!(report.found(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.no_result(), 1);
        assert_eq!(geocoder.calls.borrow().len(), 3);

        let failure = report.failures().next().unwrap();
        assert_eq!(failure.index, 1);
        assert_eq!(
            failure.outcome,
            GeocodeOutcome::Failed("Geocoding error: UNKNOWN_ERROR".to_string())
        );
    }

    #[test]
    fn test_progress_events_in_order() {
        let mut table = table("Latitude,Longitude\n1,2\n3,4\n");
        let sink = RecordingSink::new();

        GeocodingEnricher::new(StubGeocoder::new()).annotate(&mut table, &sink, None);

        let progress: Vec<String> = sink
            .events()
            .iter()
            .filter(|e| matches!(e, Event::GeocodeStarted { .. }))
            .map(|e| e.to_string())
            .collect();
        assert_eq!(
            progress,
            vec![
                "Processing coordinates 1, 2 (1/2)".to_string(),
                "Processing coordinates 3, 4 (2/2)".to_string(),
            ]
        );
    }

    #[test]
    fn test_events_recorded_while_progress_bar_active() {
        let mut table = table("Latitude,Longitude\n1,2\n0,0\n");
        let sink = RecordingSink::new();
        let progress = ProgressReporter::new(2, "Geocoding coordinates...", false);

        let report =
            GeocodingEnricher::new(StubGeocoder::new()).annotate(&mut table, &sink, Some(&progress));

        assert_eq!(report.total(), 2);
        assert_eq!(sink.count_where(|e| matches!(e, Event::GeocodeStarted { .. })), 2);
        assert_eq!(sink.count_where(|e| matches!(e, Event::GeocodeFailed { .. })), 1);
    }

    #[test]
    fn test_non_numeric_rows_fail_without_calling_provider() {
        let mut table = table("Latitude,Longitude\nabc,2\n");
        let geocoder = StubGeocoder::new();
        let sink = RecordingSink::new();

        let report = GeocodingEnricher::new(&geocoder).annotate(&mut table, &sink, None);

        assert!(geocoder.calls.borrow().is_empty());
        assert_eq!(report.failed(), 1);
        assert_eq!(table.address(0), Some(GEOCODING_ERROR));
        assert!(sink.events().contains(&Event::GeocodeFailed {
            latitude: "abc".to_string(),
            longitude: "2".to_string(),
            reason: "latitude is not numeric".to_string(),
        }));
    }

    #[test]
    fn test_out_of_range_rows_are_geocoded_by_default() {
        let mut table = table("Latitude,Longitude\n200,35\n");
        let geocoder = StubGeocoder::new();

        GeocodingEnricher::new(&geocoder).annotate(&mut table, &RecordingSink::new(), None);

        assert_eq!(*geocoder.calls.borrow(), vec![(200.0, 35.0)]);
    }

    #[test]
    fn test_skip_policy_leaves_provider_alone() {
        let mut table = table("Latitude,Longitude\n200,35\n10,20\n");
        let geocoder = StubGeocoder::new();

        let report = GeocodingEnricher::new(&geocoder)
            .with_policy(InvalidCoordinatePolicy::Skip)
            .annotate(&mut table, &RecordingSink::new(), None);

        assert_eq!(*geocoder.calls.borrow(), vec![(10.0, 20.0)]);
        assert_eq!(report.skipped(), 1);
        assert_eq!(table.address(0), Some(INVALID_COORDINATES));
        assert_eq!(table.address(1), Some("Place 10 20"));
    }

    #[test]
    fn test_report_summary() {
        let mut table = table("Latitude,Longitude\n1,2\n0,0\n");
        let report =
            GeocodingEnricher::new(StubGeocoder::new()).annotate(&mut table, &RecordingSink::new(), None);

        let summary = report.summary();
        assert!(summary.contains("Rows Processed: 2"));
        assert!(summary.contains("Geocoding Errors: 1"));
        assert!(!summary.contains("Skipped"));
    }
}
