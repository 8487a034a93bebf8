use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DelimiterResolved {
        delimiter: char,
        detected: bool,
    },
    AlreadyCleaned {
        delimiter: char,
    },
    CleaningSkipped,
    CleaningFallback {
        reason: String,
    },
    InvalidCoordinates {
        count: usize,
        rows: Vec<String>,
    },
    TableWritten {
        path: PathBuf,
        rows: usize,
        kind: OutputKind,
    },
    SampleCreated {
        path: PathBuf,
    },
    GeocodeStarted {
        latitude: String,
        longitude: String,
        position: usize,
        total: usize,
    },
    GeocodeFailed {
        latitude: String,
        longitude: String,
        reason: String,
    },
    GeocodeSkipped {
        position: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Cleaned,
    Geocoded,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::DelimiterResolved {
                delimiter,
                detected: true,
            } => write!(f, "Detected delimiter '{}'", delimiter),
            Event::DelimiterResolved {
                delimiter,
                detected: false,
            } => write!(f, "Using delimiter '{}'", delimiter),
            Event::AlreadyCleaned { delimiter } => write!(
                f,
                "Detected that input file appears to be already cleaned ('{}'-delimited, no extra spaces)",
                delimiter
            ),
            Event::CleaningSkipped => {
                write!(f, "Skipping cleaning step as file appears to be already cleaned")
            }
            Event::CleaningFallback { reason } => write!(
                f,
                "Error reading the cleaned file: {}. Attempting to clean the file anyway...",
                reason
            ),
            Event::InvalidCoordinates { count, rows } => {
                write!(
                    f,
                    "Found {} invalid coordinates that were kept but may need review",
                    count
                )?;
                for row in rows {
                    write!(f, "\n  {}", row)?;
                }
                Ok(())
            }
            Event::TableWritten {
                path,
                kind: OutputKind::Cleaned,
                ..
            } => write!(f, "Cleaned coordinates saved to {}", path.display()),
            Event::TableWritten {
                path,
                kind: OutputKind::Geocoded,
                ..
            } => write!(f, "Results saved to {}", path.display()),
            Event::SampleCreated { path } => {
                write!(f, "Created sample file {} with the provided data", path.display())
            }
            Event::GeocodeStarted {
                latitude,
                longitude,
                position,
                total,
            } => write!(
                f,
                "Processing coordinates {}, {} ({}/{})",
                latitude, longitude, position, total
            ),
            Event::GeocodeFailed {
                latitude,
                longitude,
                reason,
            } => write!(f, "Error with coordinates {}, {}: {}", latitude, longitude, reason),
            Event::GeocodeSkipped { position, reason } => {
                write!(f, "Skipped geocoding for row {}: {}", position, reason)
            }
        }
    }
}

/// Receiver for pipeline events. Processing code never prints; it hands
/// each [`Event`] to the sink the caller supplied.
pub trait EventSink {
    fn record(&self, event: Event);
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: Event) {
        match &event {
            Event::InvalidCoordinates { .. }
            | Event::CleaningFallback { .. }
            | Event::GeocodeFailed { .. }
            | Event::GeocodeSkipped { .. } => warn!("{}", event),
            Event::DelimiterResolved { .. } => debug!("{}", event),
            _ => info!("{}", event),
        }
    }
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn count_where(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_format() {
        let event = Event::GeocodeStarted {
            latitude: "27.34".to_string(),
            longitude: "35.7".to_string(),
            position: 1,
            total: 9,
        };
        assert_eq!(event.to_string(), "Processing coordinates 27.34, 35.7 (1/9)");
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.record(Event::CleaningSkipped);
        sink.record(Event::SampleCreated {
            path: PathBuf::from("coords.csv"),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Event::CleaningSkipped);
        assert_eq!(
            sink.count_where(|e| matches!(e, Event::SampleCreated { .. })),
            1
        );
    }

    #[test]
    fn test_invalid_coordinates_lists_rows() {
        let event = Event::InvalidCoordinates {
            count: 1,
            rows: vec!["row 2: 200,35".to_string()],
        };
        let text = event.to_string();
        assert!(text.starts_with("Found 1 invalid coordinates"));
        assert!(text.contains("row 2: 200,35"));
    }
}
