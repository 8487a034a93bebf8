use crate::error::{ProcessingError, Result};
use crate::models::CoordinateTable;
use crate::processors::validity_checker::{ValidityChecker, ValidityReport};
use crate::readers::TableReader;
use crate::utils::events::{Event, EventSink, OutputKind};
use crate::writers::TableWriter;
use std::path::Path;

/// Result of a cleaning pass
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub table: CoordinateTable,
    pub delimiter: u8,
    pub report: ValidityReport,
}

/// Loads a delimited coordinate file and normalizes it.
///
/// Header names are trimmed, latitude/longitude cells are coerced to numbers
/// (unparsable cells become empty), and rows failing the range check are
/// reported but kept.
pub struct CoordinateCleaner {
    delimiter: Option<u8>,
}

impl CoordinateCleaner {
    pub fn new() -> Self {
        Self { delimiter: None }
    }

    /// Use a fixed delimiter instead of detecting one from the header line
    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn clean(
        &self,
        input_path: &Path,
        output_path: Option<&Path>,
        sink: &dyn EventSink,
    ) -> Result<CleanedTable> {
        let loaded = TableReader::new()
            .with_delimiter(self.delimiter)
            .with_trim_headers(true)
            .read(input_path)
            .map_err(|e| match e {
                ProcessingError::Io(io) => ProcessingError::Parse {
                    path: input_path.to_path_buf(),
                    message: io.to_string(),
                },
                other => other,
            })?;

        sink.record(Event::DelimiterResolved {
            delimiter: loaded.delimiter as char,
            detected: loaded.detected,
        });

        let mut table = loaded.table;
        table.normalize_coordinates();

        let report = ValidityChecker::new()
            .with_display_delimiter(loaded.delimiter as char)
            .check(&table);
        if !report.is_clean() {
            sink.record(Event::InvalidCoordinates {
                count: report.invalid_count(),
                rows: report.invalid_lines(),
            });
        }

        if let Some(path) = output_path {
            TableWriter::new().write(&table, path)?;
            sink.record(Event::TableWritten {
                path: path.to_path_buf(),
                rows: table.len(),
                kind: OutputKind::Cleaned,
            });
        }

        Ok(CleanedTable {
            table,
            delimiter: loaded.delimiter,
            report,
        })
    }
}

impl Default for CoordinateCleaner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::events::RecordingSink;
    use std::fs;
    use tempfile::TempDir;

    fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_clean_semicolon_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = write_input(&temp_dir, "in.csv", "Latitude;Longitude\n27.34 ;35.70\n");
        let sink = RecordingSink::new();

        let cleaned = CoordinateCleaner::new()
            .with_delimiter(Some(b';'))
            .clean(&input, None, &sink)?;

        assert_eq!(cleaned.table.len(), 1);
        let coordinate = cleaned.table.rows()[0].coordinate();
        assert_eq!(coordinate.latitude, Some(27.34));
        assert_eq!(coordinate.longitude, Some(35.70));
        assert!(cleaned.report.is_clean());
        assert_eq!(
            sink.count_where(|e| matches!(e, Event::InvalidCoordinates { .. })),
            0
        );

        Ok(())
    }

    #[test]
    fn test_out_of_range_rows_are_kept() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = write_input(&temp_dir, "in.csv", "Latitude,Longitude\n200,35\n");
        let sink = RecordingSink::new();

        let cleaned = CoordinateCleaner::new().clean(&input, None, &sink)?;

        assert_eq!(cleaned.table.len(), 1);
        assert_eq!(cleaned.report.invalid_count(), 1);
        assert!(sink.events().contains(&Event::InvalidCoordinates {
            count: 1,
            rows: vec!["row 1: 200,35 (latitude 200 is outside [-90, 90])".to_string()],
        }));

        Ok(())
    }

    #[test]
    fn test_writes_cleaned_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = write_input(
            &temp_dir,
            "in.csv",
            " Site ; Latitude ; Longitude \nA; 27.340833 ; 35.708333\nB;north;36.4\n",
        );
        let output = temp_dir.path().join("cleaned.csv");
        let sink = RecordingSink::new();

        let cleaned = CoordinateCleaner::new().clean(&input, Some(&output), &sink)?;

        assert_eq!(cleaned.delimiter, b';');
        let written = fs::read_to_string(&output)?;
        assert_eq!(
            written,
            "Site,Latitude,Longitude\nA,27.340833,35.708333\nB,,36.4\n"
        );
        assert_eq!(
            sink.count_where(|e| matches!(
                e,
                Event::TableWritten {
                    kind: OutputKind::Cleaned,
                    rows: 2,
                    ..
                }
            )),
            1
        );

        Ok(())
    }

    #[test]
    fn test_missing_columns_fail_without_output() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let input = write_input(&temp_dir, "in.csv", "Lat,Lon\n1,2\n");
        let output = temp_dir.path().join("cleaned.csv");

        let result = CoordinateCleaner::new().clean(&input, Some(&output), &RecordingSink::new());

        assert!(matches!(result, Err(ProcessingError::Schema { .. })));
        assert!(!output.exists());

        Ok(())
    }

    #[test]
    fn test_unreadable_file_is_parse_failure() {
        let result = CoordinateCleaner::new().clean(
            Path::new("missing/input.csv"),
            None,
            &RecordingSink::new(),
        );
        assert!(matches!(result, Err(ProcessingError::Parse { .. })));
    }
}
