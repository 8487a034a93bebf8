use crate::error::{ProcessingError, Result};
use crate::models::CoordinateTable;
use crate::readers::delimiter::detect_delimiter;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// A parsed table together with the delimiter it was read with
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub table: CoordinateTable,
    pub delimiter: u8,
    pub detected: bool,
}

/// Reads delimited coordinate files into a [`CoordinateTable`]
pub struct TableReader {
    delimiter: Option<u8>,
    trim_headers: bool,
}

impl TableReader {
    /// Auto-detect the delimiter and trim header names
    pub fn new() -> Self {
        Self {
            delimiter: None,
            trim_headers: true,
        }
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim_headers(mut self, trim_headers: bool) -> Self {
        self.trim_headers = trim_headers;
        self
    }

    /// Read and parse a file
    pub fn read(&self, path: &Path) -> Result<LoadedTable> {
        let text = read_text(path)?;
        self.parse(&text, path)
    }

    /// Parse already-decoded text; `source` is only used in error messages
    pub fn parse(&self, text: &str, source: &Path) -> Result<LoadedTable> {
        let parse_error = |message: String| ProcessingError::Parse {
            path: source.to_path_buf(),
            message,
        };

        if text.trim().is_empty() {
            return Err(parse_error("No columns to parse from file".to_string()));
        }

        let (delimiter, detected) = match self.delimiter {
            Some(d) => (d, false),
            None => (detect_delimiter(text.lines().next().unwrap_or("").trim()), true),
        };

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| parse_error(e.to_string()))?
            .iter()
            .map(|h| {
                if self.trim_headers {
                    h.trim().to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| parse_error(e.to_string()))?;
            // Whitespace-only lines count as blank
            if record.len() == 1 && record[0].trim().is_empty() {
                continue;
            }
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        debug!(
            "Parsed {} rows with {} columns from {}",
            records.len(),
            headers.len(),
            source.display()
        );

        let table = CoordinateTable::from_records(headers, records).map_err(|e| match e {
            ProcessingError::RowWidth { .. } => parse_error(e.to_string()),
            other => other,
        })?;

        Ok(LoadedTable {
            table,
            delimiter,
            detected,
        })
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file as text, honouring a byte-order mark and replacing invalid
/// UTF-8 sequences rather than failing
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        warn!(
            "{} contains bytes that are not valid {}; they were replaced",
            path.display(),
            encoding.name()
        );
    }
    Ok(text.into_owned())
}
