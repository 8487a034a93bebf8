use crate::error::{ProcessingError, Result};
use crate::utils::constants::{CLEAN_CHECK_LINES, COMMA, SEMICOLON};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parse a delimiter given on the command line or in settings.
///
/// Accepts a single ASCII character, or `\t` / `tab` for tab-separated files.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }

    match value.as_bytes() {
        [byte] if byte.is_ascii() && !byte.is_ascii_alphanumeric() && *byte != b'"' => Ok(*byte),
        _ => Err(ProcessingError::Config(format!(
            "Invalid delimiter '{}'. Expected a single punctuation character such as ',' or ';'",
            value
        ))),
    }
}

/// Pick a delimiter from a header line: ',' if present, else ';', else ','
pub fn detect_delimiter(first_line: &str) -> u8 {
    if first_line.contains(',') {
        COMMA
    } else if first_line.contains(';') {
        SEMICOLON
    } else {
        COMMA
    }
}

/// Best-effort check for input that needs no cleaning.
///
/// Looks at the first few lines: when every non-empty one contains the
/// delimiter and has no spaces besides a single space after a delimiter,
/// the file is treated as clean and its delimiter returned. Commas are
/// tried before semicolons.
///
/// This is a string heuristic and will accept some dirty files (for example
/// a semicolon file whose values contain commas). Callers must still coerce
/// coordinates and fall back to full cleaning if reading the file fails.
pub fn already_cleaned<S: AsRef<str>>(lines: &[S]) -> Option<u8> {
    let non_empty: Vec<&str> = lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .collect();

    [COMMA, SEMICOLON].into_iter().find(|&delimiter| {
        let separator = delimiter as char;
        let padded = format!("{} ", separator);
        non_empty
            .iter()
            .all(|line| line.contains(separator) && !line.replace(&padded, "").contains(' '))
    })
}

/// Run [`already_cleaned`] against the leading lines of a file
pub fn file_already_cleaned(path: &Path) -> Result<Option<u8>> {
    let reader = BufReader::new(File::open(path)?);

    let mut lines = Vec::with_capacity(CLEAN_CHECK_LINES);
    for line in reader.split(b'\n').take(CLEAN_CHECK_LINES) {
        let bytes = line?;
        let (text, _, _) = encoding_rs::UTF_8.decode(&bytes);
        lines.push(text.into_owned());
    }

    Ok(already_cleaned(&lines))
}
