use crate::error::Result;
use crate::utils::constants::{LATITUDE_COLUMN, LONGITUDE_COLUMN};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Known-good coordinates used to bootstrap a first run
pub const SAMPLE_COORDINATES: [(&str, &str); 9] = [
    ("27.340833", "35.708333"),
    ("26.255833", "36.444444"),
    ("28.451389", "36.504722"),
    ("28.396951", "36.525397"),
    ("28.410278", "36.545278"),
    ("28.421136", "36.565740"),
    ("28.356111", "36.567222"),
    ("28.423833", "36.569083"),
    ("28.416944", "36.582500"),
];

/// Write the sample dataset to `path` using `delimiter`
pub fn create_sample_file(path: &Path, delimiter: u8) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let separator = delimiter as char;
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{}{}{}", LATITUDE_COLUMN, separator, LONGITUDE_COLUMN)?;
    for (latitude, longitude) in SAMPLE_COORDINATES {
        writeln!(writer, "{}{}{}", latitude, separator, longitude)?;
    }
    writer.flush()?;

    Ok(())
}
