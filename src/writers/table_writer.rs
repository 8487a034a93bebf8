use crate::error::Result;
use crate::models::CoordinateTable;
use crate::utils::constants::COMMA;
use csv::WriterBuilder;
use std::fs;
use std::path::Path;
use tempfile::Builder;

/// Serializes a [`CoordinateTable`] as delimited text.
///
/// Output is staged in a temporary file next to the destination and moved
/// into place once complete, so a failed write never leaves a partial table.
/// A new file gets the usual umask-derived mode; an existing one keeps its
/// permissions.
pub struct TableWriter {
    delimiter: u8,
}

impl TableWriter {
    pub fn new() -> Self {
        Self { delimiter: COMMA }
    }

    pub fn write(&self, table: &CoordinateTable, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let mut staged = builder.tempfile_in(parent)?;
        {
            let mut writer = WriterBuilder::new()
                .delimiter(self.delimiter)
                .from_writer(staged.as_file_mut());
            writer.write_record(table.headers())?;
            for row in table.rows() {
                writer.write_record(row.cells())?;
            }
            writer.flush()?;
        }
        if let Ok(existing) = fs::metadata(path) {
            staged.as_file().set_permissions(existing.permissions())?;
        }
        staged.as_file_mut().sync_all()?;
        staged.persist(path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl Default for TableWriter {
    fn default() -> Self {
        Self::new()
    }
}
