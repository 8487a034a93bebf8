pub mod delimiter;
pub mod table_reader;

pub use delimiter::{already_cleaned, detect_delimiter, file_already_cleaned, parse_delimiter};
pub use table_reader::{LoadedTable, TableReader};
