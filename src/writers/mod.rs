pub mod sample_writer;
pub mod table_writer;

pub use sample_writer::{create_sample_file, SAMPLE_COORDINATES};
pub use table_writer::TableWriter;
