pub mod constants;
pub mod coordinates;
pub mod events;
pub mod progress;

pub use constants::*;
pub use coordinates::{coerce_coordinate, format_coordinate};
pub use events::{Event, EventSink, OutputKind, RecordingSink, TracingSink};
pub use progress::ProgressReporter;
