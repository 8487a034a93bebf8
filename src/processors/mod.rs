pub mod cleaner;
pub mod enricher;
pub mod pipeline;
pub mod validity_checker;

pub use cleaner::{CleanedTable, CoordinateCleaner};
pub use enricher::{
    EnrichmentReport, GeocodeOutcome, GeocodingEnricher, InvalidCoordinatePolicy, RowOutcome,
};
pub use pipeline::{GeocodePipeline, LoadPath, PipelineOptions, PipelineSummary};
pub use validity_checker::{InvalidRow, ValidityChecker, ValidityReport};
