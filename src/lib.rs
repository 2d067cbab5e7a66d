// Bangladesh Locations - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod dataset;
pub mod export;
pub mod query;
pub mod taxonomy;

// Re-export commonly used types
pub use dataset::{load_default, load_from_path, load_from_str, EMBEDDED_DATASET};
pub use export::{export_csv, flat_rows, FlatRow};
pub use query::{LocationQuery, PathIndex};
pub use taxonomy::{
    Area, AreaType, District, Division, LocationTaxonomy, Thana, ValidationError,
    ValidationResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
