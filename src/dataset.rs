// 📂 Dataset Loader - reference data → validated LocationTaxonomy
//
// The taxonomy is reference data, not live data, so it ships as a JSON file
// (data/bd_locations.json) embedded into the binary. Every loader entry
// point runs the structural validation pass and refuses to hand out a
// malformed tree - fail fast at load, before any query traffic.

use crate::taxonomy::LocationTaxonomy;
use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// The shipped reference dataset, embedded at compile time.
pub const EMBEDDED_DATASET: &str = include_str!("../data/bd_locations.json");

/// Load the embedded reference dataset.
///
/// This is the normal entry point: no runtime file dependencies, and the
/// result is validated, so it never yields a structurally broken tree.
pub fn load_default() -> Result<LocationTaxonomy> {
    load_from_str(EMBEDDED_DATASET).context("embedded dataset failed to load")
}

/// Load a taxonomy from an external JSON file (e.g. a newer dataset
/// revision) instead of the embedded one.
pub fn load_from_path(path: &Path) -> Result<LocationTaxonomy> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset file {:?}", path))?;
    load_from_str(&raw).with_context(|| format!("dataset file {:?} is invalid", path))
}

/// Parse and validate a JSON dataset.
pub fn load_from_str(raw: &str) -> Result<LocationTaxonomy> {
    let taxonomy: LocationTaxonomy =
        serde_json::from_str(raw).context("dataset is not valid taxonomy JSON")?;

    if let Err(errors) = taxonomy.validate() {
        let report = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("\n  ");
        return Err(anyhow!(
            "dataset failed validation with {} error(s):\n  {}",
            errors.len(),
            report
        ));
    }

    Ok(taxonomy)
}

// ============================================================================
// TESTS
// ============================================================================
