// 🗺️ Location Taxonomy - Division → District → Thana → Area
//
// Immutable four-level geographic reference tree for Bangladesh.
// Built once at load time, validated once, never mutated afterwards.
// Any number of concurrent readers can query it without coordination.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ============================================================================
// AREA TYPE
// ============================================================================

/// Settlement kind tag on an Area. Purely descriptive, no behavior attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaType {
    City,
    Municipality,
    Village,
    Ward,
}

impl AreaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AreaType::City => "city",
            AreaType::Municipality => "municipality",
            AreaType::Village => "village",
            AreaType::Ward => "ward",
        }
    }
}

// ============================================================================
// TREE NODES
// ============================================================================

/// Leaf of the tree: a named settlement inside a thana.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    #[serde(rename = "type")]
    pub area_type: AreaType,
}

/// Thana (police-station-level unit) inside a district.
///
/// `areas: None` means "no sub-area data recorded", which is NOT the same
/// claim as "zero areas exist". Callers that need the distinction should go
/// through `LocationTaxonomy::find_thana` instead of the list queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thana {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub areas: Option<Vec<Area>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    pub thanas: Vec<Thana>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    pub name: String,
    pub districts: Vec<District>,
}

// ============================================================================
// VALIDATION
// ============================================================================

/// One structural problem found in a dataset at construction time.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub context: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), Vec<ValidationError>>;

// ============================================================================
// LOCATION TAXONOMY
// ============================================================================

/// The loaded reference tree plus dataset metadata.
///
/// Names are keys: unique among siblings under the same parent, but NOT
/// globally (e.g. "Dhaka" is a division, a district, and historically a
/// thana name elsewhere). All lookups are case-sensitive exact matches in
/// the source data's casing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationTaxonomy {
    /// Dataset revision tag (e.g. "2024.1")
    pub version: String,

    /// When this dataset revision was published
    pub published: DateTime<Utc>,

    /// Divisions in declaration order
    pub divisions: Vec<Division>,
}

impl LocationTaxonomy {
    /// Find a division by exact name. Linear scan; the tree is tens of
    /// entries wide, so an index buys nothing here (see `query::PathIndex`
    /// for the high-volume path).
    pub fn find_division(&self, division: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.name == division)
    }

    pub fn find_district(&self, division: &str, district: &str) -> Option<&District> {
        self.find_division(division)
            .and_then(|d| d.districts.iter().find(|di| di.name == district))
    }

    /// Three-key exact match down to the thana.
    ///
    /// This is the escape hatch for the "unknown key" vs "known but no
    /// recorded areas" ambiguity: `Some` with `areas: None` is the latter.
    pub fn find_thana(&self, division: &str, district: &str, thana: &str) -> Option<&Thana> {
        self.find_district(division, district)
            .and_then(|d| d.thanas.iter().find(|t| t.name == thana))
    }

    /// Total district count across all divisions.
    pub fn district_count(&self) -> usize {
        self.divisions.iter().map(|d| d.districts.len()).sum()
    }

    /// Total thana count across the whole tree.
    pub fn thana_count(&self) -> usize {
        self.divisions
            .iter()
            .flat_map(|d| &d.districts)
            .map(|d| d.thanas.len())
            .sum()
    }

    /// SHA-256 over the canonical JSON serialization of the division tree.
    ///
    /// Consumers that hardcode names ("Dhaka", "Chittagong", ...) depend on
    /// the dataset staying stable; pinning this fingerprint turns silent
    /// dataset drift into a loud test failure.
    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_vec(&self.divisions).expect("division tree serializes to JSON");
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        format!("{:x}", hasher.finalize())
    }

    /// One-time structural validation pass, run by every loader entry point
    /// before the taxonomy is handed to callers.
    ///
    /// Collects every problem instead of bailing on the first, so a bad
    /// dataset revision reports all of its defects in one load attempt.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.divisions.is_empty() {
            errors.push(ValidationError {
                field: "divisions".to_string(),
                message: "Taxonomy must contain at least one division".to_string(),
                context: "Taxonomy".to_string(),
            });
        }

        check_sibling_names(
            self.divisions.iter().map(|d| d.name.as_str()),
            "division",
            "Taxonomy",
            &mut errors,
        );

        for division in &self.divisions {
            if division.districts.is_empty() {
                errors.push(ValidationError {
                    field: "districts".to_string(),
                    message: "Division must contain at least one district".to_string(),
                    context: division.name.clone(),
                });
            }

            check_sibling_names(
                division.districts.iter().map(|d| d.name.as_str()),
                "district",
                &division.name,
                &mut errors,
            );

            for district in &division.districts {
                let district_ctx = format!("{}/{}", division.name, district.name);

                check_sibling_names(
                    district.thanas.iter().map(|t| t.name.as_str()),
                    "thana",
                    &district_ctx,
                    &mut errors,
                );

                for thana in &district.thanas {
                    if let Some(areas) = &thana.areas {
                        let thana_ctx = format!("{}/{}", district_ctx, thana.name);
                        check_sibling_names(
                            areas.iter().map(|a| a.name.as_str()),
                            "area",
                            &thana_ctx,
                            &mut errors,
                        );
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Names must be non-empty and unique among siblings under one parent.
fn check_sibling_names<'a>(
    names: impl Iterator<Item = &'a str>,
    level: &str,
    context: &str,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen: Vec<&str> = Vec::new();

    for name in names {
        if name.is_empty() {
            errors.push(ValidationError {
                field: format!("{}.name", level),
                message: "Name must be non-empty".to_string(),
                context: context.to_string(),
            });
            continue;
        }

        if seen.contains(&name) {
            errors.push(ValidationError {
                field: format!("{}.name", level),
                message: format!("Duplicate {} name: {}", level, name),
                context: context.to_string(),
            });
        } else {
            seen.push(name);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
