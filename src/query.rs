// 🔎 Location Queries - stateless lookups over a LocationTaxonomy
//
// Every operation is a pure function of (taxonomy, input keys) → list.
// Contract, relied on by cascading UI selectors:
//   - exact-match, case-sensitive string keys
//   - results in dataset declaration order
//   - unknown key at ANY level → empty list, never an error

use crate::taxonomy::{Area, LocationTaxonomy};
use std::collections::HashMap;

// ============================================================================
// LINEAR-SCAN QUERY SERVICE
// ============================================================================

/// Read-only query service borrowing a loaded taxonomy.
///
/// Lookups are linear scans at each tree level, which is fine at this
/// dataset's width (tens of entries per level). `PathIndex` below is the
/// precomputed alternative for high-volume callers; both honor the same
/// empty-list-on-miss contract.
#[derive(Debug, Clone, Copy)]
pub struct LocationQuery<'a> {
    taxonomy: &'a LocationTaxonomy,
}

impl<'a> LocationQuery<'a> {
    pub fn new(taxonomy: &'a LocationTaxonomy) -> Self {
        LocationQuery { taxonomy }
    }

    /// All division names in declaration order. Never empty for a valid
    /// taxonomy (validation rejects a division-less dataset).
    pub fn divisions(&self) -> Vec<String> {
        self.taxonomy
            .divisions
            .iter()
            .map(|d| d.name.clone())
            .collect()
    }

    /// District names under one division; empty on unknown division.
    pub fn districts(&self, division: &str) -> Vec<String> {
        self.taxonomy
            .find_division(division)
            .map(|d| d.districts.iter().map(|di| di.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Thana names under one (division, district) path; empty on a miss at
    /// either level.
    pub fn thanas(&self, division: &str, district: &str) -> Vec<String> {
        self.taxonomy
            .find_district(division, district)
            .map(|d| d.thanas.iter().map(|t| t.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Areas under one (division, district, thana) path.
    ///
    /// Empty on a miss at any level, and also when the matched thana has
    /// no recorded areas; the two cases are not distinguishable through
    /// this call. Use `LocationTaxonomy::find_thana` when the distinction
    /// matters.
    pub fn areas(&self, division: &str, district: &str, thana: &str) -> Vec<Area> {
        self.taxonomy
            .find_thana(division, district, thana)
            .and_then(|t| t.areas.clone())
            .unwrap_or_default()
    }

    /// Every district name across every division, flattened.
    ///
    /// Divisions in declaration order, districts within each division in
    /// declaration order. Duplicates across divisions are preserved: names
    /// are only unique within their parent scope.
    pub fn all_districts(&self) -> Vec<String> {
        self.taxonomy
            .divisions
            .iter()
            .flat_map(|d| d.districts.iter().map(|di| di.name.clone()))
            .collect()
    }

    /// Every thana name across the whole tree, flattened. Same ordering and
    /// duplication policy as `all_districts`, one level deeper.
    pub fn all_thanas(&self) -> Vec<String> {
        self.taxonomy
            .divisions
            .iter()
            .flat_map(|d| &d.districts)
            .flat_map(|d| d.thanas.iter().map(|t| t.name.clone()))
            .collect()
    }
}

// ============================================================================
// PATH INDEX
// ============================================================================

/// Precomputed lookup index keyed by composite path.
///
/// Built once at construction; afterwards every list query is a single
/// HashMap probe plus a clone. External contract is identical to
/// `LocationQuery` (a test asserts they agree on every path), so callers
/// can swap one for the other freely.
///
/// Key shape: `division`, `division|district`, `division|district|thana`.
/// `|` does not occur in any name in the reference dataset.
pub struct PathIndex {
    divisions: Vec<String>,
    districts: HashMap<String, Vec<String>>,
    thanas: HashMap<String, Vec<String>>,
    areas: HashMap<String, Vec<Area>>,
    all_districts: Vec<String>,
    all_thanas: Vec<String>,
}

impl PathIndex {
    pub fn build(taxonomy: &LocationTaxonomy) -> Self {
        let mut districts = HashMap::new();
        let mut thanas = HashMap::new();
        let mut areas = HashMap::new();
        let mut all_districts = Vec::new();
        let mut all_thanas = Vec::new();

        for division in &taxonomy.divisions {
            let district_names: Vec<String> = division
                .districts
                .iter()
                .map(|d| d.name.clone())
                .collect();
            all_districts.extend(district_names.iter().cloned());
            districts.insert(division.name.clone(), district_names);

            for district in &division.districts {
                let thana_key = format!("{}|{}", division.name, district.name);
                let thana_names: Vec<String> =
                    district.thanas.iter().map(|t| t.name.clone()).collect();
                all_thanas.extend(thana_names.iter().cloned());
                thanas.insert(thana_key, thana_names);

                for thana in &district.thanas {
                    if let Some(thana_areas) = &thana.areas {
                        let area_key =
                            format!("{}|{}|{}", division.name, district.name, thana.name);
                        areas.insert(area_key, thana_areas.clone());
                    }
                }
            }
        }

        PathIndex {
            divisions: taxonomy.divisions.iter().map(|d| d.name.clone()).collect(),
            districts,
            thanas,
            areas,
            all_districts,
            all_thanas,
        }
    }

    pub fn divisions(&self) -> Vec<String> {
        self.divisions.clone()
    }

    pub fn districts(&self, division: &str) -> Vec<String> {
        self.districts.get(division).cloned().unwrap_or_default()
    }

    pub fn thanas(&self, division: &str, district: &str) -> Vec<String> {
        self.thanas
            .get(&format!("{}|{}", division, district))
            .cloned()
            .unwrap_or_default()
    }

    pub fn areas(&self, division: &str, district: &str, thana: &str) -> Vec<Area> {
        self.areas
            .get(&format!("{}|{}|{}", division, district, thana))
            .cloned()
            .unwrap_or_default()
    }

    pub fn all_districts(&self) -> Vec<String> {
        self.all_districts.clone()
    }

    pub fn all_thanas(&self) -> Vec<String> {
        self.all_thanas.clone()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_default;
    use crate::taxonomy::AreaType;
    use std::collections::HashSet;

    #[test]
    fn test_divisions_complete_and_unique() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let divisions = query.divisions();
        assert!(!divisions.is_empty());

        let unique: HashSet<&String> = divisions.iter().collect();
        assert_eq!(unique.len(), divisions.len());

        for expected in [
            "Dhaka",
            "Chittagong",
            "Rajshahi",
            "Khulna",
            "Sylhet",
            "Barisal",
            "Rangpur",
            "Mymensingh",
        ] {
            assert!(divisions.iter().any(|d| d == expected), "missing {expected}");
        }
        assert_eq!(divisions.len(), 8);
    }

    #[test]
    fn test_every_division_has_districts() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        for division in query.divisions() {
            assert!(
                !query.districts(&division).is_empty(),
                "{division} has no districts"
            );
        }
    }

    #[test]
    fn test_districts_of_dhaka() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let districts = query.districts("Dhaka");
        for expected in ["Dhaka", "Gazipur", "Narayanganj", "Tangail"] {
            assert!(districts.iter().any(|d| d == expected), "missing {expected}");
        }
        assert_eq!(districts.len(), 11);
    }

    #[test]
    fn test_thanas_of_dhaka_dhaka() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let thanas = query.thanas("Dhaka", "Dhaka");
        for expected in ["Dhanmondi", "Gulshan", "Mirpur", "Uttara"] {
            assert!(thanas.iter().any(|t| t == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_areas_of_dhanmondi() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let areas = query.areas("Dhaka", "Dhaka", "Dhanmondi");
        let names: Vec<&str> = areas.iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names, vec!["Dhanmondi 2", "Dhanmondi 8", "Dhanmondi 15"]);
        assert!(areas.iter().all(|a| a.area_type == AreaType::Ward));
    }

    #[test]
    fn test_unknown_division_returns_empty() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        assert!(query.districts("Atlantis").is_empty());
        assert!(query.districts("NotARealDivision").is_empty());
    }

    #[test]
    fn test_miss_at_any_level_returns_empty() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        assert!(query.thanas("Dhaka", "NotARealDistrict").is_empty());
        assert!(query.thanas("Atlantis", "Dhaka").is_empty());
        assert!(query.areas("Dhaka", "Dhaka", "NotARealThana").is_empty());
        assert!(query.areas("Atlantis", "Dhaka", "Dhanmondi").is_empty());
    }

    #[test]
    fn test_known_thana_without_recorded_areas_is_empty() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        // Motijheel exists but has no recorded areas - same empty result
        // as an unknown thana.
        assert!(query.areas("Dhaka", "Dhaka", "Motijheel").is_empty());
        assert!(taxonomy.find_thana("Dhaka", "Dhaka", "Motijheel").is_some());
    }

    #[test]
    fn test_case_sensitivity() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        assert!(query.districts("dhaka").is_empty());
        assert!(query.districts("DHAKA").is_empty());
        assert!(!query.districts("Dhaka").is_empty());
    }

    #[test]
    fn test_flattening_consistency_districts() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let per_division_total: usize = query
            .divisions()
            .iter()
            .map(|d| query.districts(d).len())
            .sum();

        assert_eq!(query.all_districts().len(), per_division_total);
        assert_eq!(query.all_districts().len(), 62);
    }

    #[test]
    fn test_flattening_consistency_thanas() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let mut per_district_total = 0;
        for division in query.divisions() {
            for district in query.districts(&division) {
                per_district_total += query.thanas(&division, &district).len();
            }
        }

        assert_eq!(query.all_thanas().len(), per_district_total);
        assert_eq!(query.all_thanas().len(), 130);
    }

    #[test]
    fn test_flattening_preserves_declaration_order() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let all = query.all_districts();
        // Dhaka division's districts come first, in order
        assert_eq!(all[0], "Dhaka");
        assert_eq!(all[1], "Gazipur");
        // First district of the second division follows the 11 Dhaka ones
        assert_eq!(all[11], "Chittagong");
    }

    #[test]
    fn test_idempotence() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        assert_eq!(query.divisions(), query.divisions());
        assert_eq!(query.districts("Dhaka"), query.districts("Dhaka"));
        assert_eq!(
            query.thanas("Dhaka", "Dhaka"),
            query.thanas("Dhaka", "Dhaka")
        );
        assert_eq!(
            query.areas("Dhaka", "Dhaka", "Dhanmondi"),
            query.areas("Dhaka", "Dhaka", "Dhanmondi")
        );
        assert_eq!(query.all_thanas(), query.all_thanas());
    }

    #[test]
    fn test_area_types_within_enumeration() {
        // AreaType is a closed enum, so any deserialized area is already in
        // {city, municipality, village, ward}; this pins the dataset's
        // string form to exactly those four tags.
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);

        let allowed = ["city", "municipality", "village", "ward"];
        for division in query.divisions() {
            for district in query.districts(&division) {
                for thana in query.thanas(&division, &district) {
                    for area in query.areas(&division, &district, &thana) {
                        assert!(allowed.contains(&area.area_type.as_str()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_path_index_agrees_with_linear_scan() {
        let taxonomy = load_default().unwrap();
        let query = LocationQuery::new(&taxonomy);
        let index = PathIndex::build(&taxonomy);

        assert_eq!(index.divisions(), query.divisions());
        assert_eq!(index.all_districts(), query.all_districts());
        assert_eq!(index.all_thanas(), query.all_thanas());

        for division in query.divisions() {
            assert_eq!(index.districts(&division), query.districts(&division));
            for district in query.districts(&division) {
                assert_eq!(
                    index.thanas(&division, &district),
                    query.thanas(&division, &district)
                );
                for thana in query.thanas(&division, &district) {
                    assert_eq!(
                        index.areas(&division, &district, &thana),
                        query.areas(&division, &district, &thana)
                    );
                }
            }
        }
    }

    #[test]
    fn test_path_index_miss_policy() {
        let taxonomy = load_default().unwrap();
        let index = PathIndex::build(&taxonomy);

        assert!(index.districts("Atlantis").is_empty());
        assert!(index.thanas("Dhaka", "NotARealDistrict").is_empty());
        assert!(index.areas("Dhaka", "Dhaka", "Motijheel").is_empty());
    }
}
