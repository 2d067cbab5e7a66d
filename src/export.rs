// 📤 CSV Export - flatten the taxonomy for reporting tools
//
// One row per area; thanas with no recorded areas still get a row with the
// area columns blank, so the export covers every path in the tree.

use crate::taxonomy::LocationTaxonomy;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// One flattened taxonomy path, CSV-ready.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FlatRow {
    pub division: String,
    pub district: String,
    pub thana: String,
    pub area: String,
    pub area_type: String,
}

/// Flatten the whole tree into rows, declaration order throughout.
pub fn flat_rows(taxonomy: &LocationTaxonomy) -> Vec<FlatRow> {
    let mut rows = Vec::new();

    for division in &taxonomy.divisions {
        for district in &division.districts {
            for thana in &district.thanas {
                match &thana.areas {
                    Some(areas) if !areas.is_empty() => {
                        for area in areas {
                            rows.push(FlatRow {
                                division: division.name.clone(),
                                district: district.name.clone(),
                                thana: thana.name.clone(),
                                area: area.name.clone(),
                                area_type: area.area_type.as_str().to_string(),
                            });
                        }
                    }
                    _ => rows.push(FlatRow {
                        division: division.name.clone(),
                        district: district.name.clone(),
                        thana: thana.name.clone(),
                        area: String::new(),
                        area_type: String::new(),
                    }),
                }
            }
        }
    }

    rows
}

/// Write the flattened taxonomy to a CSV file.
pub fn export_csv(taxonomy: &LocationTaxonomy, out_path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(out_path)
        .with_context(|| format!("failed to create CSV file {:?}", out_path))?;

    let rows = flat_rows(taxonomy);
    for row in &rows {
        wtr.serialize(row).context("failed to write CSV row")?;
    }
    wtr.flush().context("failed to flush CSV file")?;

    Ok(rows.len())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::load_default;

    #[test]
    fn test_flat_rows_cover_every_thana() {
        let taxonomy = load_default().unwrap();
        let rows = flat_rows(&taxonomy);

        // 130 thanas; the 18 thanas carrying areas expand into 30 area rows
        // instead of one blank row each.
        let area_rows = rows.iter().filter(|r| !r.area.is_empty()).count();
        let blank_rows = rows.iter().filter(|r| r.area.is_empty()).count();

        assert_eq!(area_rows, 30);
        assert_eq!(blank_rows + thanas_with_areas(&taxonomy), 130);
        assert_eq!(rows.len(), area_rows + blank_rows);
    }

    fn thanas_with_areas(taxonomy: &LocationTaxonomy) -> usize {
        taxonomy
            .divisions
            .iter()
            .flat_map(|d| &d.districts)
            .flat_map(|d| &d.thanas)
            .filter(|t| t.areas.as_ref().is_some_and(|a| !a.is_empty()))
            .count()
    }

    #[test]
    fn test_flat_rows_declaration_order() {
        let taxonomy = load_default().unwrap();
        let rows = flat_rows(&taxonomy);

        assert_eq!(rows[0].division, "Dhaka");
        assert_eq!(rows[0].thana, "Dhanmondi");
        assert_eq!(rows[0].area, "Dhanmondi 2");
        assert_eq!(rows[0].area_type, "ward");
        assert_eq!(rows[1].area, "Dhanmondi 8");
        assert_eq!(rows[2].area, "Dhanmondi 15");
    }

    #[test]
    fn test_export_csv_writes_file() {
        let taxonomy = load_default().unwrap();
        let out = std::env::temp_dir().join("bd_locations_export_test.csv");

        let count = export_csv(&taxonomy, &out).unwrap();
        assert_eq!(count, flat_rows(&taxonomy).len());

        let contents = std::fs::read_to_string(&out).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "division,district,thana,area,area_type"
        );
        assert!(contents.contains("Dhaka,Dhaka,Dhanmondi,Dhanmondi 2,ward"));

        std::fs::remove_file(&out).ok();
    }
}
