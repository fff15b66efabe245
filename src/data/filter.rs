use std::collections::{BTreeMap, BTreeSet};

use super::error::DataError;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of selected values.
///
/// A column absent from the map is unfiltered. An *empty* set selects
/// nothing, so every row fails that column; the UI defaults each column to
/// all of its values to express "no filtering".
pub type FilterState = BTreeMap<String, BTreeSet<CellValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &Dataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .filter(|(col, _)| super::model::FILTER_COLUMNS.contains(&col.as_str()))
        .map(|(col, vals)| (col.clone(), vals.clone()))
        .collect()
}

/// Return indices of records that pass all active filters.
///
/// A record passes a column filter when its value for that column is a
/// member of the selected set. Membership is ANDed across columns and ORed
/// within a column's set. Errors if a filter names a column the dataset
/// does not declare.
pub fn filtered_indices(
    dataset: &Dataset,
    filters: &FilterState,
) -> Result<Vec<usize>, DataError> {
    for col in filters.keys() {
        if !dataset.has_column(col) {
            return Err(DataError::UnknownColumn(col.clone()));
        }
    }

    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            for (col, selected) in filters {
                if selected.is_empty() {
                    // Nothing selected for this column → hide everything
                    return false;
                }
                // Check all unique values are selected → no effective filter
                if let Some(all_vals) = dataset.unique_values.get(col) {
                    if selected.len() == all_vals.len() {
                        continue;
                    }
                }
                if !selected.contains(rec.get(col)) {
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect();

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rows = [
            ("East", "Urban", "Frame"),
            ("East", "Rural", "Masonry"),
            ("West", "Urban", "Frame"),
            ("North", "Rural", "Fire Resist"),
        ];
        let records = rows
            .iter()
            .map(|(region, location, construction)| Record {
                values: [
                    ("Region".to_string(), CellValue::String(region.to_string())),
                    (
                        "Location".to_string(),
                        CellValue::String(location.to_string()),
                    ),
                    (
                        "Construction".to_string(),
                        CellValue::String(construction.to_string()),
                    ),
                ]
                .into_iter()
                .collect(),
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn all_values_selected_is_identity() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        let idx = filtered_indices(&ds, &filters).unwrap();
        assert_eq!(idx, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert("Region".to_string(), BTreeSet::new());
        let idx = filtered_indices(&ds, &filters).unwrap();
        assert!(idx.is_empty());
    }

    #[test]
    fn columns_are_anded_and_values_ored() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(
            "Region".to_string(),
            [
                CellValue::String("East".into()),
                CellValue::String("West".into()),
            ]
            .into_iter()
            .collect(),
        );
        filters.insert(
            "Location".to_string(),
            [CellValue::String("Urban".into())].into_iter().collect(),
        );

        let idx = filtered_indices(&ds, &filters).unwrap();
        assert_eq!(idx, vec![0, 2]);
        for &i in &idx {
            assert!(matches!(ds.records[i].get("Location"), CellValue::String(s) if s == "Urban"));
        }
    }

    #[test]
    fn absent_column_is_unfiltered() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.remove("Region");
        let idx = filtered_indices(&ds, &filters).unwrap();
        assert_eq!(idx.len(), ds.len());
    }

    #[test]
    fn unknown_filter_column_errors() {
        let ds = dataset();
        let mut filters = FilterState::new();
        filters.insert(
            "Premium".to_string(),
            [CellValue::String("x".into())].into_iter().collect(),
        );
        let err = filtered_indices(&ds, &filters).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn(c) if c == "Premium"));
    }
}
