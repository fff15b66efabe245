use std::collections::BTreeSet;

use crate::color::CategoryColors;
use crate::config::AppConfig;
use crate::data::filter::{filtered_indices, init_filter_state, FilterState};
use crate::data::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Dashboard page, selected in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Progress,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Startup configuration (investment target, optional autoload path).
    pub config: AppConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Active dashboard page.
    pub page: Page,

    /// Numeric column plotted by the quartile box plot.
    pub feature_column: Option<String>,

    /// Chart colours keyed by `BusinessType` value.
    pub category_colors: Option<CategoryColors>,

    /// Columns shown in the tabular expander (empty by default).
    pub table_columns: BTreeSet<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            dataset: None,
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            page: Page::Home,
            feature_column: None,
            category_colors: None,
            table_columns: BTreeSet::new(),
            status_message: None,
            loading: false,
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and chart colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();

        // Default box-plot feature: Investment, else the first numeric column.
        let numeric = dataset.numeric_columns();
        self.feature_column = numeric
            .iter()
            .find(|c| c.as_str() == "Investment")
            .or_else(|| numeric.first())
            .cloned();

        self.category_colors = dataset
            .unique_values
            .get("BusinessType")
            .map(|vals| CategoryColors::new("BusinessType", vals));

        self.table_columns.clear();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            match filtered_indices(ds, &self.filters) {
                Ok(indices) => self.visible_indices = indices,
                Err(e) => {
                    log::error!("Filter failed: {e}");
                    self.status_message = Some(format!("Error: {e}"));
                    self.visible_indices.clear();
                }
            }
        }
    }

    /// Set the box-plot feature column.
    pub fn set_feature_column(&mut self, col: String) {
        self.feature_column = Some(col);
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, column: &str, value: &CellValue) {
        let selected = self.filters.entry(column.to_string()).or_default();
        if selected.contains(value) {
            selected.remove(value);
        } else {
            selected.insert(value.clone());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, column: &str) {
        if let Some(ds) = &self.dataset {
            if let Some(all_vals) = ds.unique_values.get(column) {
                self.filters.insert(column.to_string(), all_vals.clone());
                self.refilter();
            }
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, column: &str) {
        self.filters.insert(column.to_string(), BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset() -> Dataset {
        let rows = [("East", "Retail", 100.0), ("West", "Tech", 50.0)];
        let records = rows
            .iter()
            .map(|(region, business, investment)| Record {
                values: [
                    ("Region".to_string(), CellValue::String(region.to_string())),
                    (
                        "BusinessType".to_string(),
                        CellValue::String(business.to_string()),
                    ),
                    ("Investment".to_string(), CellValue::Float(*investment)),
                ]
                .into_iter()
                .collect(),
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn set_dataset_defaults_to_everything_visible() {
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(dataset());

        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.feature_column.as_deref(), Some("Investment"));
        assert!(state.category_colors.is_some());
    }

    #[test]
    fn toggling_a_value_refilters() {
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(dataset());

        // Deselect "West" → only the East record remains.
        state.toggle_filter_value("Region", &CellValue::String("West".into()));
        assert_eq!(state.visible_indices, vec![0]);

        state.toggle_filter_value("Region", &CellValue::String("West".into()));
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    #[test]
    fn select_none_then_all_round_trips() {
        let mut state = AppState::new(AppConfig::default());
        state.set_dataset(dataset());

        state.select_none("Region");
        assert!(state.visible_indices.is_empty());

        state.select_all("Region");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }
}
