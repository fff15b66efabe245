use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::FILTER_COLUMNS;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – menu and filter widgets
// ---------------------------------------------------------------------------

/// Render the left sidebar: page menu, filter multi-selects, feature picker.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Main Menu");
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .selectable_label(state.page == Page::Home, "Home")
            .clicked()
        {
            state.page = Page::Home;
        }
        if ui
            .selectable_label(state.page == Page::Progress, "Progress")
            .clicked()
        {
            state.page = Page::Progress;
        }
    });
    ui.separator();

    ui.heading("Please Filter");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let unique = dataset.unique_values.clone();
    let numeric_columns = dataset.numeric_columns();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Per-column filter widgets (collapsible) ----
            for col in FILTER_COLUMNS {
                let Some(all_values) = unique.get(col) else {
                    continue;
                };

                let selected = state.filters.entry(col.to_string()).or_default();

                // Show count of selected / total in the header
                let n_selected = selected.len();
                let n_total = all_values.len();
                let header_text = format!("{col}  ({n_selected}/{n_total})");

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        // Select all / none buttons
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        // Re-borrow after potential mutation from All/None
                        let selected = state.filters.entry(col.to_string()).or_default();

                        for val in all_values {
                            let mut checked = selected.contains(val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                if checked {
                                    selected.insert(val.clone());
                                } else {
                                    selected.remove(val);
                                }
                            }
                        }
                    });
            }

            ui.separator();

            // ---- Box-plot feature selector ----
            ui.strong("Quartile feature");
            let current_feature = state.feature_column.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("quartile_feature")
                .selected_text(&current_feature)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric_columns {
                        if ui
                            .selectable_label(current_feature == *col, col)
                            .clicked()
                        {
                            state.set_feature_column(col.clone());
                        }
                    }
                });
        });

    // Recompute visible indices after any checkbox changes.
    state.refilter();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} match the filters",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open records dataset")
        .add_filter("Supported files", &["parquet", "pq", "json", "csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}
