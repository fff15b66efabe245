use eframe::egui;

use crate::config::AppConfig;
use crate::state::{AppState, Page};
use crate::ui::{charts, metrics, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PortfolioPulseApp {
    pub state: AppState,
}

impl PortfolioPulseApp {
    /// Build the app, loading the configured dataset if one is set.
    pub fn new(config: AppConfig) -> Self {
        let mut state = AppState::new(config);
        if let Some(path) = state.config.dataset_path.clone() {
            match crate::data::loader::load_file(&path) {
                Ok(dataset) => {
                    log::info!(
                        "Loaded {} records from {}",
                        dataset.len(),
                        path.display()
                    );
                    state.set_dataset(dataset);
                }
                Err(e) => {
                    log::error!("Failed to load {}: {e}", path.display());
                    state.status_message = Some(format!("Error: {e}"));
                }
            }
        }
        Self { state }
    }
}

impl eframe::App for PortfolioPulseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: menu and filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the active page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a dataset to explore it  (File → Open…)");
                });
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Analytical Processing, KPI, Trends & Predictions");
                    ui.add_space(4.0);

                    match self.state.page {
                        Page::Home => {
                            metrics::records_table(ui, &mut self.state);
                            ui.add_space(4.0);
                            metrics::metric_cards(ui, &self.state);
                        }
                        Page::Progress => {
                            charts::progress_section(ui, &self.state);
                        }
                    }

                    ui.separator();
                    ui.columns(2, |cols| {
                        charts::state_line(&mut cols[0], &self.state);
                        charts::business_type_bar(&mut cols[1], &self.state);
                    });

                    ui.separator();
                    charts::quartile_box_plot(ui, &self.state);
                });
        });
    }
}
