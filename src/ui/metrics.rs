use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::error::DataError;
use crate::data::stats::Summary;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metric cards – the descriptive-statistics row
// ---------------------------------------------------------------------------

/// Render the five metric cards over the filtered view.
pub fn metric_cards(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };

    match Summary::compute(ds, &state.visible_indices, "Investment", "Rating") {
        Ok(summary) => {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                metric_card(
                    ui,
                    "Total Investment",
                    format!("{} TZS", group_digits(summary.total_investment)),
                    "Sum",
                );
                metric_card(
                    ui,
                    "Most Frequent",
                    format!("{} TZS", group_digits(summary.investment_mode)),
                    "Mode",
                );
                metric_card(
                    ui,
                    "Average",
                    format!("{} TZS", group_digits(summary.investment_mean)),
                    "Mean",
                );
                metric_card(
                    ui,
                    "Central Earnings",
                    format!("{} TZS", group_digits(summary.investment_median)),
                    "Median",
                );
                metric_card(
                    ui,
                    "Ratings",
                    humanize(summary.rating_total),
                    &format!("Total Rating: {}", group_digits(summary.rating_total)),
                );
            });
        }
        Err(DataError::EmptyInput) => {
            ui.label(
                RichText::new("No records match the current filters.")
                    .color(Color32::LIGHT_YELLOW),
            );
        }
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
        }
    }
}

fn metric_card(ui: &mut Ui, title: &str, value: String, detail: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui: &mut Ui| {
            ui.vertical(|ui: &mut Ui| {
                ui.set_min_width(150.0);
                ui.label(RichText::new(title).small().strong());
                ui.label(RichText::new(value).heading());
                ui.label(RichText::new(detail).small().weak());
            });
        });
}

// ---------------------------------------------------------------------------
// Tabular expander – raw filtered records with a column picker
// ---------------------------------------------------------------------------

/// Render the collapsible records table. Columns start unselected; the
/// picker controls which ones are shown.
pub fn records_table(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let visible = &state.visible_indices;
    let mut table_columns = state.table_columns.clone();

    egui::CollapsingHeader::new("Tabular")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for col in &ds.column_names {
                    let mut shown = table_columns.contains(col);
                    if ui.checkbox(&mut shown, col).changed() {
                        if shown {
                            table_columns.insert(col.clone());
                        } else {
                            table_columns.remove(col);
                        }
                    }
                }
            });

            let selected: Vec<String> = ds
                .column_names
                .iter()
                .filter(|c| table_columns.contains(*c))
                .cloned()
                .collect();
            if selected.is_empty() {
                ui.weak("Pick columns to preview the filtered records.");
                return;
            }

            TableBuilder::new(ui)
                .striped(true)
                .max_scroll_height(260.0)
                .columns(Column::auto().resizable(true), selected.len())
                .header(20.0, |mut header| {
                    for col in &selected {
                        header.col(|ui: &mut Ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, visible.len(), |mut row| {
                        let rec = &ds.records[visible[row.index()]];
                        for col in &selected {
                            row.col(|ui: &mut Ui| {
                                ui.label(rec.get(col).to_string());
                            });
                        }
                    });
                });
        });

    state.table_columns = table_columns;
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Short human form of a large number: `3500000000` → `3.5B`.
pub fn humanize(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        return format!("{value:.0}");
    };
    let s = format!("{scaled:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}{suffix}")
}

/// Thousands-separated integer form: `1234567.8` → `1,234,568`.
pub fn group_digits(value: f64) -> String {
    let negative = value < 0.0;
    let digits = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_scales_and_trims() {
        assert_eq!(humanize(3_500_000_000.0), "3.5B");
        assert_eq!(humanize(1_250_000.0), "1.25M");
        assert_eq!(humanize(2_000.0), "2K");
        assert_eq!(humanize(350.0), "350");
    }

    #[test]
    fn group_digits_inserts_separators() {
        assert_eq!(group_digits(3_000_000_000.0), "3,000,000,000");
        assert_eq!(group_digits(1_234_567.8), "1,234,568");
        assert_eq!(group_digits(999.0), "999");
        assert_eq!(group_digits(-1_000.0), "-1,000");
    }
}
