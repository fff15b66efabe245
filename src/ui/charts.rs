use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, Plot, PlotPoints,
};

use crate::data::model::CellValue;
use crate::data::progress::compute_progress;
use crate::data::stats::{self, Quartiles};
use crate::state::AppState;

/// Accent used for single-series charts.
const SERIES_COLOR: Color32 = Color32::from_rgb(0x54, 0x51, 0xf0);

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Horizontal bar chart – record counts by BusinessType
// ---------------------------------------------------------------------------

/// Render the count-per-business-type bar chart (ascending by count).
pub fn business_type_bar(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let counts = match stats::group_count(ds, &state.visible_indices, "BusinessType") {
        Ok(counts) => counts,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    ui.strong("Investment By Business Type");

    let labels: Vec<String> = counts.iter().map(|(cat, _)| cat.to_string()).collect();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (category, count))| {
            let color = category_color(state, category);
            Bar::new(i as f64, *count as f64)
                .name(category.to_string())
                .fill(color)
        })
        .collect();

    Plot::new("business_type_bar")
        .height(CHART_HEIGHT)
        .x_axis_label("Records")
        .y_axis_formatter(index_labels(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

// ---------------------------------------------------------------------------
// Line chart – investment sums by State
// ---------------------------------------------------------------------------

/// Render the investment-sum-per-state line chart (states in natural order).
pub fn state_line(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let sums = match stats::group_sum(ds, &state.visible_indices, "State", "Investment") {
        Ok(sums) => sums,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    ui.strong("Investment By State");

    let labels: Vec<String> = sums.iter().map(|(cat, _)| cat.to_string()).collect();
    let points: PlotPoints = sums
        .iter()
        .enumerate()
        .map(|(i, (_, total))| [i as f64, *total])
        .collect();

    Plot::new("state_line")
        .height(CHART_HEIGHT)
        .y_axis_label("Investment")
        .x_axis_formatter(index_labels(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(SERIES_COLOR).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// Box plot – selected feature quartiles by BusinessType
// ---------------------------------------------------------------------------

/// Render the quartile box plot of the selected numeric feature.
pub fn quartile_box_plot(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let Some(feature) = &state.feature_column else {
        ui.label("No numeric feature available for the quartile plot.");
        return;
    };
    let buckets = match stats::group_values(ds, &state.visible_indices, "BusinessType", feature)
    {
        Ok(buckets) => buckets,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    ui.strong(format!("Business Type By Quartiles Of {feature}"));

    let labels: Vec<String> = buckets.iter().map(|(cat, _)| cat.to_string()).collect();
    let mut elems = Vec::with_capacity(buckets.len());
    for (i, (category, values)) in buckets.iter().enumerate() {
        // Categories whose cells are all null have nothing to summarise.
        let Ok(q) = Quartiles::from_values(values) else {
            continue;
        };
        let color = category_color(state, category);
        elems.push(
            BoxElem::new(i as f64, BoxSpread::new(q.min, q.q1, q.median, q.q3, q.max))
                .name(category.to_string())
                .fill(color.gamma_multiply(0.4))
                .stroke(Stroke::new(1.5, color)),
        );
    }

    Plot::new("quartile_box_plot")
        .height(CHART_HEIGHT)
        .y_axis_label(feature.clone())
        .x_axis_formatter(index_labels(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(elems));
        });
}

// ---------------------------------------------------------------------------
// Progress section – investment sum against the configured target
// ---------------------------------------------------------------------------

/// Render the target-progress readout for the Progress page.
pub fn progress_section(ui: &mut Ui, state: &AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let progress = match compute_progress(
        ds,
        &state.visible_indices,
        "Investment",
        state.config.investment_target,
    ) {
        Ok(progress) => progress,
        Err(e) => {
            ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
            return;
        }
    };

    if progress.target_met() {
        ui.heading("Target Done !");
    } else {
        ui.label(format!(
            "you have {}% of {} TZS",
            progress.percent,
            super::metrics::group_digits(progress.target)
        ));
    }
    ui.add(
        eframe::egui::ProgressBar::new(progress.fraction())
            .text(format!("{}%  Target Percentage", progress.percent)),
    );
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn category_color(state: &AppState, category: &CellValue) -> Color32 {
    state
        .category_colors
        .as_ref()
        .map(|cc| cc.color_for(category))
        .unwrap_or(Color32::LIGHT_BLUE)
}

/// Axis formatter mapping integer positions to category labels.
fn index_labels(
    labels: Vec<String>,
) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String + 'static {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() < 1e-3 && idx >= 0.0 && (idx as usize) < labels.len() {
            labels[idx as usize].clone()
        } else {
            String::new()
        }
    }
}
