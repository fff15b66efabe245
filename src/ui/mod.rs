/// Presentation layer: sidebar controls, metric cards, and charts.
///
/// Everything here only *consumes* the data layer — widgets read the
/// cached filtered view from [`crate::state::AppState`] and render it.

pub mod charts;
pub mod metrics;
pub mod panels;
