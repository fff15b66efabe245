use super::error::DataError;
use super::model::Dataset;
use super::stats;

// ---------------------------------------------------------------------------
// Progress against the configured investment target
// ---------------------------------------------------------------------------

/// Current total versus the fixed target.
///
/// `percent` is deliberately *not* clamped at 100: values above 100 mean
/// the target was exceeded and the UI renders "Target Done!" instead of a
/// longer bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    pub current: f64,
    pub target: f64,
    pub percent: i64,
}

impl ProgressState {
    /// Whether the running total has passed the target.
    pub fn target_met(&self) -> bool {
        self.percent > 100
    }

    /// Bar fill fraction in `[0, 1]` for rendering.
    pub fn fraction(&self) -> f32 {
        (self.percent.max(0) as f32 / 100.0).min(1.0)
    }
}

/// Sum `value_column` over the filtered view and derive the percentage of
/// `target` reached, rounded half-away-from-zero (`f64::round`).
pub fn compute_progress(
    dataset: &Dataset,
    indices: &[usize],
    value_column: &str,
    target: f64,
) -> Result<ProgressState, DataError> {
    if target <= 0.0 {
        return Err(DataError::InvalidTarget(target));
    }
    let current = stats::sum(dataset, indices, value_column)?;
    let percent = (current / target * 100.0).round() as i64;
    Ok(ProgressState {
        current,
        target,
        percent,
    })
}
