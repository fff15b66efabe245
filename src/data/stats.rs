use std::collections::BTreeMap;

use super::error::DataError;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Scalar statistics over a numeric column of a filtered view
// ---------------------------------------------------------------------------
//
// Every function takes the dataset plus the row indices of the current
// filtered view, validates the column, and reduces in a single pass. Null
// and non-numeric cells are skipped, the way a spreadsheet aggregates.

/// Numeric values of `column` across the selected rows.
fn numeric_values(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
) -> Result<Vec<f64>, DataError> {
    if !dataset.has_column(column) {
        return Err(DataError::UnknownColumn(column.to_string()));
    }
    Ok(indices
        .iter()
        .filter_map(|&i| dataset.records[i].get(column).as_f64())
        .collect())
}

/// Sum of a numeric column; 0.0 over an empty selection.
pub fn sum(dataset: &Dataset, indices: &[usize], column: &str) -> Result<f64, DataError> {
    Ok(numeric_values(dataset, indices, column)?.iter().sum())
}

/// Arithmetic mean of a numeric column.
pub fn mean(dataset: &Dataset, indices: &[usize], column: &str) -> Result<f64, DataError> {
    let values = numeric_values(dataset, indices, column)?;
    if values.is_empty() {
        return Err(DataError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of a numeric column: the middle value, or the average of the two
/// middle values for even-sized selections.
pub fn median(dataset: &Dataset, indices: &[usize], column: &str) -> Result<f64, DataError> {
    let mut values = numeric_values(dataset, indices, column)?;
    if values.is_empty() {
        return Err(DataError::EmptyInput);
    }
    values.sort_by(f64::total_cmp);
    Ok(median_of_sorted(&values))
}

/// Midpoint of an already-sorted, non-empty slice.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Most frequent value of a numeric column.
///
/// Ties are broken deterministically: the *smallest* of the equally
/// frequent values wins (candidates are scanned in ascending order and a
/// later value must be strictly more frequent to replace the current one).
pub fn mode(dataset: &Dataset, indices: &[usize], column: &str) -> Result<f64, DataError> {
    let mut values = numeric_values(dataset, indices, column)?;
    if values.is_empty() {
        return Err(DataError::EmptyInput);
    }
    values.sort_by(f64::total_cmp);

    let mut best = values[0];
    let mut best_count = 0usize;
    let mut run_start = 0usize;
    for i in 0..=values.len() {
        let run_ended = i == values.len() || values[i].total_cmp(&values[run_start]).is_ne();
        if run_ended {
            let count = i - run_start;
            if count > best_count {
                best = values[run_start];
                best_count = count;
            }
            run_start = i;
        }
    }
    Ok(best)
}

// ---------------------------------------------------------------------------
// Grouped aggregates for chart series
// ---------------------------------------------------------------------------

/// Per-category record counts, sorted ascending by count (ties by key).
/// Drives the horizontal bar chart.
pub fn group_count(
    dataset: &Dataset,
    indices: &[usize],
    group_column: &str,
) -> Result<Vec<(CellValue, usize)>, DataError> {
    if !dataset.has_column(group_column) {
        return Err(DataError::UnknownColumn(group_column.to_string()));
    }
    let mut buckets: BTreeMap<CellValue, usize> = BTreeMap::new();
    for &i in indices {
        *buckets
            .entry(dataset.records[i].get(group_column).clone())
            .or_default() += 1;
    }
    let mut entries: Vec<(CellValue, usize)> = buckets.into_iter().collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    Ok(entries)
}

/// Per-category sums of `value_column`, sorted by the natural order of the
/// group key. Drives the line chart.
pub fn group_sum(
    dataset: &Dataset,
    indices: &[usize],
    group_column: &str,
    value_column: &str,
) -> Result<Vec<(CellValue, f64)>, DataError> {
    if !dataset.has_column(group_column) {
        return Err(DataError::UnknownColumn(group_column.to_string()));
    }
    if !dataset.has_column(value_column) {
        return Err(DataError::UnknownColumn(value_column.to_string()));
    }
    let mut buckets: BTreeMap<CellValue, f64> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        if let Some(v) = rec.get(value_column).as_f64() {
            *buckets.entry(rec.get(group_column).clone()).or_default() += v;
        }
    }
    Ok(buckets.into_iter().collect())
}

/// Per-category numeric value buckets of `value_column`, sorted by key.
/// Drives the quartile box plot.
pub fn group_values(
    dataset: &Dataset,
    indices: &[usize],
    group_column: &str,
    value_column: &str,
) -> Result<Vec<(CellValue, Vec<f64>)>, DataError> {
    if !dataset.has_column(group_column) {
        return Err(DataError::UnknownColumn(group_column.to_string()));
    }
    if !dataset.has_column(value_column) {
        return Err(DataError::UnknownColumn(value_column.to_string()));
    }
    let mut buckets: BTreeMap<CellValue, Vec<f64>> = BTreeMap::new();
    for &i in indices {
        let rec = &dataset.records[i];
        if let Some(v) = rec.get(value_column).as_f64() {
            buckets
                .entry(rec.get(group_column).clone())
                .or_default()
                .push(v);
        }
    }
    Ok(buckets.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Quartiles – five-number summary for a box plot element
// ---------------------------------------------------------------------------

/// Five-number summary of a value bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Quartiles {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Quartiles {
    /// Tukey hinges: q1/q3 are the medians of the lower/upper half, with
    /// the middle element excluded for odd-sized inputs.
    pub fn from_values(values: &[f64]) -> Result<Self, DataError> {
        if values.is_empty() {
            return Err(DataError::EmptyInput);
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let median = median_of_sorted(&sorted);
        let lower = &sorted[..n / 2];
        let upper = &sorted[n.div_ceil(2)..];
        Ok(Quartiles {
            min: sorted[0],
            q1: if lower.is_empty() {
                median
            } else {
                median_of_sorted(lower)
            },
            median,
            q3: if upper.is_empty() {
                median
            } else {
                median_of_sorted(upper)
            },
            max: sorted[n - 1],
        })
    }
}

// ---------------------------------------------------------------------------
// Summary – the metric-card bundle
// ---------------------------------------------------------------------------

/// The descriptive statistics rendered as metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_investment: f64,
    pub investment_mode: f64,
    pub investment_mean: f64,
    pub investment_median: f64,
    pub rating_total: f64,
}

impl Summary {
    /// Compute the card bundle over the filtered view. Errors with
    /// [`DataError::EmptyInput`] when the view is empty, so the UI can show
    /// an explicit empty state instead of misleading zeros.
    pub fn compute(
        dataset: &Dataset,
        indices: &[usize],
        value_column: &str,
        rating_column: &str,
    ) -> Result<Self, DataError> {
        if indices.is_empty() {
            return Err(DataError::EmptyInput);
        }
        Ok(Summary {
            total_investment: sum(dataset, indices, value_column)?,
            investment_mode: mode(dataset, indices, value_column)?,
            investment_mean: mean(dataset, indices, value_column)?,
            investment_median: median(dataset, indices, value_column)?,
            rating_total: sum(dataset, indices, rating_column)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset(rows: &[(&str, f64)]) -> Dataset {
        let records = rows
            .iter()
            .map(|(business, investment)| Record {
                values: [
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

    fn all_indices(ds: &Dataset) -> Vec<usize> {
        (0..ds.len()).collect()
    }

    #[test]
    fn scalar_statistics_over_a_small_view() {
        let ds = dataset(&[("Retail", 100.0), ("Retail", 200.0), ("Tech", 50.0)]);
        let idx = all_indices(&ds);

        assert_eq!(sum(&ds, &idx, "Investment").unwrap(), 350.0);
        assert!((mean(&ds, &idx, "Investment").unwrap() - 116.6667).abs() < 1e-3);
        assert_eq!(median(&ds, &idx, "Investment").unwrap(), 100.0);
    }

    #[test]
    fn median_averages_two_middle_values() {
        let ds = dataset(&[("A", 1.0), ("A", 2.0), ("A", 3.0), ("A", 10.0)]);
        let idx = all_indices(&ds);
        assert_eq!(median(&ds, &idx, "Investment").unwrap(), 2.5);
    }

    #[test]
    fn statistics_are_order_invariant() {
        let ds = dataset(&[("A", 3.0), ("A", 1.0), ("A", 2.0), ("A", 4.0)]);
        let forward = all_indices(&ds);
        let reversed: Vec<usize> = forward.iter().rev().copied().collect();

        assert_eq!(
            sum(&ds, &forward, "Investment").unwrap(),
            sum(&ds, &reversed, "Investment").unwrap()
        );
        assert_eq!(
            median(&ds, &forward, "Investment").unwrap(),
            median(&ds, &reversed, "Investment").unwrap()
        );
        assert_eq!(
            mean(&ds, &forward, "Investment").unwrap(),
            mean(&ds, &reversed, "Investment").unwrap()
        );
    }

    #[test]
    fn mode_breaks_ties_toward_the_smallest_value() {
        let ds = dataset(&[("A", 200.0), ("A", 100.0), ("A", 200.0), ("A", 100.0)]);
        let idx = all_indices(&ds);
        // 100 and 200 both occur twice; the smaller one wins.
        assert_eq!(mode(&ds, &idx, "Investment").unwrap(), 100.0);

        let again = mode(&ds, &idx, "Investment").unwrap();
        assert_eq!(again, 100.0);
    }

    #[test]
    fn mode_picks_the_most_frequent_value() {
        let ds = dataset(&[("A", 5.0), ("A", 7.0), ("A", 7.0), ("A", 1.0)]);
        let idx = all_indices(&ds);
        assert_eq!(mode(&ds, &idx, "Investment").unwrap(), 7.0);
    }

    #[test]
    fn empty_view_is_an_explicit_error() {
        let ds = dataset(&[("A", 1.0)]);
        let empty: Vec<usize> = Vec::new();

        assert_eq!(sum(&ds, &empty, "Investment").unwrap(), 0.0);
        assert!(matches!(
            mean(&ds, &empty, "Investment"),
            Err(DataError::EmptyInput)
        ));
        assert!(matches!(
            median(&ds, &empty, "Investment"),
            Err(DataError::EmptyInput)
        ));
        assert!(matches!(
            mode(&ds, &empty, "Investment"),
            Err(DataError::EmptyInput)
        ));
        assert!(matches!(
            Summary::compute(&ds, &empty, "Investment", "Investment"),
            Err(DataError::EmptyInput)
        ));
    }

    #[test]
    fn unknown_column_is_rejected() {
        let ds = dataset(&[("A", 1.0)]);
        let idx = all_indices(&ds);
        assert!(matches!(
            sum(&ds, &idx, "Premium"),
            Err(DataError::UnknownColumn(c)) if c == "Premium"
        ));
        assert!(matches!(
            group_count(&ds, &idx, "Premium"),
            Err(DataError::UnknownColumn(_))
        ));
    }

    #[test]
    fn group_count_sorts_ascending_and_sums_to_view_len() {
        let ds = dataset(&[("Retail", 100.0), ("Retail", 200.0), ("Tech", 50.0)]);
        let idx = all_indices(&ds);
        let counts = group_count(&ds, &idx, "BusinessType").unwrap();

        assert_eq!(
            counts,
            vec![
                (CellValue::String("Tech".into()), 1),
                (CellValue::String("Retail".into()), 2),
            ]
        );
        let total: usize = counts.iter().map(|(_, c)| c).sum();
        assert_eq!(total, idx.len());
    }

    #[test]
    fn group_sum_orders_by_key() {
        let ds = dataset(&[("B", 10.0), ("A", 1.0), ("B", 20.0), ("C", 5.0)]);
        let idx = all_indices(&ds);
        let sums = group_sum(&ds, &idx, "BusinessType", "Investment").unwrap();

        assert_eq!(
            sums,
            vec![
                (CellValue::String("A".into()), 1.0),
                (CellValue::String("B".into()), 30.0),
                (CellValue::String("C".into()), 5.0),
            ]
        );
    }

    #[test]
    fn group_values_buckets_per_category() {
        let ds = dataset(&[("A", 1.0), ("B", 2.0), ("A", 3.0)]);
        let idx = all_indices(&ds);
        let buckets = group_values(&ds, &idx, "BusinessType", "Investment").unwrap();

        assert_eq!(
            buckets,
            vec![
                (CellValue::String("A".into()), vec![1.0, 3.0]),
                (CellValue::String("B".into()), vec![2.0]),
            ]
        );
    }

    #[test]
    fn quartiles_use_tukey_hinges() {
        let q = Quartiles::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]).unwrap();
        assert_eq!(q.min, 1.0);
        assert_eq!(q.q1, 2.0);
        assert_eq!(q.median, 4.0);
        assert_eq!(q.q3, 6.0);
        assert_eq!(q.max, 7.0);

        let single = Quartiles::from_values(&[42.0]).unwrap();
        assert_eq!(single.q1, 42.0);
        assert_eq!(single.q3, 42.0);

        assert!(matches!(
            Quartiles::from_values(&[]),
            Err(DataError::EmptyInput)
        ));
    }

    #[test]
    fn summary_bundles_the_card_values() {
        let ds = dataset(&[("Retail", 100.0), ("Retail", 200.0), ("Tech", 50.0)]);
        let idx = all_indices(&ds);
        let summary = Summary::compute(&ds, &idx, "Investment", "Investment").unwrap();

        assert_eq!(summary.total_investment, 350.0);
        assert_eq!(summary.investment_median, 100.0);
        // Every value occurs once; the smallest wins the mode tie.
        assert_eq!(summary.investment_mode, 50.0);
    }

    #[test]
    fn null_cells_are_skipped_in_aggregation() {
        let records = vec![
            Record {
                values: [
                    ("BusinessType".to_string(), CellValue::String("A".into())),
                    ("Investment".to_string(), CellValue::Float(10.0)),
                ]
                .into_iter()
                .collect(),
            },
            Record {
                values: [
                    ("BusinessType".to_string(), CellValue::String("A".into())),
                    ("Investment".to_string(), CellValue::Null),
                ]
                .into_iter()
                .collect(),
            },
        ];
        let ds = Dataset::from_records(records);
        let idx = all_indices(&ds);

        assert_eq!(sum(&ds, &idx, "Investment").unwrap(), 10.0);
        assert_eq!(mean(&ds, &idx, "Investment").unwrap(), 10.0);
    }
}
