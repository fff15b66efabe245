use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Date32Array, Float32Array, Float64Array, Int32Array,
    Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::temporal_conversions::date32_to_datetime;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::DataError;
use super::model::{CellValue, Dataset, Record, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a record dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat Parquet file, one record per row (recommended)
/// * `.json`    – `[{ "Region": "...", "Investment": 1.0, ... }, ...]`
/// * `.csv`     – header row with column names, cell types inferred
///
/// Fails with [`DataError::DatasetLoad`] when the file cannot be read or
/// any of [`REQUIRED_COLUMNS`] is absent from the schema.
pub fn load_file(path: &Path) -> Result<Dataset, DataError> {
    let dataset = load_any(path).map_err(|e| DataError::DatasetLoad(format!("{e:#}")))?;
    ensure_required_columns(&dataset)?;
    Ok(dataset)
}

fn load_any(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn ensure_required_columns(dataset: &Dataset) -> Result<(), DataError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !dataset.has_column(col))
        .copied()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::DatasetLoad(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Policy": "P-1001",
///     "Region": "East",
///     "Investment": 1200000.0,
///     "Rating": 2.4
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records_json = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(records_json.len());

    for (i, rec) in records_json.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut values = BTreeMap::new();
        for (key, val) in obj {
            values.insert(key.clone(), json_to_cell(val));
        }
        records.push(Record { values });
    }

    Ok(Dataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) if looks_like_iso_date(s) => CellValue::Date(s.clone()),
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per data row.
/// Cell types are inferred per cell: integer → float → bool → ISO date →
/// string; empty cells become `Null`.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut values = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no} has more cells than the header");
            };
            values.insert(col_name.clone(), guess_cell_type(value));
        }
        records.push(Record { values });
    }

    Ok(Dataset::from_records(records))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    if looks_like_iso_date(s) {
        return CellValue::Date(s.to_string());
    }
    CellValue::String(s.to_string())
}

/// `YYYY-MM-DD`, digits in the right places.
fn looks_like_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, &c)| matches!(i, 4 | 7) || c.is_ascii_digit())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of flat records.
///
/// Every column is read as a cell value: strings, ints, floats, bools and
/// Date32 (kept as an ISO string). Unknown Arrow types are stringified.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let columns: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let mut values = BTreeMap::new();
            for (col_idx, col_name) in &columns {
                let col_array = batch.column(*col_idx);
                values.insert(col_name.clone(), extract_cell_value(col_array, row));
            }
            records.push(Record { values });
        }
    }

    Ok(Dataset::from_records(records))
}

/// Extract a single cell value from an Arrow column at a given row.
fn extract_cell_value(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                CellValue::String(s.value(row).to_string())
            } else {
                // LargeStringArray
                let s = col.as_string::<i64>();
                CellValue::String(s.value(row).to_string())
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            CellValue::Integer(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            CellValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            CellValue::Float(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            CellValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            CellValue::Bool(arr.value(row))
        }
        DataType::Date32 => {
            let arr = col.as_any().downcast_ref::<Date32Array>().unwrap();
            match date32_to_datetime(arr.value(row)) {
                Some(dt) => CellValue::Date(dt.date().to_string()),
                None => CellValue::Null,
            }
        }
        _ => CellValue::String(format!("{:?}", col.data_type())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::io::Write;

    const CSV_HEADER: &str = "Policy,Expiry,Location,State,Region,Investment,Construction,BusinessType,Earthquake,Flood,Rating,id";

    fn sample_csv() -> String {
        format!(
            "{CSV_HEADER}\n\
             P-1,2025-06-30,Urban,Kagera,East,1200000.5,Frame,Retail,N,Y,2.5,1\n\
             P-2,2026-01-15,Rural,Mwanza,West,800000,Masonry,Apartment,Y,N,1.8,2\n"
        )
    }

    #[test]
    fn csv_round_trip_infers_cell_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(sample_csv().as_bytes())
            .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);

        let first = &ds.records[0];
        assert_eq!(first.get("Region"), &CellValue::String("East".into()));
        assert_eq!(first.get("Investment"), &CellValue::Float(1_200_000.5));
        assert_eq!(first.get("Expiry"), &CellValue::Date("2025-06-30".into()));
        assert_eq!(first.get("id"), &CellValue::Integer(1));
        // A whole number still parses as an integer cell.
        assert_eq!(ds.records[1].get("Investment"), &CellValue::Integer(800_000));
    }

    #[test]
    fn missing_required_column_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"Region,Location\nEast,Urban\n")
            .unwrap();

        let err = load_file(&path).unwrap_err();
        match err {
            DataError::DatasetLoad(msg) => {
                assert!(msg.contains("missing required column"), "{msg}");
                assert!(msg.contains("Investment"), "{msg}");
            }
            other => panic!("expected DatasetLoad, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = load_file(Path::new("/nonexistent/records.csv")).unwrap_err();
        assert!(matches!(err, DataError::DatasetLoad(_)));
    }

    #[test]
    fn unsupported_extension_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.xlsx");
        std::fs::File::create(&path).unwrap();

        let err = load_file(&path).unwrap_err();
        match err {
            DataError::DatasetLoad(msg) => assert!(msg.contains(".xlsx"), "{msg}"),
            other => panic!("expected DatasetLoad, got {other:?}"),
        }
    }

    #[test]
    fn json_records_load_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        let json = r#"[
            {"Policy": "P-1", "Region": "East", "Location": "Urban",
             "Construction": "Frame", "BusinessType": "Retail", "State": "Kagera",
             "Investment": 100.0, "Rating": null},
            {"Policy": "P-2", "Region": "West", "Location": "Rural",
             "Construction": "Masonry", "BusinessType": "Tech", "State": "Mwanza",
             "Investment": 50.5, "Rating": 1.2}
        ]"#;
        std::fs::File::create(&path)
            .unwrap()
            .write_all(json.as_bytes())
            .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("Rating"), &CellValue::Null);
        assert_eq!(ds.records[1].get("Investment"), &CellValue::Float(50.5));
    }

    #[test]
    fn parquet_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Region", DataType::Utf8, false),
            Field::new("Location", DataType::Utf8, false),
            Field::new("Construction", DataType::Utf8, false),
            Field::new("BusinessType", DataType::Utf8, false),
            Field::new("State", DataType::Utf8, false),
            Field::new("Investment", DataType::Float64, false),
            Field::new("Rating", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["East", "West"])),
                Arc::new(StringArray::from(vec!["Urban", "Rural"])),
                Arc::new(StringArray::from(vec!["Frame", "Masonry"])),
                Arc::new(StringArray::from(vec!["Retail", "Tech"])),
                Arc::new(StringArray::from(vec!["Kagera", "Mwanza"])),
                Arc::new(Float64Array::from(vec![100.0, 50.5])),
                Arc::new(Float64Array::from(vec![2.5, 1.2])),
            ],
        )
        .unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].get("Region"), &CellValue::String("East".into()));
        assert_eq!(ds.records[1].get("Investment"), &CellValue::Float(50.5));
    }
}
