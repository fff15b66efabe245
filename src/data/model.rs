use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Schema constants
// ---------------------------------------------------------------------------

/// Columns every dataset must provide; the loader rejects files without them.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Region",
    "Location",
    "Construction",
    "BusinessType",
    "State",
    "Investment",
    "Rating",
];

/// The columns exposed as sidebar multi-select filters.
pub const FILTER_COLUMNS: [&str; 3] = ["Region", "Location", "Construction"];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the record table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) | CellValue::Date(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whether the value carries a number (`Integer` or `Float`).
    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single record (one row of the source table).
#[derive(Debug, Clone)]
pub struct Record {
    /// Dynamic columns: column_name → value.
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    /// Value of a column; `Null` if the column is absent from this record.
    pub fn get(&self, column: &str) -> &CellValue {
        self.values.get(column).unwrap_or(&CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed column indices.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Ordered list of column names.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl Dataset {
    /// Build column indices from the loaded records.
    ///
    /// Records missing a column another record declares are padded with
    /// `Null`, so every record ends up with a value for every column.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        let mut column_names_set: BTreeSet<String> = BTreeSet::new();
        for rec in &records {
            for col in rec.values.keys() {
                column_names_set.insert(col.clone());
            }
        }

        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = BTreeMap::new();
        for rec in &mut records {
            for col in &column_names_set {
                let val = rec.values.entry(col.clone()).or_insert(CellValue::Null);
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }

        let column_names: Vec<String> = column_names_set.into_iter().collect();
        Dataset {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the dataset declares the given column.
    pub fn has_column(&self, column: &str) -> bool {
        self.unique_values.contains_key(column)
    }

    /// Columns whose values are numeric in at least one record.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.column_names
            .iter()
            .filter(|col| {
                self.unique_values
                    .get(*col)
                    .is_some_and(|vals| vals.iter().any(CellValue::is_numeric))
            })
            .cloned()
            .collect()
    }
}
