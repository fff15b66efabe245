/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, column index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply column predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ stats / progress  │  summary cards, chart series, target percent
///   └──────────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod progress;
pub mod stats;
