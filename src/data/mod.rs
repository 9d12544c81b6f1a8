/// Data layer: core types, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  day.csv / hour.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RowTable (header order, typed cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ outliers  │  IQR fences, one numeric column at a time → cleaned RowTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range + season set → filtered RowTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  box stats, correlations, group-by means, totals
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod outliers;
pub mod summary;
