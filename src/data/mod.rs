/// Data layer: core types, loading, and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .json  (wide export)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → WideTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ WideTable │  period labels × category rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  select category row, melt, parse dates → MonthlySeries
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod reshape;
