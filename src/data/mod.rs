/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  remote .csv / local .csv .json .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch bytes → loader → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset  │  Vec<SalaryRecord>, distinct values per filter column
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selection per column → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics + chart inputs → DashboardSummary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
