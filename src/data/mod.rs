/// Data layer: core types, loading, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site index, payload bounds
///   └──────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  outcome counts + filtered indices per selection
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod aggregate;
