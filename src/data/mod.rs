/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RestaurantDataset (+ Schema)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ RestaurantDataset │  Vec<Restaurant>, option lists
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply predicates → sorted, truncated view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  counts, histogram, density, scatter series
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
