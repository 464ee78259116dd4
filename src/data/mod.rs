/// Data layer: core types, ingestion, and aggregation.
///
/// Architecture:
/// ```text
///  survey .csv text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  validate header, parse rows → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset  │  Vec<Record>, skipped-row diagnostics
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group by attribute → bin sleep → average → SeriesMap
///   └───────────┘
/// ```

pub mod aggregate;
pub mod loader;
pub mod model;
