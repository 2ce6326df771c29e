/// Data layer: core types, loading, selection and chart transforms.
///
/// Architecture:
/// ```text
///  SN_m_tot_V2.0.csv  (semicolon-separated, no header)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SunspotDataset (optionally cached)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ SunspotDataset │  Vec<Observation>, immutable
///   └────────────────┘
///        │
///        ├──▶ filter     year interval → &[Observation]
///        ▼
///   ┌───────────┐
///   │ transform │  range + moving average / cycle fold → ChartSpec
///   └───────────┘
/// ```

pub mod chart;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod transform;
