/// Data layer: document types, key formatting, and loading.
///
/// Architecture:
/// ```text
///   plots.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  read file → DataDocument
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DataDocument │  derivative series by step-size key, integral records
///   └──────────────┘
///        ▲
///        │ lookup key
///   ┌──────────┐
///   │   key    │  step size → "0.2" / "0.200000"
///   └──────────┘
/// ```

pub mod key;
pub mod loader;
pub mod model;
