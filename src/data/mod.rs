/// Data layer: core types, fetching, and filtering.
///
/// Architecture:
/// ```text
///  data.gov.sg datastore / saved response
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  fetch + parse JSON → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ RidershipDataset  │  Vec<Record>, distinct years / types
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  engine   │  criteria → visible indices (via filter)
///   └──────────┘
/// ```

pub mod engine;
pub mod filter;
pub mod model;
pub mod source;
