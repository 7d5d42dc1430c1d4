//! Region model: raw census records, the enriched `Region`, and target
//! classification.

pub mod classify;
pub mod model;
pub mod record;

pub use classify::{classify, TargetClass};
pub use model::{Region, RegionTags};
pub use record::RegionRecord;
