//! Minute-of-day bucketing and window selection.

pub mod buckets;
pub mod window;

pub use buckets::BucketIndex;
pub use window::{select_range, Selection, DEFAULT_HALF_WIDTH};
