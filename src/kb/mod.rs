// Knowledge-base module.
// Record and tag types plus the random-by-tag picker over the cached dataset.

pub mod picker;
pub mod types;

pub use picker::{matching_records, pick_random};
pub use types::{Record, Tag};
