// Cache module for the locally stored dataset.
// Keeps the dataset and its validator token fresh via conditional HTTP retrieval.

pub mod paths;
pub mod refresh;
pub mod store;

pub use refresh::{CacheEntry, CachePolicy, RefreshOutcome, prepare_cache, refresh_if_changed};
pub use store::{read_token, write_bytes, write_text};
