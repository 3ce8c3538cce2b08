// Remote dataset module.
// Provides the conditional-retrieval seam and its HTTP implementation.

pub mod client;
pub mod types;

pub use client::HttpSource;
pub use types::{FetchOutcome, RemoteSource};
