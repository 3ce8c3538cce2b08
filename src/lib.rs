// amuse: pick a random knowledge-base entry by tag.
// The dataset is fetched once per run with a conditional GET and cached locally.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod kb;
pub mod remote;

pub use config::Config;
pub use error::{AmuseError, ErrorKind, Result};
