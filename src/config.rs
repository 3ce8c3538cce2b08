// Runtime configuration.
// Where the dataset comes from, where it is cached and how long to wait for the remote.

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::paths;

/// Published knowledge-base dataset.
pub const DEFAULT_URL: &str = "https://github.com/Amuze-Me/knowledge-base/raw/main/kb.csv";

/// Default network timeout for the conditional fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote dataset location.
    pub remote_url: String,
    /// Local copy of the dataset.
    pub dataset_path: PathBuf,
    /// Local validator token (HTTP entity tag) for `dataset_path`.
    pub token_path: PathBuf,
    /// Network timeout for a refresh.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: DEFAULT_URL.to_string(),
            dataset_path: paths::dataset_path(),
            token_path: paths::token_path(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
