// Cache path utilities.
// Resolves where the cached dataset and its validator token live on disk.

use std::path::PathBuf;

use directories::ProjectDirs;

/// File name of the cached dataset.
pub const DATASET_FILE: &str = "kb_local.csv";

/// File name of the stored validator token.
pub const TOKEN_FILE: &str = "kb_etag";

/// Get the base cache directory (~/.cache/amuse on Linux).
/// Falls back to the system temp directory when no home directory is known.
pub fn cache_dir() -> PathBuf {
    ProjectDirs::from("", "", "amuse")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join("amuse"))
}

/// Default path of the cached dataset.
pub fn dataset_path() -> PathBuf {
    cache_dir().join(DATASET_FILE)
}

/// Default path of the validator token file.
pub fn token_path() -> PathBuf {
    cache_dir().join(TOKEN_FILE)
}
