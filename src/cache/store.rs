// Cache store for reading and writing the cached files.
// Handles atomic replacement and tolerant validator token reads.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

/// Read the stored validator token.
///
/// A missing, empty or non-UTF-8 file is treated as "no token" rather than an
/// error. Only the first whitespace-delimited word of the file is used.
pub fn read_token(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let Ok(text) = String::from_utf8(bytes) else {
        tracing::warn!(path = %path.display(), "ignoring validator token that is not UTF-8");
        return Ok(None);
    };

    Ok(text
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string))
}

/// Replace a file's contents atomically via a sibling temp file.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Write raw text to a cache file (for the validator token).
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    write_bytes(path, text.as_bytes())
}

/// Check if a cache file exists.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}
