// Random tag picker.
// Reads the cached dataset, keeps rows filed under a tag and picks one uniformly.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use rand::Rng;

use crate::error::{AmuseError, Result};

use super::types::{Record, Tag};

/// Parse comma-delimited rows and keep those whose third field is exactly `tag`.
///
/// There is no header row; rows with fewer than three fields are skipped.
pub fn matching_records<R: Read>(reader: R, tag: Tag) -> Result<Vec<Record>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut matches = Vec::new();
    for row in csv.records() {
        let row = row?;
        match Record::from_row(&row) {
            Some(record) if record.tags == tag.as_str() => matches.push(record),
            _ => {}
        }
    }

    Ok(matches)
}

/// Pick one record filed under `tag` from the dataset at `path`.
pub fn pick_random<R: Rng>(path: &Path, tag: Tag, rng: &mut R) -> Result<Record> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AmuseError::MissingDataset(path.to_path_buf()),
        _ => AmuseError::Io(e),
    })?;

    let mut matches = matching_records(io::BufReader::new(file), tag)?;
    if matches.is_empty() {
        return Err(AmuseError::NoMatch(tag));
    }

    tracing::debug!(%tag, candidates = matches.len(), "picking record");
    let index = rng.random_range(0..matches.len());
    Ok(matches.swap_remove(index))
}
