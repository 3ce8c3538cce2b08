// Cache refresher.
// Replays the stored validator token and rewrites the local files only when the remote changed.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::remote::{FetchOutcome, RemoteSource};

use super::store;

/// Local files making up the cache: the dataset and its validator token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub dataset_path: PathBuf,
    pub token_path: PathBuf,
}

impl CacheEntry {
    pub fn new(dataset_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            token_path: token_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.dataset_path, &config.token_path)
    }
}

/// What a refresh did to the local cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Remote unchanged; nothing was written.
    NotModified,
    /// Dataset replaced and token overwritten.
    Downloaded { bytes: usize, etag: Option<String> },
    /// Refresh was not attempted or failed, and the existing dataset is used as is.
    Stale,
}

/// How startup treats the cache before serving lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Any refresh failure is returned to the caller.
    #[default]
    Strict,
    /// A refresh failure is logged and the existing dataset is used, if there is one.
    AllowStale,
    /// Never touch the network.
    Offline,
}

/// Bring the local dataset up to date with `source`.
///
/// The dataset is replaced before the token is written, so an interruption
/// in between leaves a fresh dataset with a stale token. That only costs a
/// redundant download next time.
pub async fn refresh_if_changed<S: RemoteSource>(
    source: &S,
    entry: &CacheEntry,
) -> Result<RefreshOutcome> {
    let token = store::read_token(&entry.token_path)?;
    debug!(url = source.location(), has_token = token.is_some(), "checking remote dataset");

    match source.fetch(token.as_deref()).await? {
        FetchOutcome::NotModified => {
            debug!("dataset is up to date");
            Ok(RefreshOutcome::NotModified)
        }
        FetchOutcome::Modified { body, etag } => {
            store::write_bytes(&entry.dataset_path, &body)?;
            store::write_text(&entry.token_path, etag.as_deref().unwrap_or_default())?;
            info!(
                path = %entry.dataset_path.display(),
                bytes = body.len(),
                "dataset downloaded"
            );
            Ok(RefreshOutcome::Downloaded {
                bytes: body.len(),
                etag,
            })
        }
    }
}

/// Startup step: refresh the cache according to `policy`.
pub async fn prepare_cache<S: RemoteSource>(
    source: &S,
    entry: &CacheEntry,
    policy: CachePolicy,
) -> Result<RefreshOutcome> {
    if policy == CachePolicy::Offline {
        debug!("offline, skipping refresh");
        return Ok(RefreshOutcome::Stale);
    }

    match refresh_if_changed(source, entry).await {
        Ok(outcome) => Ok(outcome),
        Err(e) if policy == CachePolicy::AllowStale && store::exists(&entry.dataset_path) => {
            warn!(error = %e, "refresh failed, using cached dataset");
            Ok(RefreshOutcome::Stale)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AmuseError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Canned remote that records the tokens it was offered.
    struct FakeSource {
        outcome: Option<FetchOutcome>,
        seen: RefCell<Vec<Option<String>>>,
    }

    impl FakeSource {
        fn answering(outcome: FetchOutcome) -> Self {
            Self {
                outcome: Some(outcome),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: None,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl RemoteSource for FakeSource {
        fn location(&self) -> &str {
            "fake://kb.csv"
        }

        async fn fetch(&self, token: Option<&str>) -> Result<FetchOutcome> {
            self.seen.borrow_mut().push(token.map(str::to_string));
            self.outcome
                .clone()
                .ok_or_else(|| AmuseError::UnexpectedStatus("503 Service Unavailable".to_string()))
        }
    }

    fn entry(dir: &TempDir) -> CacheEntry {
        CacheEntry::new(dir.path().join("kb_local.csv"), dir.path().join("kb_etag"))
    }

    #[tokio::test]
    async fn test_first_run_downloads_both_files() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        let source = FakeSource::answering(FetchOutcome::Modified {
            body: b"video,http://a,tech\n".to_vec(),
            etag: Some("\"v1\"".to_string()),
        });

        let outcome = refresh_if_changed(&source, &entry).await.unwrap();

        assert_eq!(
            outcome,
            RefreshOutcome::Downloaded {
                bytes: 20,
                etag: Some("\"v1\"".to_string()),
            }
        );
        assert_eq!(source.seen.borrow().as_slice(), &[None]);
        assert_eq!(fs::read(&entry.dataset_path).unwrap(), b"video,http://a,tech\n");
        assert_eq!(fs::read_to_string(&entry.token_path).unwrap(), "\"v1\"");
    }

    #[tokio::test]
    async fn test_not_modified_leaves_files_untouched() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        fs::write(&entry.dataset_path, "pdf,http://b,arch\n").unwrap();
        fs::write(&entry.token_path, "\"v1\"").unwrap();
        let before = fs::metadata(&entry.dataset_path).unwrap().modified().unwrap();

        let source = FakeSource::answering(FetchOutcome::NotModified);
        let outcome = refresh_if_changed(&source, &entry).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::NotModified);
        assert_eq!(source.seen.borrow().as_slice(), &[Some("\"v1\"".to_string())]);
        assert_eq!(fs::read_to_string(&entry.dataset_path).unwrap(), "pdf,http://b,arch\n");
        assert_eq!(fs::read_to_string(&entry.token_path).unwrap(), "\"v1\"");
        assert_eq!(
            fs::metadata(&entry.dataset_path).unwrap().modified().unwrap(),
            before
        );
    }

    #[tokio::test]
    async fn test_empty_token_file_still_requests() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        fs::write(&entry.token_path, "").unwrap();

        let source = FakeSource::answering(FetchOutcome::Modified {
            body: b"a,b,c\n".to_vec(),
            etag: None,
        });
        refresh_if_changed(&source, &entry).await.unwrap();

        assert_eq!(source.seen.borrow().as_slice(), &[None]);
        assert_eq!(fs::read_to_string(&entry.token_path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_new_body_replaces_old() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        fs::write(&entry.dataset_path, "old,data,here\nmore,old,rows\n").unwrap();
        fs::write(&entry.token_path, "\"v1\"").unwrap();

        let source = FakeSource::answering(FetchOutcome::Modified {
            body: b"new".to_vec(),
            etag: Some("\"v2\"".to_string()),
        });
        refresh_if_changed(&source, &entry).await.unwrap();

        assert_eq!(fs::read(&entry.dataset_path).unwrap(), b"new");
        assert_eq!(fs::read_to_string(&entry.token_path).unwrap(), "\"v2\"");
    }

    #[tokio::test]
    async fn test_strict_propagates_failure() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        fs::write(&entry.dataset_path, "x,y,tech\n").unwrap();

        let err = prepare_cache(&FakeSource::failing(), &entry, CachePolicy::Strict)
            .await
            .unwrap_err();

        assert!(matches!(err, AmuseError::UnexpectedStatus(_)));
    }

    #[tokio::test]
    async fn test_allow_stale_needs_existing_dataset() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);

        let result = prepare_cache(&FakeSource::failing(), &entry, CachePolicy::AllowStale).await;
        assert!(result.is_err());

        fs::write(&entry.dataset_path, "x,y,tech\n").unwrap();
        let outcome = prepare_cache(&FakeSource::failing(), &entry, CachePolicy::AllowStale)
            .await
            .unwrap();
        assert_eq!(outcome, RefreshOutcome::Stale);
    }

    #[tokio::test]
    async fn test_offline_skips_network() {
        let dir = TempDir::new().unwrap();
        let entry = entry(&dir);
        let source = FakeSource::failing();

        let outcome = prepare_cache(&source, &entry, CachePolicy::Offline).await.unwrap();

        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(source.seen.borrow().is_empty());
    }
}
