// Types shared by remote dataset sources.

use crate::error::Result;

/// Result of a conditional fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The remote copy matches the presented token; keep the local dataset.
    NotModified,
    /// Full body returned, with the validator the remote attached to it.
    Modified { body: Vec<u8>, etag: Option<String> },
}

/// A remote resource that can be fetched conditionally against a validator token.
#[allow(async_fn_in_trait)]
pub trait RemoteSource {
    /// Human-readable location, used in logs.
    fn location(&self) -> &str;

    /// Fetch the resource, asking the remote to answer "not modified" when
    /// `token` still identifies its current version.
    async fn fetch(&self, token: Option<&str>) -> Result<FetchOutcome>;
}
