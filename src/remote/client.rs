// HTTP client for the remote dataset.
// Issues conditional GETs and maps status codes onto fetch outcomes.

use std::time::Duration;

use reqwest::{
    Client, StatusCode, Url,
    header::{ETAG, HeaderMap, HeaderValue, IF_NONE_MATCH, USER_AGENT},
};

use crate::error::{AmuseError, Result};

use super::types::{FetchOutcome, RemoteSource};

/// Remote dataset served over HTTP(S).
pub struct HttpSource {
    client: Client,
    url: Url,
}

impl HttpSource {
    /// Create a source for `url` whose requests give up after `timeout`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("amuse/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(AmuseError::Http)?;

        Self::with_client(client, url)
    }

    /// Create a source around a preconfigured client.
    pub fn with_client(client: Client, url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| AmuseError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self { client, url })
    }
}

impl RemoteSource for HttpSource {
    fn location(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch(&self, token: Option<&str>) -> Result<FetchOutcome> {
        let mut request = self.client.get(self.url.clone());

        if let Some(token) = token {
            match HeaderValue::from_str(token) {
                Ok(value) => request = request.header(IF_NONE_MATCH, value),
                Err(_) => tracing::warn!("stored validator token is not a valid header, ignoring it"),
            }
        }

        let response = request.send().await.map_err(AmuseError::Http)?;

        match response.status() {
            StatusCode::NOT_MODIFIED => Ok(FetchOutcome::NotModified),
            StatusCode::OK => {
                let etag = response
                    .headers()
                    .get(ETAG)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let body = response.bytes().await.map_err(AmuseError::Http)?;

                Ok(FetchOutcome::Modified {
                    body: body.to_vec(),
                    etag,
                })
            }
            status => Err(AmuseError::UnexpectedStatus(status.to_string())),
        }
    }
}
