//! Raw image byte fetching.

use bytes::Bytes;
use oddb_core::config::ApiConfig;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::providers::cancellable;

/// Downloads image bytes for descriptors returned by the resolvers.
///
/// Pure passthrough: no caching, no retries.
#[derive(Debug, Clone)]
pub struct ImageFetcher {
    client: reqwest::Client,
}

impl ImageFetcher {
    /// Wraps an existing HTTP client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher using the API timeout and user agent.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - HTTP client could not be built
    pub fn with_config(config: &ApiConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SearchError::remote(&config.base_url, e))?;
        Ok(Self::new(client))
    }

    /// Fetch the body at `url`.
    ///
    /// # Errors
    /// - `SearchError::BadStatus` - Remote answered with a non-success status
    /// - `SearchError::RemoteFetchFailure` - Transport failure
    /// - `SearchError::Cancelled` - Cancellation token fired
    pub async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<Bytes, SearchError> {
        tracing::info!(url, "Fetching image");

        cancellable(cancel, async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| SearchError::remote(url, e))?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(url, status = status.as_u16(), "Image fetch rejected");
                return Err(SearchError::BadStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            response
                .bytes()
                .await
                .map_err(|e| SearchError::remote(url, e))
        })
        .await
    }
}

impl Default for ImageFetcher {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_respects_cancellation() {
        let fetcher = ImageFetcher::default();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = fetcher
            .fetch("http://127.0.0.1:9/never.jpg", &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_transport_failure_is_remote_error() {
        let fetcher = ImageFetcher::default();

        // nothing listens on the discard port
        let err = fetcher
            .fetch("http://127.0.0.1:9/never.jpg", &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::RemoteFetchFailure { .. }));
    }
}
