//! Subject API client abstraction and implementations.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::types::{Person, Photo, Subject};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod open_douban;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{ClientCall, StaticSubjectClient};
pub use open_douban::OpenDoubanClient;

/// Remote movie/TV database client.
///
/// Implementations are stateless from the caller's point of view and safe to
/// share across concurrent lookups. Every call observes the cancellation
/// token and returns `SearchError::Cancelled` once it fires.
#[async_trait]
pub trait SubjectApiClient: Send + Sync + std::fmt::Debug {
    /// Fetch one subject by id; `None` when the remote has no such subject.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Transport or decoding failure
    /// - `SearchError::BadStatus` - Non-success HTTP status
    /// - `SearchError::Cancelled` - Cancellation token fired
    async fn lookup_by_id(
        &self,
        id: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Option<Subject>, SearchError>;

    /// Partial-text search, candidates in remote ranking order.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Transport or decoding failure
    /// - `SearchError::BadStatus` - Non-success HTTP status
    /// - `SearchError::Cancelled` - Cancellation token fired
    async fn search_by_name(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Subject>, SearchError>;

    /// Photos for a subject; `None` when the remote has no photo data.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Transport or decoding failure
    /// - `SearchError::BadStatus` - Non-success HTTP status
    /// - `SearchError::Cancelled` - Cancellation token fired
    async fn photos_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Photo>>, SearchError>;

    /// Cast and crew credited on a subject.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Transport or decoding failure
    /// - `SearchError::BadStatus` - Non-success HTTP status
    /// - `SearchError::Cancelled` - Cancellation token fired
    async fn persons_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Person>, SearchError>;
}

/// Races a future against the cancellation token.
///
/// The future is dropped, aborting any in-flight request, when the token
/// fires first.
///
/// # Errors
/// - `SearchError::Cancelled` - Token fired before the future completed
/// - Any error produced by the future itself
pub async fn cancellable<T, F>(cancel: &CancellationToken, future: F) -> Result<T, SearchError>
where
    F: Future<Output = Result<T, SearchError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(SearchError::Cancelled),
        result = future => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancellable_passes_through_result() {
        let token = CancellationToken::new();
        let value = cancellable(&token, async { Ok::<_, SearchError>(7) }).await;
        assert_eq!(value.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancellable_aborts_pending_future() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<(), SearchError> =
            cancellable(&token, std::future::pending()).await;
        assert!(result.unwrap_err().is_cancelled());
    }
}
