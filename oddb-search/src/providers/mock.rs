//! In-memory subject client for testing.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::{SubjectApiClient, cancellable};
use crate::errors::SearchError;
use crate::types::{Person, Photo, Subject};

/// A call observed by [`StaticSubjectClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    /// Subject lookup with its query parameters.
    Lookup {
        /// Requested subject id
        id: String,
        /// Query parameters, in call order
        params: Vec<(String, String)>,
    },
    /// Partial-text search.
    Search {
        /// Text sent to the remote
        text: String,
    },
    /// Photo listing.
    Photos {
        /// Requested subject id
        id: String,
    },
    /// Cast/crew listing.
    Persons {
        /// Requested subject id
        id: String,
    },
}

/// Subject client serving canned data and recording every call.
#[derive(Debug, Default)]
pub struct StaticSubjectClient {
    subjects: HashMap<String, Subject>,
    searches: HashMap<String, Vec<Subject>>,
    photos: HashMap<String, Vec<Photo>>,
    persons: HashMap<String, Vec<Person>>,
    failing_persons: bool,
    failing_photos: bool,
    hanging_lookups: bool,
    calls: Mutex<Vec<ClientCall>>,
}

impl StaticSubjectClient {
    /// Creates an empty client; every lookup misses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `subject` for lookups of its sid.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.insert(subject.sid.clone(), subject);
        self
    }

    /// Serves `results` for an exact search text.
    pub fn with_search(mut self, text: &str, results: Vec<Subject>) -> Self {
        self.searches.insert(text.to_string(), results);
        self
    }

    /// Serves `photos` for a sid; sids without photos return `None`.
    pub fn with_photos(mut self, sid: &str, photos: Vec<Photo>) -> Self {
        self.photos.insert(sid.to_string(), photos);
        self
    }

    /// Serves `persons` for a sid.
    pub fn with_persons(mut self, sid: &str, persons: Vec<Person>) -> Self {
        self.persons.insert(sid.to_string(), persons);
        self
    }

    /// Makes every cast/crew fetch fail with a 500.
    pub fn failing_persons(mut self) -> Self {
        self.failing_persons = true;
        self
    }

    /// Makes every photo fetch fail with a 500.
    pub fn failing_photos(mut self) -> Self {
        self.failing_photos = true;
        self
    }

    /// Makes every lookup wait until cancelled.
    pub fn hanging_lookups(mut self) -> Self {
        self.hanging_lookups = true;
        self
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl SubjectApiClient for StaticSubjectClient {
    async fn lookup_by_id(
        &self,
        id: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Option<Subject>, SearchError> {
        self.record(ClientCall::Lookup {
            id: id.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if self.hanging_lookups {
            return cancellable(cancel, std::future::pending()).await;
        }

        cancellable(cancel, async { Ok(self.subjects.get(id).cloned()) }).await
    }

    async fn search_by_name(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Subject>, SearchError> {
        self.record(ClientCall::Search {
            text: text.to_string(),
        });
        cancellable(cancel, async {
            Ok(self.searches.get(text).cloned().unwrap_or_default())
        })
        .await
    }

    async fn photos_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Photo>>, SearchError> {
        self.record(ClientCall::Photos { id: id.to_string() });

        if self.failing_photos {
            return Err(SearchError::BadStatus {
                url: format!("mock://photo/{id}"),
                status: 500,
            });
        }

        cancellable(cancel, async { Ok(self.photos.get(id).cloned()) }).await
    }

    async fn persons_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Person>, SearchError> {
        self.record(ClientCall::Persons { id: id.to_string() });

        if self.failing_persons {
            return Err(SearchError::BadStatus {
                url: format!("mock://movies/{id}/celebrities"),
                status: 500,
            });
        }

        cancellable(cancel, async {
            Ok(self.persons.get(id).cloned().unwrap_or_default())
        })
        .await
    }
}
