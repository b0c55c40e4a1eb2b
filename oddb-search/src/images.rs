//! Primary poster and backdrop resolution for a subject.

use std::sync::Arc;

use oddb_core::SharedConfig;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::providers::SubjectApiClient;
use crate::types::{ImageDescriptor, ImageType, MediaKind, Photo};

const SUPPORTED_IMAGES: [ImageType; 2] = [ImageType::Primary, ImageType::Backdrop];

/// Resolves the images a host can attach to a library item.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    client: Arc<dyn SubjectApiClient>,
    config: SharedConfig,
}

impl ImageResolver {
    /// Creates a resolver over `client`, reading the poster size from `config`
    /// on every call.
    pub fn new(client: Arc<dyn SubjectApiClient>, config: SharedConfig) -> Self {
        Self { client, config }
    }

    /// Whether images can be supplied for this kind of item.
    pub fn supports(&self, kind: MediaKind) -> bool {
        MediaKind::ALL.contains(&kind)
    }

    /// Image types supplied for an item.
    pub fn supported_images(&self) -> &'static [ImageType] {
        &SUPPORTED_IMAGES
    }

    /// Resolve the primary poster followed by wide-format backdrops.
    ///
    /// A blank `subject_id` is logged and yields an empty list without any
    /// remote call.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Poster lookup failed
    /// - `SearchError::BadStatus` - Poster lookup answered with a non-success status
    /// - `SearchError::Cancelled` - Cancellation token fired
    pub async fn resolve_images(
        &self,
        subject_id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageDescriptor>, SearchError> {
        let sid = subject_id.trim();
        if sid.is_empty() {
            tracing::warn!(error = %SearchError::EmptyIdentifier, "Skipping image lookup");
            return Ok(Vec::new());
        }

        tracing::info!(sid, "Resolving images");

        let poster_size = self.config.poster_size();
        let params: Vec<(&str, &str)> = if poster_size.is_empty() {
            Vec::new()
        } else {
            vec![("s", poster_size.as_str())]
        };

        let primary = self.client.lookup_by_id(sid, &params, cancel).await?;
        let backdrops = self.backdrops(sid, cancel).await?;

        let mut images = Vec::with_capacity(backdrops.len() + 1);
        match primary {
            Some(subject) if !subject.img.is_empty() => {
                images.push(ImageDescriptor::new(ImageType::Primary, subject.img));
            }
            Some(_) => tracing::debug!(sid, "Subject has no poster"),
            None => tracing::warn!(sid, "Subject not found, no primary image"),
        }
        images.extend(backdrops);

        Ok(images)
    }

    /// Backdrop descriptors for a subject, in photo-source order.
    ///
    /// Absent photo data and failed photo fetches both yield an empty list.
    ///
    /// # Errors
    /// - `SearchError::Cancelled` - Cancellation token fired
    pub async fn backdrops(
        &self,
        sid: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<ImageDescriptor>, SearchError> {
        let photos = match self.client.photos_by_id(sid, cancel).await {
            Ok(Some(photos)) => photos,
            Ok(None) => {
                tracing::debug!(sid, "No photo data");
                return Ok(Vec::new());
            }
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::warn!(sid, error = %e, "Photo fetch failed, skipping backdrops");
                return Ok(Vec::new());
            }
        };

        let backdrops = select_backdrops(&photos);
        tracing::debug!(sid, photos = photos.len(), backdrops = backdrops.len(), "Filtered photos");
        Ok(backdrops)
    }
}

/// Keeps photos wider than 1.3:1, preserving order.
pub fn select_backdrops(photos: &[Photo]) -> Vec<ImageDescriptor> {
    photos
        .iter()
        .filter(|photo| photo.is_backdrop())
        .map(|photo| ImageDescriptor::new(ImageType::Backdrop, photo.large.clone()))
        .collect()
}
