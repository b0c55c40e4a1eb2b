//! oddb Search - Open Douban metadata and image lookup

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Translates subjects from an Open Douban API server into the metadata and
//! image shapes a media-server host expects: resolving ids or noisy titles
//! to subjects, splitting delimited fields, classifying cast/crew roles, and
//! picking wide photos as backdrops.

pub mod capabilities;
pub mod errors;
pub mod fetch;
pub mod images;
pub mod metadata;
pub mod providers;
pub mod roles;
pub mod types;

// Re-export main types
pub use capabilities::{Capability, CapabilityRegistry, ProviderDescriptor, register_capabilities};
pub use errors::SearchError;
pub use fetch::ImageFetcher;
pub use images::ImageResolver;
pub use metadata::MetadataResolver;
pub use providers::{OpenDoubanClient, SubjectApiClient};
pub use roles::classify_role;
pub use types::{
    ImageDescriptor, ImageType, LookupInfo, MediaItem, MediaKind, MetadataResult, Person,
    PersonInfo, PersonType, Photo, ProviderIds, SearchCandidate, SearchQuery, Subject,
};

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
