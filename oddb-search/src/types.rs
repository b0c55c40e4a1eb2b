//! Data types for subject lookups and the host-facing results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Provider name advertised to the host.
pub const PROVIDER_NAME: &str = "OpenDouban";
/// Provider id key under which subject ids are stored.
pub const PROVIDER_ID_KEY: &str = "OddbId";
/// Provider id key of the cross-referenced industry database.
pub const IMDB_ID_KEY: &str = "Imdb";
/// Provider tag attached to image descriptors.
pub const IMAGE_PROVIDER_NAME: &str = "Douban";
/// Language attached to image descriptors.
pub const IMAGE_LANGUAGE: &str = "zh";

/// A movie, series or season record from the remote database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Stable remote identifier
    pub sid: String,
    /// Localized title
    pub name: String,
    /// Title in the original language
    pub original_name: String,
    /// Community rating out of 10
    pub rating: Option<f32>,
    /// Synopsis
    pub intro: String,
    /// Release year
    pub year: Option<i32>,
    /// Homepage URL
    pub site: String,
    /// Genres joined with `/`
    pub genre: String,
    /// Countries joined with `/`
    pub country: String,
    /// Raw premiere date, e.g. `2019-07-26(中国大陆)`
    pub screen_time: String,
    /// Industry database cross-reference, may be empty
    pub imdb: String,
    /// Poster URL
    pub img: String,
    /// Cast and crew, empty until fetched
    pub celebrities: Vec<Person>,
}

/// A cast or crew member credited on a subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Remote person identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Raw role label in the source language, e.g. `导演`
    pub role: String,
    /// Credited role or character name
    pub role_name: String,
    /// Portrait URL
    pub img: String,
}

/// A photo attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Large-size URL
    pub large: String,
}

impl Photo {
    /// Wide enough to be used as a backdrop.
    pub fn is_backdrop(&self) -> bool {
        f64::from(self.width) > f64::from(self.height) * 1.3
    }
}

/// Reduced projection of a subject for disambiguation lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    /// Remote subject identifier
    pub sid: String,
    /// Display title
    pub name: String,
    /// Poster thumbnail URL
    pub img: String,
    /// Release year
    pub year: Option<i32>,
    /// Subject id under the provider key
    pub provider_ids: ProviderIds,
}

impl From<&Subject> for SearchCandidate {
    fn from(subject: &Subject) -> Self {
        Self {
            sid: subject.sid.clone(),
            name: subject.name.clone(),
            img: subject.img.clone(),
            year: subject.year,
            provider_ids: ProviderIds::single(PROVIDER_ID_KEY, &subject.sid),
        }
    }
}

/// Media kinds the host can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Whole TV series
    Series,
    /// Single season of a series
    Season,
}

impl MediaKind {
    /// Every kind this provider handles.
    pub const ALL: [MediaKind; 3] = [MediaKind::Movie, MediaKind::Series, MediaKind::Season];
}

/// Image slots the provider can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    /// Poster
    Primary,
    /// Wide background still
    Backdrop,
}

/// Host-facing description of a remote image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Slot the image fills
    pub image_type: ImageType,
    /// Remote image URL
    pub url: String,
    /// Image language tag
    pub language: String,
    /// Source tag shown by the host
    pub provider_name: String,
}

impl ImageDescriptor {
    pub(crate) fn new(image_type: ImageType, url: impl Into<String>) -> Self {
        Self {
            image_type,
            url: url.into(),
            language: IMAGE_LANGUAGE.to_string(),
            provider_name: IMAGE_PROVIDER_NAME.to_string(),
        }
    }
}

/// Fixed taxonomy for cast and crew roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonType {
    /// Director
    Director,
    /// Actor or voice actor, also the fallback for unknown roles
    Actor,
    /// Screenwriter
    Writer,
    /// Producer
    Producer,
    /// Music composer
    Composer,
}

/// Provider key to identifier map, ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderIds(BTreeMap<String, String>);

impl ProviderIds {
    /// Map holding one entry.
    pub fn single(key: &str, id: &str) -> Self {
        let mut ids = Self::default();
        ids.set(key, id);
        ids
    }

    /// Identifier stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Stores `id` under `key`, replacing any previous value.
    pub fn set(&mut self, key: &str, id: &str) {
        self.0.insert(key.to_string(), id.to_string());
    }
}

/// Host-shaped person entry attached to a metadata result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    /// Display name
    pub name: String,
    /// Classified role
    pub person_type: PersonType,
    /// Credited role or character
    pub role: String,
    /// Portrait URL
    pub image_url: String,
    /// Person id under the provider key
    pub provider_ids: ProviderIds,
}

/// Host-shaped metadata for a movie, series or season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Kind requested by the host
    pub kind: MediaKind,
    /// Localized title
    pub name: String,
    /// Title in the original language
    pub original_title: String,
    /// Community rating out of 10
    pub community_rating: Option<f32>,
    /// Synopsis
    pub overview: String,
    /// Release year
    pub production_year: Option<i32>,
    /// Homepage URL
    pub homepage_url: String,
    /// Genre names
    pub genres: Vec<String>,
    /// Production countries
    pub production_locations: Vec<String>,
    /// First premiere date, when the remote gives one
    pub premiere_date: Option<chrono::NaiveDate>,
    /// Subject and cross-reference ids
    pub provider_ids: ProviderIds,
}

/// Outcome of a metadata resolution.
///
/// `has_metadata == false` means "not found", which the host treats as a
/// normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataResult {
    /// Resolved item, `None` when nothing was found
    pub item: Option<MediaItem>,
    /// Cast and crew in remote order
    pub people: Vec<PersonInfo>,
    /// Identifiers to store on the host-side lookup info
    pub provider_ids: ProviderIds,
    /// The record came from a direct id lookup
    pub queried_by_id: bool,
    /// False means "not found"
    pub has_metadata: bool,
}

/// How a subject should be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQuery {
    /// Direct lookup by remote subject id.
    ByExternalId(String),
    /// Free-text search by (possibly noisy) name.
    ByName(String),
}

impl SearchQuery {
    /// Derives a query from host lookup info.
    ///
    /// A non-blank subject id wins over the name; returns `None` when
    /// neither is usable.
    pub fn from_lookup(info: &LookupInfo) -> Option<Self> {
        if let Some(sid) = info.provider_ids.get(PROVIDER_ID_KEY)
            && !sid.trim().is_empty()
        {
            return Some(SearchQuery::ByExternalId(sid.trim().to_string()));
        }

        info.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| SearchQuery::ByName(name.to_string()))
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchQuery::ByExternalId(sid) => write!(f, "sid:{sid}"),
            SearchQuery::ByName(name) => write!(f, "name:{name}"),
        }
    }
}

/// Host-side lookup input for a library item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupInfo {
    /// Kind of item being looked up
    pub kind: MediaKind,
    /// Title as known to the host, possibly noisy
    pub name: Option<String>,
    /// Identifiers already stored on the item
    pub provider_ids: ProviderIds,
}

impl LookupInfo {
    /// Lookup info with neither a name nor ids.
    pub fn new(kind: MediaKind) -> Self {
        Self {
            kind,
            name: None,
            provider_ids: ProviderIds::default(),
        }
    }

    /// Sets the host-side title.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stores a subject id under the provider key.
    pub fn with_sid(mut self, sid: &str) -> Self {
        self.provider_ids.set(PROVIDER_ID_KEY, sid);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backdrop_ratio_boundary() {
        let photo = |width, height| Photo {
            width,
            height,
            large: String::new(),
        };

        assert!(photo(800, 600).is_backdrop());
        assert!(!photo(400, 600).is_backdrop());
        // exactly 1.3 is not wide enough
        assert!(!photo(130, 100).is_backdrop());
        assert!(photo(131, 100).is_backdrop());
    }

    #[test]
    fn test_query_from_lookup_prefers_sid() {
        let info = LookupInfo::new(MediaKind::Movie)
            .with_name("Movie A")
            .with_sid("12345");
        assert_eq!(
            SearchQuery::from_lookup(&info),
            Some(SearchQuery::ByExternalId("12345".to_string()))
        );

        let info = LookupInfo::new(MediaKind::Series)
            .with_name("Movie A")
            .with_sid("  ");
        assert_eq!(
            SearchQuery::from_lookup(&info),
            Some(SearchQuery::ByName("Movie A".to_string()))
        );

        let info = LookupInfo::new(MediaKind::Season).with_name(" ");
        assert_eq!(SearchQuery::from_lookup(&info), None);
    }

    #[test]
    fn test_candidate_carries_provider_id() {
        let subject = Subject {
            sid: "42".to_string(),
            name: "Movie A".to_string(),
            img: "https://img/42.jpg".to_string(),
            year: Some(2019),
            ..Subject::default()
        };

        let candidate = SearchCandidate::from(&subject);
        assert_eq!(candidate.provider_ids.get(PROVIDER_ID_KEY), Some("42"));
        assert_eq!(candidate.year, Some(2019));
        assert_eq!(candidate.img, "https://img/42.jpg");
    }
}
