//! Subject search and metadata resolution.
//!
//! Maps a subject id or a noisy file-derived title onto a remote subject,
//! then translates the record and its cast/crew into host metadata.

use std::sync::Arc;

use chrono::NaiveDate;
use oddb_core::{CastFailurePolicy, SharedConfig};
use regex::Regex;
use tokio_util::sync::CancellationToken;

use crate::errors::SearchError;
use crate::providers::SubjectApiClient;
use crate::roles::classify_role;
use crate::types::{
    IMDB_ID_KEY, LookupInfo, MediaItem, MediaKind, MetadataResult, PROVIDER_ID_KEY, PersonInfo,
    ProviderIds, SearchCandidate, SearchQuery, Subject,
};

/// Resolves search candidates and full metadata for library items.
#[derive(Debug, Clone)]
pub struct MetadataResolver {
    client: Arc<dyn SubjectApiClient>,
    config: SharedConfig,
    name_pattern: Option<String>,
}

impl MetadataResolver {
    /// Creates a resolver over `client`. Name pattern and cast failure policy
    /// are read from `config` on every call.
    pub fn new(client: Arc<dyn SubjectApiClient>, config: SharedConfig) -> Self {
        Self {
            client,
            config,
            name_pattern: None,
        }
    }

    /// Cleans names with `pattern` instead of the configured one.
    ///
    /// A blank override is ignored.
    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.name_pattern = (!pattern.trim().is_empty()).then_some(pattern);
        self
    }

    /// Pattern applied to names before searching.
    pub fn name_pattern(&self) -> String {
        self.name_pattern
            .clone()
            .unwrap_or_else(|| self.config.name_pattern())
    }

    /// Candidates for a disambiguation list.
    ///
    /// Names are searched as given; no cleaning is applied here.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - Lookup or search failed
    /// - `SearchError::BadStatus` - Remote answered with a non-success status
    /// - `SearchError::Cancelled` - Cancellation token fired
    pub async fn search(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchCandidate>, SearchError> {
        tracing::info!(%query, "Searching subjects");

        let candidates: Vec<SearchCandidate> = match query {
            SearchQuery::ByExternalId(sid) if sid.trim().is_empty() => {
                tracing::warn!(error = %SearchError::EmptyIdentifier, "Skipping search");
                Vec::new()
            }
            SearchQuery::ByExternalId(sid) => self
                .client
                .lookup_by_id(sid.trim(), &[], cancel)
                .await?
                .map(|subject| vec![SearchCandidate::from(&subject)])
                .unwrap_or_default(),
            SearchQuery::ByName(name) if name.trim().is_empty() => Vec::new(),
            SearchQuery::ByName(name) => self
                .client
                .search_by_name(name, cancel)
                .await?
                .iter()
                .map(SearchCandidate::from)
                .collect(),
        };

        if candidates.is_empty() {
            tracing::info!(%query, "Search found nothing");
        }

        Ok(candidates)
    }

    /// Full metadata for a query.
    ///
    /// "Not found" outcomes (blank id, empty search, missing subject) return
    /// an empty result with `has_metadata == false` rather than an error.
    ///
    /// # Errors
    /// - `SearchError::InvalidPattern` - Configured name pattern does not compile
    /// - `SearchError::RemoteFetchFailure` - A remote call failed
    /// - `SearchError::BadStatus` - Remote answered with a non-success status
    /// - `SearchError::Cancelled` - Cancellation token fired
    pub async fn resolve(
        &self,
        query: &SearchQuery,
        kind: MediaKind,
        cancel: &CancellationToken,
    ) -> Result<MetadataResult, SearchError> {
        tracing::info!(%query, ?kind, "Resolving metadata");

        let sid = match self.resolve_sid(query, cancel).await {
            Ok(sid) => sid,
            Err(e @ (SearchError::EmptyIdentifier | SearchError::NoMatchFound { .. })) => {
                tracing::info!(%query, reason = %e, "No metadata");
                return Ok(MetadataResult::default());
            }
            Err(e) => return Err(e),
        };

        // Both calls only need the sid, so they run side by side.
        let (subject, persons) = tokio::join!(
            self.client.lookup_by_id(&sid, &[], cancel),
            self.client.persons_by_id(&sid, cancel),
        );

        let Some(mut subject) = subject? else {
            tracing::info!(sid = %sid, "Subject not found");
            return Ok(MetadataResult::default());
        };
        if subject.sid.is_empty() {
            subject.sid = sid.clone();
        }

        subject.celebrities = match persons {
            Ok(persons) => persons,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => match self.config.cast_failure_policy() {
                CastFailurePolicy::Fail => return Err(e),
                CastFailurePolicy::Partial => {
                    tracing::warn!(
                        sid = %sid,
                        error = %e,
                        "Cast fetch failed, returning record without people"
                    );
                    Vec::new()
                }
            },
        };

        let result = build_metadata(&subject, kind);
        tracing::info!(
            sid = %sid,
            name = %subject.name,
            people = result.people.len(),
            "Resolved metadata"
        );
        Ok(result)
    }

    /// [`search`](Self::search) driven by host lookup info.
    ///
    /// # Errors
    /// Same as [`search`](Self::search).
    pub async fn search_lookup(
        &self,
        info: &LookupInfo,
        cancel: &CancellationToken,
    ) -> Result<Vec<SearchCandidate>, SearchError> {
        match SearchQuery::from_lookup(info) {
            Some(query) => self.search(&query, cancel).await,
            None => {
                tracing::info!("Lookup info has neither id nor name");
                Ok(Vec::new())
            }
        }
    }

    /// [`resolve`](Self::resolve) driven by host lookup info.
    ///
    /// # Errors
    /// Same as [`resolve`](Self::resolve).
    pub async fn resolve_lookup(
        &self,
        info: &LookupInfo,
        cancel: &CancellationToken,
    ) -> Result<MetadataResult, SearchError> {
        match SearchQuery::from_lookup(info) {
            Some(query) => self.resolve(&query, info.kind, cancel).await,
            None => {
                tracing::info!("Lookup info has neither id nor name");
                Ok(MetadataResult::default())
            }
        }
    }

    /// Subject id a query refers to. Names go through cleaning and a
    /// partial search; the first candidate wins.
    async fn resolve_sid(
        &self,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> Result<String, SearchError> {
        match query {
            SearchQuery::ByExternalId(sid) => {
                let sid = sid.trim();
                if sid.is_empty() {
                    return Err(SearchError::EmptyIdentifier);
                }
                Ok(sid.to_string())
            }
            SearchQuery::ByName(raw) => {
                let name = clean_name(raw, &self.name_pattern())?;
                if name.is_empty() {
                    return Err(SearchError::NoMatchFound { query: raw.clone() });
                }
                tracing::debug!(raw = %raw, cleaned = %name, "Cleaned name");

                // Ties are broken by remote ranking order only.
                let first = self
                    .client
                    .search_by_name(&name, cancel)
                    .await?
                    .into_iter()
                    .find(|subject| !subject.sid.trim().is_empty())
                    .ok_or_else(|| SearchError::NoMatchFound { query: name.clone() })?;

                Ok(first.sid.trim().to_string())
            }
        }
    }
}

/// Replaces matches of `pattern` in a name with a space.
///
/// Whitespace runs are collapsed before matching and the result is only
/// trimmed afterwards, so the replacement never joins text into a new match.
/// An empty pattern leaves the name as is apart from whitespace.
///
/// # Errors
/// - `SearchError::InvalidPattern` - `pattern` is not a valid regex
pub fn clean_name(raw: &str, pattern: &str) -> Result<String, SearchError> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if pattern.is_empty() {
        return Ok(normalized);
    }

    let regex = Regex::new(pattern).map_err(|e| SearchError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(regex.replace_all(&normalized, " ").trim().to_string())
}

/// Splits a `/`-joined field into trimmed, non-empty segments.
pub fn split_delimited(value: &str) -> Vec<String> {
    value
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the leading `YYYY-MM-DD` of a premiere string such as
/// `2019-07-26(中国大陆)`.
pub fn parse_premiere_date(value: &str) -> Option<NaiveDate> {
    let prefix = value.trim().get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

/// Translates a resolved subject into host metadata.
pub fn build_metadata(subject: &Subject, kind: MediaKind) -> MetadataResult {
    let mut provider_ids = ProviderIds::single(PROVIDER_ID_KEY, &subject.sid);
    let imdb = subject.imdb.trim();
    if !imdb.is_empty() {
        provider_ids.set(IMDB_ID_KEY, imdb);
    }

    let item = MediaItem {
        kind,
        name: subject.name.clone(),
        original_title: subject.original_name.clone(),
        community_rating: subject.rating,
        overview: subject.intro.clone(),
        production_year: subject.year,
        homepage_url: subject.site.clone(),
        genres: split_delimited(&subject.genre),
        production_locations: split_delimited(&subject.country),
        premiere_date: parse_premiere_date(&subject.screen_time),
        provider_ids: provider_ids.clone(),
    };

    let people = subject
        .celebrities
        .iter()
        .map(|person| PersonInfo {
            name: person.name.clone(),
            person_type: classify_role(&person.role),
            role: person.role_name.clone(),
            image_url: person.img.clone(),
            provider_ids: ProviderIds::single(PROVIDER_ID_KEY, &person.id),
        })
        .collect();

    MetadataResult {
        item: Some(item),
        people,
        provider_ids,
        queried_by_id: true,
        has_metadata: true,
    }
}

#[cfg(test)]
mod tests {
    use oddb_core::config::DEFAULT_NAME_PATTERN;
    use proptest::prelude::*;

    use super::*;
    use crate::providers::{ClientCall, StaticSubjectClient};
    use crate::types::{Person, PersonType};

    fn movie_a() -> Subject {
        Subject {
            sid: "12345".to_string(),
            name: "Movie A".to_string(),
            original_name: "Movie A Original".to_string(),
            rating: Some(8.1),
            intro: "A story.".to_string(),
            year: Some(2019),
            site: "https://movie-a.example".to_string(),
            genre: "Drama/Romance".to_string(),
            country: "China / USA".to_string(),
            screen_time: "2019-07-26(中国大陆)".to_string(),
            imdb: "tt7654321".to_string(),
            img: "https://img/12345.jpg".to_string(),
            celebrities: Vec::new(),
        }
    }

    fn person(id: &str, name: &str, role: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
            role_name: format!("{name} role"),
            img: format!("https://img/p/{id}.jpg"),
        }
    }

    fn resolver(client: StaticSubjectClient) -> (MetadataResolver, Arc<StaticSubjectClient>) {
        let client = Arc::new(client);
        (
            MetadataResolver::new(client.clone(), SharedConfig::default()),
            client,
        )
    }

    #[tokio::test]
    async fn test_resolve_by_id_maps_fields() {
        let (resolver, _) = resolver(
            StaticSubjectClient::new()
                .with_subject(movie_a())
                .with_persons(
                    "12345",
                    vec![person("1", "Zhang", "导演"), person("2", "Li", "灯光师")],
                ),
        );

        let result = resolver
            .resolve(
                &SearchQuery::ByExternalId("12345".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(result.has_metadata);
        assert!(result.queried_by_id);
        let item = result.item.unwrap();
        assert_eq!(item.name, "Movie A");
        assert_eq!(item.original_title, "Movie A Original");
        assert_eq!(item.genres, vec!["Drama", "Romance"]);
        assert_eq!(item.production_locations, vec!["China", "USA"]);
        assert_eq!(item.production_year, Some(2019));
        assert_eq!(item.premiere_date, NaiveDate::from_ymd_opt(2019, 7, 26));
        assert_eq!(result.provider_ids.get(PROVIDER_ID_KEY), Some("12345"));
        assert_eq!(result.provider_ids.get(IMDB_ID_KEY), Some("tt7654321"));

        assert_eq!(result.people.len(), 2);
        assert_eq!(result.people[0].person_type, PersonType::Director);
        assert_eq!(result.people[0].role, "Zhang role");
        assert_eq!(result.people[0].provider_ids.get(PROVIDER_ID_KEY), Some("1"));
        assert_eq!(result.people[1].person_type, PersonType::Actor);
    }

    #[tokio::test]
    async fn test_empty_search_is_not_an_error() {
        let (resolver, client) = resolver(StaticSubjectClient::new());

        let result = resolver
            .resolve(
                &SearchQuery::ByName("X".to_string()),
                MediaKind::Series,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(!result.has_metadata);
        assert!(result.item.is_none());
        assert_eq!(
            client.calls(),
            vec![ClientCall::Search {
                text: "X".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_resolve_by_name_cleans_then_takes_first_candidate() {
        let other = Subject {
            sid: "999".to_string(),
            name: "Movie A 2".to_string(),
            ..Subject::default()
        };
        let (resolver, client) = resolver(
            StaticSubjectClient::new()
                .with_search("Movie A", vec![movie_a(), other])
                .with_subject(movie_a()),
        );

        let result = resolver
            .resolve(
                &SearchQuery::ByName("[Group] Movie A 1080p".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(result.has_metadata);
        assert_eq!(result.provider_ids.get(PROVIDER_ID_KEY), Some("12345"));

        let calls = client.calls();
        assert_eq!(
            calls[0],
            ClientCall::Search {
                text: "Movie A".to_string()
            }
        );
        assert!(calls.contains(&ClientCall::Lookup {
            id: "12345".to_string(),
            params: Vec::new(),
        }));
        assert!(calls.contains(&ClientCall::Persons {
            id: "12345".to_string()
        }));
    }

    #[tokio::test]
    async fn test_blank_id_resolves_to_empty_result() {
        let (resolver, client) = resolver(StaticSubjectClient::new());

        let result = resolver
            .resolve(
                &SearchQuery::ByExternalId(" ".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(result, MetadataResult::default());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_subject_resolves_to_empty_result() {
        let (resolver, _) = resolver(StaticSubjectClient::new());

        let result = resolver
            .resolve(
                &SearchQuery::ByExternalId("404".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert!(!result.has_metadata);
    }

    #[tokio::test]
    async fn test_cast_failure_policy() {
        let client = Arc::new(
            StaticSubjectClient::new()
                .with_subject(movie_a())
                .failing_persons(),
        );
        let config = SharedConfig::default();
        let resolver = MetadataResolver::new(client, config.clone());
        let query = SearchQuery::ByExternalId("12345".to_string());
        let cancel = CancellationToken::new();

        let err = resolver
            .resolve(&query, MediaKind::Movie, &cancel)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));

        config.update(|c| c.cast_failure_policy = CastFailurePolicy::Partial);
        let result = resolver
            .resolve(&query, MediaKind::Movie, &cancel)
            .await
            .unwrap();
        assert!(result.has_metadata);
        assert!(result.people.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_is_distinct_from_failure() {
        let (resolver, _) = resolver(StaticSubjectClient::new().hanging_lookups());
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let err = resolver
            .resolve(
                &SearchQuery::ByExternalId("12345".to_string()),
                MediaKind::Movie,
                &cancel,
            )
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_reported() {
        let client = Arc::new(StaticSubjectClient::new());
        let config = SharedConfig::default();
        config.update(|c| c.name_pattern = "(unclosed".to_string());
        let resolver = MetadataResolver::new(client.clone(), config);

        let err = resolver
            .resolve(
                &SearchQuery::ByName("Movie A".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::InvalidPattern { .. }));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_by_id_and_name() {
        let other = Subject {
            sid: "999".to_string(),
            name: "Movie A 2".to_string(),
            year: Some(2021),
            ..Subject::default()
        };
        let (resolver, _) = resolver(
            StaticSubjectClient::new()
                .with_subject(movie_a())
                .with_search("[Group] Movie A", vec![movie_a(), other]),
        );
        let cancel = CancellationToken::new();

        let by_id = resolver
            .search(&SearchQuery::ByExternalId("12345".to_string()), &cancel)
            .await
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].img, "https://img/12345.jpg");

        let missing = resolver
            .search(&SearchQuery::ByExternalId("1".to_string()), &cancel)
            .await
            .unwrap();
        assert!(missing.is_empty());

        // search passes the raw name through
        let by_name = resolver
            .search(&SearchQuery::ByName("[Group] Movie A".to_string()), &cancel)
            .await
            .unwrap();
        let sids: Vec<&str> = by_name.iter().map(|c| c.sid.as_str()).collect();
        assert_eq!(sids, vec!["12345", "999"]);
        assert_eq!(by_name[1].year, Some(2021));
    }

    #[tokio::test]
    async fn test_lookup_info_round_trip() {
        let (resolver, _) = resolver(StaticSubjectClient::new().with_subject(movie_a()));
        let info = LookupInfo::new(MediaKind::Season)
            .with_name("ignored")
            .with_sid("12345");

        let result = resolver
            .resolve_lookup(&info, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result.provider_ids.get(PROVIDER_ID_KEY), Some("12345"));
        assert_eq!(result.item.unwrap().kind, MediaKind::Season);

        let empty = resolver
            .resolve_lookup(&LookupInfo::new(MediaKind::Movie), &CancellationToken::new())
            .await
            .unwrap();
        assert!(!empty.has_metadata);
    }

    #[tokio::test]
    async fn test_search_lookup_prefers_sid_over_name() {
        let (resolver, client) = resolver(
            StaticSubjectClient::new()
                .with_subject(movie_a())
                .with_search("Movie", vec![movie_a()]),
        );
        let cancel = CancellationToken::new();

        let by_sid = resolver
            .search_lookup(
                &LookupInfo::new(MediaKind::Movie)
                    .with_name("Movie")
                    .with_sid("12345"),
                &cancel,
            )
            .await
            .unwrap();
        assert_eq!(by_sid.len(), 1);
        assert_eq!(
            client.calls(),
            vec![ClientCall::Lookup {
                id: "12345".to_string(),
                params: Vec::new(),
            }]
        );

        let by_name = resolver
            .search_lookup(&LookupInfo::new(MediaKind::Movie).with_name("Movie"), &cancel)
            .await
            .unwrap();
        assert_eq!(by_name[0].sid, "12345");

        let nothing = resolver
            .search_lookup(&LookupInfo::new(MediaKind::Movie), &cancel)
            .await
            .unwrap();
        assert!(nothing.is_empty());
        assert_eq!(client.calls().len(), 2);
    }

    #[test]
    fn test_imdb_only_attached_when_present() {
        let subject = Subject {
            imdb: "  ".to_string(),
            ..movie_a()
        };
        let result = build_metadata(&subject, MediaKind::Movie);
        assert_eq!(result.provider_ids, ProviderIds::single(PROVIDER_ID_KEY, "12345"));
    }

    #[test]
    fn test_split_delimited() {
        assert_eq!(split_delimited("Drama/Romance"), vec!["Drama", "Romance"]);
        assert_eq!(split_delimited("China / USA"), vec!["China", "USA"]);
        assert_eq!(split_delimited(" / a // b / "), vec!["a", "b"]);
        assert!(split_delimited("").is_empty());
    }

    #[test]
    fn test_parse_premiere_date() {
        assert_eq!(
            parse_premiere_date("2019-07-26(中国大陆)"),
            NaiveDate::from_ymd_opt(2019, 7, 26)
        );
        assert_eq!(
            parse_premiere_date(" 2001-01-01 "),
            NaiveDate::from_ymd_opt(2001, 1, 1)
        );
        assert_eq!(parse_premiere_date("2019"), None);
        assert_eq!(parse_premiere_date("中国大陆2019-07-26"), None);
    }

    #[test]
    fn test_clean_name_with_default_pattern() {
        assert_eq!(
            clean_name("[Sub] 流浪地球 (2019) 1080p BluRay x264", DEFAULT_NAME_PATTERN).unwrap(),
            "流浪地球"
        );
        assert_eq!(clean_name("  Movie   A ", "").unwrap(), "Movie A");
    }

    #[test]
    fn test_clean_name_does_not_rejoin_matches() {
        let cleaned = clean_name("x  y", "x y").unwrap();
        assert_eq!(cleaned, "");

        let cleaned = clean_name("sample sample cut cut", "sample cut").unwrap();
        assert!(!Regex::new("sample cut").unwrap().is_match(&cleaned));
        assert_eq!(cleaned, "sample   cut");
    }

    #[tokio::test]
    async fn test_name_pattern_override_takes_precedence() {
        let (resolver, client) = resolver(StaticSubjectClient::new());
        let resolver = resolver.with_name_pattern(r"\s*-\s*Extended$");

        resolver
            .resolve(
                &SearchQuery::ByName("[Group] Movie A - Extended".to_string()),
                MediaKind::Movie,
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            client.calls(),
            vec![ClientCall::Search {
                text: "[Group] Movie A".to_string()
            }]
        );

        let fallback = resolver.with_name_pattern("  ");
        assert_eq!(fallback.name_pattern(), DEFAULT_NAME_PATTERN);
    }

    proptest! {
        #[test]
        fn split_segments_are_trimmed_and_non_empty(value in "[ a-zA-Z/]{0,40}") {
            for segment in split_delimited(&value) {
                prop_assert!(!segment.is_empty());
                prop_assert_eq!(segment.trim(), segment.as_str());
                prop_assert!(!segment.contains('/'));
            }
        }

        #[test]
        fn cleaned_names_have_no_pattern_matches(
            words in prop::collection::vec("[a-z]{1,8}", 1..4),
            noise in prop::collection::vec(
                prop::sample::select(vec!["[Group]", "1080p", "(2019)", "x265", "WEB-DL", "720P"]),
                0..4,
            ),
        ) {
            let mut parts: Vec<String> = words.clone();
            parts.extend(noise.iter().map(|n| n.to_string()));
            let raw = parts.join(" ");

            let cleaned = clean_name(&raw, DEFAULT_NAME_PATTERN).unwrap();
            let regex = Regex::new(DEFAULT_NAME_PATTERN).unwrap();
            prop_assert!(!regex.is_match(&cleaned), "{} still matches", cleaned);
        }

        #[test]
        fn cleaned_names_have_no_matches_of_spaced_pattern(
            words in prop::collection::vec(
                prop::sample::select(vec!["sample", "cut", "movie", "a"]),
                0..10,
            ),
            gaps in prop::collection::vec(" {1,3}", 10),
        ) {
            let raw: String = words
                .iter()
                .zip(&gaps)
                .map(|(word, gap)| format!("{word}{gap}"))
                .collect();

            let cleaned = clean_name(&raw, "sample cut").unwrap();
            let regex = Regex::new("sample cut").unwrap();
            prop_assert!(!regex.is_match(&cleaned), "{} still matches", cleaned);
            prop_assert_eq!(cleaned.trim(), cleaned.as_str());
        }
    }
}
