//! Open Douban API server client.

use async_trait::async_trait;
use oddb_core::config::ApiConfig;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tokio_util::sync::CancellationToken;

use super::{SubjectApiClient, cancellable};
use crate::errors::SearchError;
use crate::types::{Person, Photo, Subject};

/// HTTP client for an Open Douban API server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct OpenDoubanClient {
    client: reqwest::Client,
    base_url: String,
}

/// Subject as returned by `/movies` endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiSubject {
    sid: Option<String>,
    name: Option<String>,
    original_name: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    rating: Option<f64>,
    img: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    year: Option<f64>,
    intro: Option<String>,
    site: Option<String>,
    genre: Option<String>,
    country: Option<String>,
    screen_time: Option<String>,
    imdb: Option<String>,
}

/// Celebrity as returned by `/movies/{sid}/celebrities`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ApiCelebrity {
    id: Option<String>,
    name: Option<String>,
    role: Option<String>,
    #[serde(alias = "rolename")]
    role_name: Option<String>,
    img: Option<String>,
}

/// Photo as returned by `/photo/{sid}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPhoto {
    width: u32,
    height: u32,
    large: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts `8.5`, `"8.5"`, `""` and `null`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(n)) => Some(n),
            Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
            None => None,
        },
    )
}

/// Ratings outside the finite `f32` range are dropped.
fn rating_value(rating: f64) -> Option<f32> {
    if rating.is_finite() && rating.abs() <= f64::from(f32::MAX) {
        Some(rating as f32)
    } else {
        None
    }
}

/// Years are rounded; values that do not fit an `i32` are dropped.
fn year_value(year: f64) -> Option<i32> {
    let rounded = year.round();
    if !rounded.is_finite() {
        return None;
    }
    i32::try_from(rounded as i64).ok()
}

impl From<ApiSubject> for Subject {
    fn from(api: ApiSubject) -> Self {
        Subject {
            sid: api.sid.unwrap_or_default(),
            name: api.name.unwrap_or_default(),
            original_name: api.original_name.unwrap_or_default(),
            rating: api.rating.and_then(rating_value),
            intro: api.intro.unwrap_or_default(),
            year: api.year.and_then(year_value),
            site: api.site.unwrap_or_default(),
            genre: api.genre.unwrap_or_default(),
            country: api.country.unwrap_or_default(),
            screen_time: api.screen_time.unwrap_or_default(),
            imdb: api.imdb.unwrap_or_default(),
            img: api.img.unwrap_or_default(),
            celebrities: Vec::new(),
        }
    }
}

impl From<ApiCelebrity> for Person {
    fn from(api: ApiCelebrity) -> Self {
        Person {
            id: api.id.unwrap_or_default(),
            name: api.name.unwrap_or_default(),
            role: api.role.unwrap_or_default(),
            role_name: api.role_name.unwrap_or_default(),
            img: api.img.unwrap_or_default(),
        }
    }
}

impl From<ApiPhoto> for Photo {
    fn from(api: ApiPhoto) -> Self {
        Photo {
            width: api.width,
            height: api.height,
            large: api.large.unwrap_or_default(),
        }
    }
}

impl OpenDoubanClient {
    /// Create client with custom configuration.
    ///
    /// # Errors
    /// - `SearchError::RemoteFetchFailure` - HTTP client could not be built
    pub fn with_config(config: &ApiConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SearchError::remote(&config.base_url, e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON document; `Ok(None)` on 404.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Option<T>, SearchError> {
        cancellable(cancel, async {
            tracing::debug!(url, ?query, "Open Douban request");

            let response = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|e| SearchError::remote(url, e))?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }
            if !status.is_success() {
                return Err(SearchError::BadStatus {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .json::<T>()
                .await
                .map_err(|e| SearchError::remote(url, format!("JSON parsing failed: {e}")))?;

            Ok(Some(body))
        })
        .await
    }

    fn subject_url(&self, sid: &str) -> String {
        format!("{}/movies/{}", self.base_url, urlencoding::encode(sid))
    }
}

#[async_trait]
impl SubjectApiClient for OpenDoubanClient {
    async fn lookup_by_id(
        &self,
        id: &str,
        params: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<Option<Subject>, SearchError> {
        let url = self.subject_url(id);
        let subject: Option<ApiSubject> = self.get_json(&url, params, cancel).await?;
        Ok(subject.map(Subject::from))
    }

    async fn search_by_name(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Subject>, SearchError> {
        let url = format!("{}/movies", self.base_url);
        let params = [("q", text), ("type", "partial")];

        let subjects: Option<Vec<ApiSubject>> = self.get_json(&url, &params, cancel).await?;
        Ok(subjects
            .unwrap_or_default()
            .into_iter()
            .map(Subject::from)
            .collect())
    }

    async fn photos_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Photo>>, SearchError> {
        let url = format!("{}/photo/{}", self.base_url, urlencoding::encode(id));
        let photos: Option<Vec<ApiPhoto>> = self.get_json(&url, &[], cancel).await?;
        Ok(photos.map(|photos| photos.into_iter().map(Photo::from).collect()))
    }

    async fn persons_by_id(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<Person>, SearchError> {
        let url = format!("{}/celebrities", self.subject_url(id));
        let celebrities: Option<Vec<ApiCelebrity>> = self.get_json(&url, &[], cancel).await?;
        Ok(celebrities
            .unwrap_or_default()
            .into_iter()
            .map(Person::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_decoding_accepts_string_numbers() {
        let json = r#"{
            "sid": "12345",
            "name": "Movie A",
            "originalName": "Movie A Original",
            "rating": "8.5",
            "year": "2019",
            "genre": "Drama/Romance",
            "country": "China / USA",
            "screenTime": "2019-07-26(中国大陆)",
            "imdb": "tt0000001",
            "img": "https://img/p.jpg",
            "intro": null
        }"#;

        let subject: Subject = serde_json::from_str::<ApiSubject>(json).unwrap().into();
        assert_eq!(subject.sid, "12345");
        assert_eq!(subject.original_name, "Movie A Original");
        assert_eq!(subject.rating, Some(8.5));
        assert_eq!(subject.year, Some(2019));
        assert_eq!(subject.intro, "");
        assert_eq!(subject.screen_time, "2019-07-26(中国大陆)");
        assert!(subject.celebrities.is_empty());
    }

    #[test]
    fn test_subject_decoding_tolerates_missing_fields() {
        let subject: Subject = serde_json::from_str::<ApiSubject>(r#"{"sid":"1","rating":""}"#)
            .unwrap()
            .into();
        assert_eq!(subject.rating, None);
        assert_eq!(subject.year, None);
        assert_eq!(subject.genre, "");
    }

    #[test]
    fn test_out_of_range_numbers_are_dropped() {
        let decode = |json: &str| -> Subject {
            serde_json::from_str::<ApiSubject>(json).unwrap().into()
        };

        let subject = decode(r#"{"year":"2019.9","rating":"NaN"}"#);
        assert_eq!(subject.year, Some(2020));
        assert_eq!(subject.rating, None);

        let subject = decode(r#"{"year":1e12,"rating":"inf"}"#);
        assert_eq!(subject.year, None);
        assert_eq!(subject.rating, None);

        let subject = decode(r#"{"year":"NaN","rating":1e300}"#);
        assert_eq!(subject.year, None);
        assert_eq!(subject.rating, None);
    }

    #[test]
    fn test_celebrity_role_name_aliases() {
        let person: Person = serde_json::from_str::<ApiCelebrity>(
            r#"{"id":"7","name":"A","role":"导演","rolename":"Self"}"#,
        )
        .unwrap()
        .into();
        assert_eq!(person.role_name, "Self");

        let person: Person =
            serde_json::from_str::<ApiCelebrity>(r#"{"id":"8","roleName":"Lead"}"#)
                .unwrap()
                .into();
        assert_eq!(person.role_name, "Lead");
    }

    #[test]
    fn test_base_url_is_normalized() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..ApiConfig::default()
        };
        let client = OpenDoubanClient::with_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.subject_url("a b"),
            "http://localhost:5000/movies/a%20b"
        );
    }
}
