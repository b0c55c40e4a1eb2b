//! End-to-end resolution over HTTP.

use oddb_core::CastFailurePolicy;
use oddb_search::types::{IMDB_ID_KEY, PROVIDER_ID_KEY};
use oddb_search::{
    ImageResolver, ImageType, LookupInfo, MediaKind, MetadataResolver, PersonType, SearchQuery,
};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{celebrities_json, movie_a_json, resolver_parts};

async fn mount_movie_a(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/movies/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_a_json()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/12345/celebrities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(celebrities_json()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_images_for_subject() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345"))
        .and(query_param("s", "m"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_a_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photo/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"width": 800, "height": 600, "large": "a"},
            {"width": 400, "height": 600, "large": "b"},
            {"width": 1920, "height": 1080, "large": "c"}
        ])))
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let images = ImageResolver::new(client, config)
        .resolve_images("12345", &CancellationToken::new())
        .await
        .unwrap();

    let summary: Vec<(ImageType, &str)> = images
        .iter()
        .map(|image| (image.image_type, image.url.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (ImageType::Primary, "https://img.example/12345.jpg"),
            (ImageType::Backdrop, "a"),
            (ImageType::Backdrop, "c"),
        ]
    );
}

#[tokio::test]
async fn test_photo_server_error_keeps_primary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_a_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photo/12345"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let images = ImageResolver::new(client, config)
        .resolve_images("12345", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_type, ImageType::Primary);
    assert_eq!(images[0].url, "https://img.example/12345.jpg");
}

#[tokio::test]
async fn test_blank_id_never_hits_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let images = ImageResolver::new(client, config)
        .resolve_images("  ", &CancellationToken::new())
        .await
        .unwrap();

    assert!(images.is_empty());
}

#[tokio::test]
async fn test_metadata_by_id() {
    let server = MockServer::start().await;
    mount_movie_a(&server).await;

    let (client, config) = resolver_parts(&server);
    let result = MetadataResolver::new(client, config)
        .resolve(
            &SearchQuery::ByExternalId("12345".to_string()),
            MediaKind::Movie,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(result.has_metadata);
    assert!(result.queried_by_id);
    assert_eq!(result.provider_ids.get(PROVIDER_ID_KEY), Some("12345"));
    assert_eq!(result.provider_ids.get(IMDB_ID_KEY), Some("tt1234567"));

    let item = result.item.as_ref().unwrap();
    assert_eq!(item.genres, vec!["Drama", "Romance"]);
    assert_eq!(item.production_locations, vec!["China", "USA"]);
    assert_eq!(item.community_rating, Some(7.9));

    let types: Vec<PersonType> = result.people.iter().map(|p| p.person_type).collect();
    assert_eq!(
        types,
        vec![PersonType::Director, PersonType::Actor, PersonType::Actor]
    );
}

#[tokio::test]
async fn test_metadata_by_noisy_name() {
    let server = MockServer::start().await;
    mount_movie_a(&server).await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("q", "Movie A"))
        .and(query_param("type", "partial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sid": "12345", "name": "Movie A"},
            {"sid": "777", "name": "Movie A Returns"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let info = LookupInfo::new(MediaKind::Series).with_name("[SubGroup] Movie A 2160p WEB-DL");
    let result = MetadataResolver::new(client, config)
        .resolve_lookup(&info, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.has_metadata);
    assert_eq!(result.item.unwrap().kind, MediaKind::Series);
    assert_eq!(result.provider_ids.get(PROVIDER_ID_KEY), Some("12345"));
}

#[tokio::test]
async fn test_metadata_empty_search_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let result = MetadataResolver::new(client, config)
        .resolve(
            &SearchQuery::ByName("X".to_string()),
            MediaKind::Movie,
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(!result.has_metadata);
    assert!(result.item.is_none());
}

#[tokio::test]
async fn test_cast_failure_policies_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_a_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/movies/12345/celebrities"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let resolver = MetadataResolver::new(client, config.clone());
    let query = SearchQuery::ByExternalId("12345".to_string());
    let cancel = CancellationToken::new();

    let err = resolver
        .resolve(&query, MediaKind::Movie, &cancel)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(502));

    config.update(|c| c.cast_failure_policy = CastFailurePolicy::Partial);
    let result = resolver
        .resolve(&query, MediaKind::Movie, &cancel)
        .await
        .unwrap();
    assert!(result.has_metadata);
    assert!(result.people.is_empty());
}

#[tokio::test]
async fn test_search_candidates_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("q", "Movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sid": "12345", "name": "Movie A", "img": "t1", "year": "2019"},
            {"sid": "777", "name": "Movie B", "img": "t2", "year": 2020}
        ])))
        .mount(&server)
        .await;

    let (client, config) = resolver_parts(&server);
    let candidates = MetadataResolver::new(client, config)
        .search(&SearchQuery::ByName("Movie".to_string()), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].img, "t1");
    assert_eq!(candidates[1].year, Some(2020));
    assert_eq!(candidates[1].provider_ids.get(PROVIDER_ID_KEY), Some("777"));
}
