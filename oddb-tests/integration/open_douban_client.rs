//! HTTP client behavior against the Open Douban endpoints.

use oddb_search::{SearchError, SubjectApiClient};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::fixtures::{celebrities_json, client_for, movie_a_json};

#[tokio::test]
async fn test_lookup_forwards_params_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345"))
        .and(query_param("s", "l"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_a_json()))
        .expect(1)
        .mount(&server)
        .await;

    let subject = client_for(&server)
        .lookup_by_id("12345", &[("s", "l")], &CancellationToken::new())
        .await
        .unwrap()
        .expect("subject");

    assert_eq!(subject.sid, "12345");
    assert_eq!(subject.rating, Some(7.9));
    assert_eq!(subject.year, Some(2019));
    assert_eq!(subject.genre, "Drama/Romance");
    assert!(subject.celebrities.is_empty());
}

#[tokio::test]
async fn test_lookup_not_found_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let subject = tokio_test::assert_ok!(
        client_for(&server)
            .lookup_by_id("404", &[], &CancellationToken::new())
            .await
    );
    assert!(subject.is_none());
}

#[tokio::test]
async fn test_partial_search_query_and_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("q", "流浪地球"))
        .and(query_param("type", "partial"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"sid": "2", "name": "Second", "year": 2019},
            {"sid": "1", "name": "First", "year": "2023"}
        ])))
        .mount(&server)
        .await;

    let subjects = client_for(&server)
        .search_by_name("流浪地球", &CancellationToken::new())
        .await
        .unwrap();

    let sids: Vec<&str> = subjects.iter().map(|s| s.sid.as_str()).collect();
    assert_eq!(sids, vec!["2", "1"]);
    assert_eq!(subjects[1].year, Some(2023));
}

#[tokio::test]
async fn test_photos_absent_vs_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photo/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photo/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let cancel = CancellationToken::new();

    assert_eq!(client.photos_by_id("1", &cancel).await.unwrap(), None);
    assert_eq!(client.photos_by_id("2", &cancel).await.unwrap(), Some(vec![]));
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345/celebrities"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .persons_by_id("12345", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::BadStatus { status: 503, .. }));
}

#[tokio::test]
async fn test_celebrities_decode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/12345/celebrities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(celebrities_json()))
        .mount(&server)
        .await;

    let persons = client_for(&server)
        .persons_by_id("12345", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(persons.len(), 3);
    assert_eq!(persons[1].role, "演员");
    assert_eq!(persons[1].role_name, "Lead");
}

#[tokio::test]
async fn test_malformed_json_is_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .lookup_by_id("1", &[], &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::RemoteFetchFailure { .. }));
}

#[tokio::test]
async fn test_slow_response_is_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(movie_a_json())
                .set_delay(std::time::Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = client_for(&server)
        .lookup_by_id("1", &[], &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
