//! Raw image fetching.

use oddb_search::{ImageFetcher, SearchError};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/view/photo/l/p1.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        )
        .mount(&server)
        .await;

    let bytes = ImageFetcher::default()
        .fetch(
            &format!("{}/view/photo/l/p1.jpg", server.uri()),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn test_fetch_fails_loudly_on_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let url = format!("{}/missing.jpg", server.uri());
    let err = ImageFetcher::default()
        .fetch(&url, &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(matches!(err, SearchError::BadStatus { url: ref u, .. } if *u == url));
    assert!(!err.is_cancelled());
}
