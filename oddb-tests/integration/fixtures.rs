//! Shared fixtures for the mock API server.

use std::sync::Arc;

use oddb_core::config::ApiConfig;
use oddb_core::{OddbConfig, SharedConfig};
use oddb_search::OpenDoubanClient;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> OpenDoubanClient {
    let config = ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    };
    OpenDoubanClient::with_config(&config).unwrap()
}

/// Shared client plus default config for resolver tests.
pub fn resolver_parts(server: &MockServer) -> (Arc<OpenDoubanClient>, SharedConfig) {
    (
        Arc::new(client_for(server)),
        SharedConfig::new(OddbConfig::default()),
    )
}

pub fn movie_a_json() -> Value {
    json!({
        "sid": "12345",
        "name": "Movie A",
        "originalName": "Movie A",
        "rating": "7.9",
        "img": "https://img.example/12345.jpg",
        "year": "2019",
        "intro": "Two people meet.",
        "site": "",
        "genre": "Drama/Romance",
        "country": "China / USA",
        "screenTime": "2019-02-05(中国大陆)",
        "imdb": "tt1234567"
    })
}

pub fn celebrities_json() -> Value {
    json!([
        {"id": "1001", "name": "Director One", "role": "导演", "rolename": "", "img": "https://img.example/1001.jpg"},
        {"id": "1002", "name": "Actor One", "role": "演员", "rolename": "Lead", "img": "https://img.example/1002.jpg"},
        {"id": "1003", "name": "Gaffer", "role": "灯光师", "rolename": "", "img": ""}
    ])
}
