//! Integration tests for oddb
//!
//! Drive the HTTP client, resolvers and image fetcher against a mock
//! Open Douban API server.

#[path = "integration/fixtures.rs"]
mod fixtures;

#[path = "integration/open_douban_client.rs"]
mod open_douban_client;

#[path = "integration/image_fetch.rs"]
mod image_fetch;

#[path = "integration/resolution_workflow.rs"]
mod resolution_workflow;
