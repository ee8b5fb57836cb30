//! Mock HTTP server setup for integration tests

use minimax_speech::{ClientConfig, RetryPolicy};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::time::Duration;

pub const API_KEY: &str = "test-key";
pub const GROUP_ID: &str = "group-1";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        Self::from_server(Server::new_async().await)
    }

    /// For blocking-client tests, which must run outside a tokio runtime.
    pub fn new_blocking() -> Self {
        Self::from_server(Server::new())
    }

    fn from_server(server: ServerGuard) -> Self {
        let base_url = format!("{}/v1", server.url());
        Self { server, base_url }
    }

    /// Client config pointed at the mock server, with no retry delay.
    pub fn config(&self, max_retries: u32) -> ClientConfig {
        ClientConfig::builder()
            .api_key(API_KEY)
            .group_id(GROUP_ID)
            .base_url(self.base_url.as_str())
            .timeout(Duration::from_secs(5))
            .retry_policy(
                RetryPolicy::default()
                    .with_max_retries(max_retries)
                    .with_delay(Duration::ZERO),
            )
            .build()
            .unwrap()
    }

    /// POST mock that only matches authenticated calls carrying the group id.
    pub fn authed_post(&mut self, path: &str) -> Mock {
        self.server
            .mock("POST", path)
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .match_query(Matcher::UrlEncoded("GroupId".into(), GROUP_ID.into()))
    }

    /// Create a mock for a JSON response
    pub fn json_response(mock: Mock, status: usize, body: &str) -> Mock {
        mock.with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
    }
}
