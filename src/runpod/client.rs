//! RunPod HTTP client for API interactions

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::api;
use crate::error::{PodError, Result};

use super::models::GraphqlResponse;

/// RunPod API client
pub struct RunPodClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RunPodClient {
    /// Create a new client against the public RunPod API
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, api::BASE_URL.to_string())
    }

    /// Create a client with custom base URL (mock servers, staging)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full GraphQL endpoint URL
    pub(crate) fn graphql_url(&self) -> String {
        format!("{}{}", self.base_url, api::GRAPHQL_PATH)
    }

    /// POST a GraphQL document and decode its `data`
    ///
    /// Non-2xx statuses and GraphQL `errors` both become `PodError::Api`.
    pub(crate) async fn graphql<T>(
        &self,
        query: &str,
        variables: Value,
        error_context: &str,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.graphql_url();
        debug!("POST {} ({})", url, error_context);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            debug!("API returned {}: {}", status, body);
            return Err(PodError::Api {
                status,
                message: error_context.to_string(),
            });
        }

        let envelope: GraphqlResponse<T> = response.json().await?;
        envelope.into_data(error_context)
    }
}

#[cfg(test)]
impl RunPodClient {
    /// Create a test client with mock base URL
    pub fn test_client(base_url: &str) -> Self {
        Self::with_base_url("test-key".to_string(), base_url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_graphql_url_default() {
        let client = RunPodClient::new("key".to_string());
        assert_eq!(client.graphql_url(), "https://api.runpod.io/graphql");
    }

    #[test]
    fn test_graphql_url_trims_trailing_slash() {
        let client = RunPodClient::with_base_url("key".to_string(), "http://x:1/".to_string());
        assert_eq!(client.graphql_url(), "http://x:1/graphql");
    }

    #[tokio::test]
    async fn test_graphql_sends_bearer_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"value": 7}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = RunPodClient::test_client(&mock_server.uri());
        let data: Value = client.graphql("query { value }", json!({}), "value").await.unwrap();
        assert_eq!(data["value"], 7);
    }

    #[tokio::test]
    async fn test_graphql_http_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = RunPodClient::test_client(&mock_server.uri());
        let result: Result<Value> = client.graphql("query", json!({}), "listing pods").await;
        match result {
            Err(PodError::Api { status, message }) => {
                assert_eq!(status, 401);
                assert_eq!(message, "listing pods");
            }
            other => panic!("Expected API error, got {:?}", other),
        }
    }
}
