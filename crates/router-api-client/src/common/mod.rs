//! Common utilities for the router API client
//!
//! Provides the request/decode plumbing shared by every operation.

use crate::error::TransportError;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Characters of a bad response body kept for diagnostics
const BODY_SNIPPET_LEN: usize = 500;

/// HTTP client wrapper bound to the backend base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build query string from filters
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        filters
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        self.execute(self.client.get(&url)).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!("POST {} with body: {}", url, serde_json::to_string(body).unwrap_or_default());

        self.execute(self.client.post(&url).json(body)).await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path);
        debug!("PATCH {} with body: {}", url, serde_json::to_string(body).unwrap_or_default());

        self.execute(self.client.patch(&url).json(body)).await
    }

    /// Send a request and decode a 2xx JSON response
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, TransportError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        // Read the text first so decode failures can report what arrived
        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|source| TransportError::Decode {
            source,
            body: response_text.chars().take(BODY_SNIPPET_LEN).collect(),
        })
    }
}
