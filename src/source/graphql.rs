//! GraphQL-over-HTTP client
//!
//! POSTs `{ query, variables }`, returns the `data` member decoded into the
//! caller's type and turns a non-empty `errors` member into an error.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::SourceError;

/// Connection settings for one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQlConfig {
    /// Endpoint URL, e.g. "https://api.openbeta.io/"
    pub endpoint: String,
    /// Optional API key sent as `Api-Key`
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum attempts for transient failures
    pub max_retries: u32,
}

impl Default for GraphQlConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:4000/".to_string(),
            api_key: None,
            request_timeout_ms: 10_000,
            max_retries: 3,
        }
    }
}

pub struct GraphQlClient {
    client: Client,
    config: GraphQlConfig,
}

#[derive(Serialize)]
struct GraphQlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl GraphQlClient {
    pub fn new(config: GraphQlConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Run a query, retrying timeouts and connection failures with backoff
    pub async fn query<T, V>(&self, query: &str, variables: V) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let body = GraphQlRequest { query, variables };
        let mut last_error = SourceError::Unavailable(self.config.endpoint.clone());

        for attempt in 0..self.config.max_retries.max(1) {
            if attempt > 0 {
                // Backoff: 250ms, 1s, 2.25s...
                let delay = Duration::from_millis(250 * (attempt as u64).pow(2));
                tokio::time::sleep(delay).await;
            }

            match self.send(&body).await {
                Ok(data) => return Ok(data),
                Err(e) if e.is_transient() => {
                    tracing::debug!(endpoint = %self.config.endpoint, attempt, error = %e, "GraphQL request failed, retrying");
                    last_error = e;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    async fn send<T, V>(&self, body: &GraphQlRequest<'_, V>) -> Result<T, SourceError>
    where
        T: DeserializeOwned,
        V: Serialize,
    {
        let mut request = self.client.post(&self.config.endpoint).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.header("Api-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout
            } else if e.is_connect() {
                SourceError::Unavailable(self.config.endpoint.clone())
            } else {
                SourceError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status: status.as_u16(),
                message: text,
            });
        }

        let payload: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        decode_payload(payload)
    }
}

fn decode_payload<T>(payload: GraphQlResponse<T>) -> Result<T, SourceError> {
    if !payload.errors.is_empty() {
        let messages: Vec<String> = payload.errors.into_iter().map(|e| e.message).collect();
        return Err(SourceError::GraphQl(messages.join("; ")));
    }

    payload
        .data
        .ok_or_else(|| SourceError::Decode("response has no data".to_string()))
}
