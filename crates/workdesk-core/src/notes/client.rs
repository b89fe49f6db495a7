use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Value, json};
use tracing::{debug, info};

use super::DocumentSource;
use crate::config::NotesConfig;
use crate::{Error, Result};

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// HTTP client for the notes service API.
///
/// Every request carries the bearer token, the configured API version header
/// and a JSON content type. Requests are not retried.
#[derive(Clone)]
pub struct NotesClient {
    client: Client,
    base_url: String,
    api_version: String,
    token: String,
}

impl std::fmt::Debug for NotesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl NotesClient {
    /// Creates a client for the configured service with a 30 second timeout.
    pub fn new(config: &NotesConfig, token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(config, token, Duration::from_secs(30))
    }

    /// Creates a client with a custom request timeout (primarily for tests)
    pub fn with_timeout(
        config: &NotesConfig,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("workdesk/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token: token.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(NOTION_VERSION_HEADER, &self.api_version)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Value> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!(
                "{resource} not found. Check the id and that the integration has access to it"
            )));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Pull the service's `message` out of an error body, falling back to the raw
/// body or the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

/// Take the `results` array of a list response. A missing array is empty.
fn into_results(mut body: Value) -> Result<Vec<Value>> {
    match body.get_mut("results").map(Value::take) {
        Some(Value::Array(results)) => Ok(results),
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(other) => Err(Error::Parse(format!(
            "expected 'results' to be an array, got {other}"
        ))),
    }
}

#[async_trait]
impl DocumentSource for NotesClient {
    async fn fetch_document(&self, id: &str) -> Result<Value> {
        info!("Fetching page {} from notes service", id);
        let url = self.endpoint(&format!("pages/{id}"));
        self.send(self.client.get(&url), &format!("Page '{id}'")).await
    }

    async fn fetch_child_blocks(&self, id: &str) -> Result<Vec<Value>> {
        info!("Fetching child blocks of {} from notes service", id);
        let url = self.endpoint(&format!("blocks/{id}/children"));
        let body = self
            .send(self.client.get(&url), &format!("Block '{id}'"))
            .await?;
        into_results(body)
    }

    async fn search_pages(&self, query: &str, filter: Option<&Value>) -> Result<Vec<Value>> {
        let mut payload = json!({ "query": query });
        if let Some(filter) = filter {
            payload["filter"] = filter.clone();
        }
        debug!("Searching notes service: {}", payload);

        // Content type is set by `authorized`, so the body is encoded here
        let url = self.endpoint("search");
        let request = self.client.post(&url).body(serde_json::to_vec(&payload)?);
        let body = self.send(request, "Search endpoint").await?;
        into_results(body)
    }
}
