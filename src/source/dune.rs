//! Dune Analytics client for saved query results.

use async_trait::async_trait;
use serde::Deserialize;

use super::DataSource;
use crate::error::FrameError;

/// Header carrying the Dune API key.
const API_KEY_HEADER: &str = "X-Dune-API-Key";

/// Reads the latest execution result of saved Dune queries.
#[derive(Debug, Clone)]
pub struct DuneClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    result: Option<ResultBody>,
}

#[derive(Debug, Deserialize)]
struct ResultBody {
    #[serde(default)]
    rows: Vec<serde_json::Value>,
}

impl DuneClient {
    /// Creates a client for the API rooted at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// URL of the latest-result endpoint for `query_id`.
    #[must_use]
    pub fn results_url(&self, query_id: u64) -> String {
        format!(
            "{}/api/v1/query/{query_id}/results",
            self.base_url.trim_end_matches('/')
        )
    }
}

/// Extracts the rows array; a body without `result.rows` is an empty result.
fn rows_of(body: ResultsResponse) -> Vec<serde_json::Value> {
    body.result.map(|r| r.rows).unwrap_or_default()
}

#[async_trait]
impl DataSource for DuneClient {
    async fn latest_rows(&self, query_id: u64) -> Result<Vec<serde_json::Value>, FrameError> {
        let url = self.results_url(query_id);
        tracing::debug!(query_id, %url, "requesting dune results");

        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FrameError::DataSource(e.to_string()))?;

        let body: ResultsResponse = response
            .json()
            .await
            .map_err(|e| FrameError::DataSource(format!("unreadable results body: {e}")))?;

        Ok(rows_of(body))
    }
}
