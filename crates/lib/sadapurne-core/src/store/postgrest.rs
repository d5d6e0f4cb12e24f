//! Supabase `PostgREST` client.
//!
//! Rows are read with `GET {url}/rest/v1/{table}?select=*` and at most one
//! column filter. The anon key travels both as `apikey` and as a bearer token,
//! which is what the Supabase gateway expects.

use std::time::Duration;

use reqwest::StatusCode;
use sadapurne_store::{Filter, ProducerRecord};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ProducerSource, StoreError, StoreResult};

const REST_PATH: &str = "rest/v1";

/// Connection settings for a Supabase project.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl PostgrestConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    rest_url: String,
    api_key: String,
}

impl PostgrestStore {
    /// Builds the HTTP client for a project.
    ///
    /// # Errors
    /// Returns `StoreError::Transport` if the HTTP client cannot be built.
    pub fn new(config: PostgrestConfig) -> StoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        let rest_url = format!("{}/{REST_PATH}", config.url.trim_end_matches('/'));
        Ok(Self {
            client,
            rest_url,
            api_key: config.api_key,
        })
    }

    #[must_use]
    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }
}

impl ProducerSource for PostgrestStore {
    async fn query(&self, table: &str, filter: &Filter) -> StoreResult<Vec<ProducerRecord>> {
        let url = format!("{}/{table}", self.rest_url);
        let mut request = self
            .client
            .get(&url)
            .header("apikey", self.api_key.as_str())
            .bearer_auth(&self.api_key)
            .query(&[("select", "*")]);
        if let Some((field, expression)) = filter_param(filter) {
            request = request.query(&[(field, expression)]);
        }

        debug!(%url, ?filter, "querying postgrest");
        let response = request
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    warn!(
                        %url,
                        status = status.as_u16(),
                        error = %err,
                        "failed to read postgrest error body"
                    );
                    String::new()
                }
            };
            return Err(StoreError::remote(status.as_u16(), remote_message(status, &body)));
        }

        response
            .json::<Vec<ProducerRecord>>()
            .await
            .map_err(|err| StoreError::Decode(err.to_string()))
    }
}

/// Renders a filter as a `PostgREST` horizontal-filter query parameter.
#[must_use]
pub fn filter_param(filter: &Filter) -> Option<(&'static str, String)> {
    match filter {
        Filter::All => None,
        Filter::Eq { field, value } => Some((*field, format!("eq.{value}"))),
        Filter::ILike { field, pattern } => Some((*field, format!("ilike.*{pattern}*"))),
    }
}

#[derive(Deserialize)]
struct PostgrestErrorBody {
    message: String,
}

fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(error) = serde_json::from_str::<PostgrestErrorBody>(body) {
        return error.message;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
    } else {
        body.to_string()
    }
}
