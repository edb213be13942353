//! Edamam recipe search v2 client

use super::{RecipeClient, RecipeSummary, SearchError, SearchQuery};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";

/// Recipe search over HTTP GET
pub struct EdamamClient {
    client: Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

impl EdamamClient {
    pub fn new(app_id: String, app_key: String, base_url: Option<&str>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            app_id,
            app_key,
        }
    }

    fn request_params<'a>(&'a self, query: &'a SearchQuery) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("type", "public"),
            ("app_id", self.app_id.as_str()),
            ("app_key", self.app_key.as_str()),
        ];
        params.extend(query.params());
        params
    }
}

#[async_trait]
impl RecipeClient for EdamamClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RecipeSummary>, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&self.request_params(query))
            .send()
            .await
            // The request URL carries app_key, so it is stripped before logging
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    "Request timeout"
                } else if e.is_connect() {
                    "Connection failed"
                } else {
                    "Request failed"
                };
                SearchError::transport(format!("{kind}: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::transport(format!("Failed to read response: {}", e.without_url())))?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(200).collect();
            return Err(SearchError::transport(format!("HTTP {status}: {excerpt}")));
        }

        parse_hits(&body)
    }
}

/// Parse a search response body into usable summaries.
///
/// Hits missing a title, image, or link are dropped; a body without a `hits`
/// array is a malformed response.
pub fn parse_hits(body: &str) -> Result<Vec<RecipeSummary>, SearchError> {
    let response: EdamamResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::malformed(format!("Failed to parse response: {e}")))?;

    let total = response.hits.len();
    let summaries: Vec<RecipeSummary> = response
        .hits
        .into_iter()
        .filter_map(|hit| hit.recipe)
        .filter_map(EdamamRecipe::into_summary)
        .collect();

    if summaries.len() < total {
        tracing::debug!(
            dropped = total - summaries.len(),
            kept = summaries.len(),
            "Dropped incomplete recipe hits"
        );
    }
    Ok(summaries)
}

// Edamam API types

#[derive(Debug, Deserialize)]
struct EdamamResponse {
    hits: Vec<EdamamHit>,
}

#[derive(Debug, Deserialize)]
struct EdamamHit {
    recipe: Option<EdamamRecipe>,
}

#[derive(Debug, Deserialize)]
struct EdamamRecipe {
    label: Option<String>,
    #[serde(rename = "shareAs")]
    share_as: Option<String>,
    url: Option<String>,
    image: Option<String>,
    images: Option<EdamamImages>,
}

#[derive(Debug, Deserialize)]
struct EdamamImages {
    #[serde(rename = "REGULAR")]
    regular: Option<EdamamImage>,
}

#[derive(Debug, Deserialize)]
struct EdamamImage {
    url: Option<String>,
}

impl EdamamRecipe {
    fn into_summary(self) -> Option<RecipeSummary> {
        let image_url = self
            .images
            .and_then(|i| i.regular)
            .and_then(|r| r.url)
            .or(self.image);
        let page_url = self.share_as.or(self.url);
        RecipeSummary::from_parts(self.label, image_url, page_url)
    }
}
