use async_trait::async_trait;
use portpack_core::SearchResult;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{get_json, http_client, parse_url, SearchProvider};
use crate::error::SearchError;

const DEFAULT_ENDPOINT: &str = "https://api.bing.microsoft.com/v7.0/search";

/// Bing Web Search v7. Web only; image-mode queries fall back to web.
pub struct BingProvider {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Debug, Default, Deserialize)]
struct BingResponse {
    #[serde(default, rename = "webPages")]
    web_pages: Option<BingWebPages>,
}

#[derive(Debug, Default, Deserialize)]
struct BingWebPages {
    #[serde(default)]
    value: Vec<BingWebPage>,
}

#[derive(Debug, Deserialize)]
struct BingWebPage {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    snippet: Option<String>,
}

impl BingProvider {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, user_agent: &str) -> Result<Self, SearchError> {
        Self::with_endpoint(api_key, user_agent, DEFAULT_ENDPOINT)
    }

    /// Points the provider at a custom endpoint (Azure region, or a mock server).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] if `endpoint` does not parse.
    pub fn with_endpoint(
        api_key: &str,
        user_agent: &str,
        endpoint: &str,
    ) -> Result<Self, SearchError> {
        Ok(Self {
            client: http_client(user_agent)?,
            api_key: api_key.to_owned(),
            endpoint: parse_url(endpoint)?,
        })
    }

    fn build_url(&self, query: &str, count: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("count", &count.to_string())
            .append_pair("textDecorations", "false")
            .append_pair("textFormat", "Raw");
        url
    }
}

#[async_trait]
impl SearchProvider for BingProvider {
    fn name(&self) -> &'static str {
        "bing"
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.build_url(query, count);
        let request = self
            .client
            .get(url)
            .header("Ocp-Apim-Subscription-Key", &self.api_key);
        let body: BingResponse = get_json(request, &format!("bing search(q={query})")).await?;

        let pages = body.web_pages.unwrap_or_default().value;
        tracing::debug!(query, hits = pages.len(), "bing search complete");

        Ok(pages
            .into_iter()
            .map(|page| SearchResult {
                snippet: page.snippet.unwrap_or_default(),
                source: "bing_web".to_string(),
                ..SearchResult::new(page.name, page.url)
            })
            .collect())
    }
}
