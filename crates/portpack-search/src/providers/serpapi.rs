use async_trait::async_trait;
use portpack_core::SearchResult;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{get_json, http_client, parse_url, SearchProvider};
use crate::error::SearchError;

const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Image filter: photos only, large size.
pub const IMAGE_FILTER: &str = "itp:photo,isz:l";

/// Google web and image search through `SerpApi`.
pub struct SerpApiProvider {
    client: Client,
    api_key: String,
    search_url: Url,
}

#[derive(Debug, Default, Deserialize)]
struct WebResponse {
    #[serde(default)]
    organic_results: Option<Vec<OrganicResult>>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    images_results: Option<Vec<ImageResult>>,
}

#[derive(Debug, Deserialize)]
struct ImageResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    original: Option<String>,
}

impl ImageResult {
    fn into_search_result(self) -> SearchResult {
        let source = self.source.unwrap_or_default();
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| source.clone());
        SearchResult {
            snippet: source,
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            image_url: self.original.unwrap_or_default(),
            source: "serpapi_images".to_string(),
            ..SearchResult::new(title, self.link.unwrap_or_default())
        }
    }
}

impl SerpApiProvider {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: &str, user_agent: &str) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidEndpoint`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let search_url = parse_url(&format!("{}/search.json", base_url.trim_end_matches('/')))?;
        Ok(Self {
            client: http_client(user_agent)?,
            api_key: api_key.to_owned(),
            search_url,
        })
    }

    fn build_url(&self, engine: &str, query: &str, extra: &[(&str, &str)]) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", engine);
            pairs.append_pair("q", query);
            pairs.append_pair("api_key", &self.api_key);
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
        }
        url
    }
}

#[async_trait]
impl SearchProvider for SerpApiProvider {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError> {
        let num = count.min(10).to_string();
        let url = self.build_url("google", query, &[("num", &num)]);
        let body: WebResponse =
            get_json(self.client.get(url), &format!("serpapi google(q={query})")).await?;

        Ok(body
            .organic_results
            .unwrap_or_default()
            .into_iter()
            .take(count)
            .map(|item| SearchResult {
                snippet: item.snippet.unwrap_or_default(),
                source: "serpapi_web".to_string(),
                ..SearchResult::new(item.title, item.link)
            })
            .collect())
    }

    async fn search_images(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let url = self.build_url(
            "google_images",
            query,
            &[("ijn", "0"), ("tbs", IMAGE_FILTER)],
        );
        let body: ImagesResponse = get_json(
            self.client.get(url),
            &format!("serpapi google_images(q={query})"),
        )
        .await?;

        let images = body.images_results.unwrap_or_default();
        tracing::debug!(query, hits = images.len(), "serpapi image search complete");

        Ok(images
            .into_iter()
            .take(count)
            .map(ImageResult::into_search_result)
            .collect())
    }
}
