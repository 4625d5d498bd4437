//! Search backends behind a common [`SearchProvider`] trait.

mod bing;
mod mock;
mod serpapi;

use std::time::Duration;

use async_trait::async_trait;
use portpack_core::{AppConfig, ProviderChoice, SearchResult};
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::types::SearchMode;

pub use bing::BingProvider;
pub use mock::MockProvider;
pub use serpapi::SerpApiProvider;

/// Request timeout for provider API calls.
pub const PROVIDER_TIMEOUT_SECS: u64 = 20;

/// A web and (optionally) image search backend.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short identifier used in logs and errors.
    fn name(&self) -> &'static str;

    /// Plain web search.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<SearchResult>, SearchError>;

    /// Image-vertical search. Providers without one keep this default.
    async fn search_images(
        &self,
        query: &str,
        count: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let _ = (query, count);
        Err(SearchError::ImageSearchUnsupported {
            provider: self.name(),
        })
    }
}

/// Runs `query` in the requested mode.
///
/// An image-mode query whose image search fails for any reason is retried
/// as a plain web search.
///
/// # Errors
///
/// Returns the web search error; image search errors are logged and
/// swallowed by the fallback.
pub async fn run_query<P: SearchProvider + ?Sized>(
    provider: &P,
    mode: SearchMode,
    query: &str,
    count: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    if mode == SearchMode::Images {
        match provider.search_images(query, count).await {
            Ok(results) => return Ok(results),
            Err(e) => {
                tracing::debug!(
                    provider = provider.name(),
                    error = %e,
                    "image search unavailable, falling back to web search"
                );
            }
        }
    }
    provider.search(query, count).await
}

/// Builds the provider selected by `choice`, pulling keys from `config`.
///
/// # Errors
///
/// Returns [`SearchError::MissingApiKey`] when the selected provider needs a
/// key that is not configured, or [`SearchError::Http`] if the HTTP client
/// cannot be built.
pub fn build_provider(
    choice: ProviderChoice,
    config: &AppConfig,
) -> Result<Box<dyn SearchProvider>, SearchError> {
    match choice {
        ProviderChoice::Mock => Ok(Box::new(MockProvider)),
        ProviderChoice::Bing => {
            let key = config
                .bing_api_key
                .as_deref()
                .ok_or(SearchError::MissingApiKey("BING_API_KEY"))?;
            let provider = match config.bing_endpoint.as_deref() {
                Some(endpoint) => BingProvider::with_endpoint(key, &config.user_agent, endpoint)?,
                None => BingProvider::new(key, &config.user_agent)?,
            };
            Ok(Box::new(provider))
        }
        ProviderChoice::SerpApi => {
            let key = config
                .serpapi_api_key
                .as_deref()
                .ok_or(SearchError::MissingApiKey("SERPAPI_API_KEY"))?;
            Ok(Box::new(SerpApiProvider::new(key, &config.user_agent)?))
        }
    }
}

pub(crate) fn http_client(user_agent: &str) -> Result<Client, SearchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?)
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, SearchError> {
    Url::parse(raw).map_err(|e| SearchError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Sends a GET and parses the body as JSON, failing on non-2xx status.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
    context: &str,
) -> Result<T, SearchError> {
    let response = request.send().await?.error_for_status()?;
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct WebOnly {
        web_calls: AtomicUsize,
    }

    #[async_trait]
    impl SearchProvider for WebOnly {
        fn name(&self) -> &'static str {
            "web-only"
        }

        async fn search(
            &self,
            query: &str,
            _count: usize,
        ) -> Result<Vec<SearchResult>, SearchError> {
            self.web_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![SearchResult::new("hit", &format!("https://site.test/{query}"))])
        }
    }

    #[tokio::test]
    async fn default_image_search_is_unsupported() {
        let provider = WebOnly {
            web_calls: AtomicUsize::new(0),
        };
        let err = provider.search_images("q", 5).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::ImageSearchUnsupported { provider: "web-only" }
        ));
    }

    #[tokio::test]
    async fn image_mode_falls_back_to_web_search() {
        let provider = WebOnly {
            web_calls: AtomicUsize::new(0),
        };
        let results = run_query(&provider, SearchMode::Images, "look", 5)
            .await
            .expect("fallback should succeed");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://site.test/look");
        assert_eq!(provider.web_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_keys_fail_at_construction() {
        let config = AppConfig::default();
        let bing = build_provider(ProviderChoice::Bing, &config).err();
        assert!(matches!(bing, Some(SearchError::MissingApiKey("BING_API_KEY"))));
        let serp = build_provider(ProviderChoice::SerpApi, &config).err();
        assert!(matches!(serp, Some(SearchError::MissingApiKey("SERPAPI_API_KEY"))));
    }

    #[test]
    fn mock_needs_no_key() {
        let provider = build_provider(ProviderChoice::Mock, &AppConfig::default())
            .expect("mock always builds");
        assert_eq!(provider.name(), "mock");
    }
}
