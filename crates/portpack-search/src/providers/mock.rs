use async_trait::async_trait;
use portpack_core::SearchResult;

use super::SearchProvider;
use crate::error::SearchError;

/// Offline provider returning one canned result per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockProvider;

#[async_trait]
impl SearchProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, query: &str, _count: usize) -> Result<Vec<SearchResult>, SearchError> {
        Ok(vec![SearchResult {
            snippet: format!("Query was: {query}"),
            source: "mock".to_string(),
            ..SearchResult::new(
                "Example result (replace with real search provider)",
                "https://example.com",
            )
        }])
    }

    async fn search_images(
        &self,
        query: &str,
        _count: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        Ok(vec![SearchResult {
            snippet: format!("Query was: {query}"),
            source: "mock_images".to_string(),
            ..SearchResult::new("Example image result (mock)", "https://example.com")
        }])
    }
}
