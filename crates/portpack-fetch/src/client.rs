//! Shared HTTP client for probing, page fetches, and image downloads.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::download::{download_image, DownloadResult};
use crate::error::FetchError;
use crate::extract::extract_image_urls;
use crate::resolve::ImageFetcher;
use crate::validate::{check_image_url, UrlCheck};

/// Timeouts and identity used by [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    pub check_timeout: Duration,
    pub page_timeout: Duration,
    pub download_timeout: Duration,
}

impl FetchSettings {
    #[must_use]
    pub fn from_config(config: &portpack_core::AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            check_timeout: Duration::from_secs(config.check_timeout_secs),
            page_timeout: Duration::from_secs(config.page_timeout_secs),
            download_timeout: Duration::from_secs(config.download_timeout_secs),
        }
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: portpack_core::app_config::DEFAULT_USER_AGENT.to_string(),
            check_timeout: Duration::from_secs(15),
            page_timeout: Duration::from_secs(20),
            download_timeout: Duration::from_secs(25),
        }
    }
}

/// Network-backed [`ImageFetcher`].
///
/// One `reqwest::Client` is shared by all three operations; each request sets
/// its own timeout so no single call can stall the resolution loop.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    settings: FetchSettings,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client, settings })
    }

    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn check(&self, url: &str) -> UrlCheck {
        check_image_url(&self.client, url, self.settings.check_timeout).await
    }

    async fn extract(&self, page_url: &str, max_images: usize) -> Result<Vec<String>, FetchError> {
        extract_image_urls(&self.client, page_url, max_images, self.settings.page_timeout).await
    }

    async fn download(
        &self,
        url: &str,
        out_dir: &Path,
        base_name: &str,
        min_kb: u64,
    ) -> DownloadResult {
        download_image(
            &self.client,
            url,
            out_dir,
            base_name,
            min_kb,
            self.settings.download_timeout,
        )
        .await
    }
}
