use std::path::PathBuf;

/// Browser-ish identity sent with every outbound request. Plenty of image
/// CDNs reject requests with no `User-Agent`.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; PortfolioAssetFinder/1.0)";

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub check_timeout_secs: u64,
    pub page_timeout_secs: u64,
    pub download_timeout_secs: u64,
    pub min_kb: u64,
    pub max_images_per_page: usize,
    pub max_results: usize,
    pub bing_api_key: Option<String>,
    pub bing_endpoint: Option<String>,
    pub serpapi_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("user_agent", &self.user_agent)
            .field("check_timeout_secs", &self.check_timeout_secs)
            .field("page_timeout_secs", &self.page_timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("min_kb", &self.min_kb)
            .field("max_images_per_page", &self.max_images_per_page)
            .field("max_results", &self.max_results)
            .field(
                "bing_api_key",
                &self.bing_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("bing_endpoint", &self.bing_endpoint)
            .field(
                "serpapi_api_key",
                &self.serpapi_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl Default for AppConfig {
    /// The configuration an empty environment produces.
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            output_dir: PathBuf::from("output"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            check_timeout_secs: 15,
            page_timeout_secs: 20,
            download_timeout_secs: 25,
            min_kb: 30,
            max_images_per_page: 15,
            max_results: 10,
            bing_api_key: None,
            bing_endpoint: None,
            serpapi_api_key: None,
        }
    }
}
