//! Single-call diagnostics for the validator and the extractor.

use portpack_core::AppConfig;
use portpack_fetch::{check_image_url, extract_image_urls, FetchSettings, HttpFetcher};

pub(crate) async fn run_check(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(FetchSettings::from_config(config))?;
    let check = check_image_url(fetcher.client(), url, fetcher.settings().check_timeout).await;

    println!("ok:           {}", check.ok);
    println!("status:       {}", check.status);
    println!("content-type: {}", check.content_type);
    println!("final url:    {}", check.final_url);
    if !check.reason.is_empty() {
        println!("reason:       {}", check.reason);
    }
    Ok(())
}

pub(crate) async fn run_extract(
    config: &AppConfig,
    page_url: &str,
    max: Option<usize>,
) -> anyhow::Result<()> {
    let max = max.unwrap_or(config.max_images_per_page);
    let fetcher = HttpFetcher::new(FetchSettings::from_config(config))?;
    let urls =
        extract_image_urls(fetcher.client(), page_url, max, fetcher.settings().page_timeout)
            .await?;

    if urls.is_empty() {
        println!("no image candidates found on {page_url}");
    }
    for (i, url) in urls.iter().enumerate() {
        println!("{:>3}. {url}", i + 1);
    }
    Ok(())
}
