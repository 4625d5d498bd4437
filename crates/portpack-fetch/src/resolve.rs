//! Per-page resolution: turn one selected search result into local image
//! files, then into an [`AssetRecord`].
//!
//! Pages are processed strictly one at a time. Nothing here returns an
//! error: every failure degrades to an empty file list plus a note, so one
//! bad page never stops the batch.

use std::path::Path;

use async_trait::async_trait;
use portpack_core::{slugify, AssetRecord, ProjectContext, SearchResult};

use crate::download::DownloadResult;
use crate::error::FetchError;
use crate::validate::UrlCheck;

/// Pages on this domain are saved as links only; they are never fetched.
pub const LINKS_ONLY_DOMAIN: &str = "instagram.com";

/// Hard ceiling on images kept per page, independent of how many candidates
/// the operator allows to be tried.
pub const MAX_IMAGES_KEPT_PER_PAGE: usize = 8;

pub const LINKS_ONLY_NOTE: &str = "Instagram link saved (links-only).";
pub const NO_IMAGES_NOTE: &str = "No downloadable images found (or skipped by rules).";

const BASE_NAME_MAX_CHARS: usize = 30;

/// Network seam used by the resolver.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn check(&self, url: &str) -> UrlCheck;

    /// # Errors
    ///
    /// Returns [`FetchError`] when the page itself cannot be fetched.
    async fn extract(&self, page_url: &str, max_images: usize) -> Result<Vec<String>, FetchError>;

    async fn download(
        &self,
        url: &str,
        out_dir: &Path,
        base_name: &str,
        min_kb: u64,
    ) -> DownloadResult;
}

/// Operator-tunable limits for one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub min_kb: u64,
    /// How many extracted candidates to hand back for validation.
    pub max_images_per_page: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            min_kb: 30,
            max_images_per_page: 15,
        }
    }
}

/// Terminal state of a page after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Links-only domain; nothing fetched.
    LinksOnly,
    /// The provider-asserted image URL validated and downloaded.
    DirectHit,
    /// One or more images came from page extraction.
    Extracted,
    /// Nothing usable.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResolution {
    pub outcome: PageOutcome,
    pub downloaded_files: Vec<String>,
}

impl PageResolution {
    fn new(outcome: PageOutcome, downloaded_files: Vec<String>) -> Self {
        Self {
            outcome,
            downloaded_files,
        }
    }
}

/// `true` for URLs that are deliverables in themselves.
#[must_use]
pub fn is_links_only(page_url: &str) -> bool {
    page_url.contains(LINKS_ONLY_DOMAIN)
}

/// File name prefix for a project's downloads.
#[must_use]
pub fn asset_base_name(project: &str) -> String {
    let slug: String = slugify(project).chars().take(BASE_NAME_MAX_CHARS).collect();
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "asset".to_string()
    } else {
        slug.to_string()
    }
}

/// Resolve a single selected page into downloaded files.
pub async fn resolve_page<F>(
    fetcher: &F,
    page_url: &str,
    matched: Option<&SearchResult>,
    assets_dir: &Path,
    base_name: &str,
    options: ResolveOptions,
) -> PageResolution
where
    F: ImageFetcher + ?Sized,
{
    if is_links_only(page_url) {
        tracing::debug!(url = %page_url, "links-only page, skipping fetch");
        return PageResolution::new(PageOutcome::LinksOnly, Vec::new());
    }

    if let Some(direct) = matched.and_then(SearchResult::direct_image_url) {
        if let Some(path) =
            validate_and_download(fetcher, direct, assets_dir, base_name, options.min_kb).await
        {
            return PageResolution::new(PageOutcome::DirectHit, vec![path]);
        }
        tracing::debug!(url = %page_url, image_url = %direct, "direct image unusable, falling back to page extraction");
    }

    let candidates = match fetcher.extract(page_url, options.max_images_per_page).await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!(url = %page_url, error = %e, "page extraction failed");
            Vec::new()
        }
    };

    let mut downloaded: Vec<String> = Vec::new();
    for candidate in &candidates {
        if let Some(path) =
            validate_and_download(fetcher, candidate, assets_dir, base_name, options.min_kb).await
        {
            downloaded.push(path);
        }
        if downloaded.len() >= MAX_IMAGES_KEPT_PER_PAGE {
            break;
        }
    }

    if downloaded.is_empty() {
        tracing::info!(url = %page_url, candidates = candidates.len(), "no downloadable images for page");
        PageResolution::new(PageOutcome::Empty, downloaded)
    } else {
        tracing::info!(url = %page_url, count = downloaded.len(), "downloaded images for page");
        PageResolution::new(PageOutcome::Extracted, downloaded)
    }
}

async fn validate_and_download<F>(
    fetcher: &F,
    url: &str,
    assets_dir: &Path,
    base_name: &str,
    min_kb: u64,
) -> Option<String>
where
    F: ImageFetcher + ?Sized,
{
    let check = fetcher.check(url).await;
    if !check.ok {
        tracing::debug!(url = %url, status = check.status, reason = %check.reason, "candidate rejected");
        return None;
    }

    let result = fetcher
        .download(&check.final_url, assets_dir, base_name, min_kb)
        .await;
    match result.filepath {
        Some(path) if result.ok => Some(path.display().to_string()),
        _ => {
            tracing::debug!(url = %check.final_url, reason = %result.reason, "candidate not kept");
            None
        }
    }
}

/// Map a resolution onto the persisted record for that page.
#[must_use]
pub fn build_asset_record(
    context: &ProjectContext,
    page_url: &str,
    matched: Option<&SearchResult>,
    resolution: PageResolution,
    created_at: &str,
) -> AssetRecord {
    let links_only = resolution.outcome == PageOutcome::LinksOnly;
    let title = match matched {
        Some(result) => result.title.clone(),
        None if links_only => "(instagram)".to_string(),
        None => "(selected)".to_string(),
    };
    let notes = if links_only {
        LINKS_ONLY_NOTE.to_string()
    } else if resolution.downloaded_files.is_empty() {
        NO_IMAGES_NOTE.to_string()
    } else {
        String::new()
    };

    AssetRecord {
        project: context.project.clone(),
        year: context.year.clone(),
        location: context.location.clone(),
        photographer: context.photographer.clone(),
        title,
        source_url: page_url.to_string(),
        page_url: page_url.to_string(),
        downloaded_files: resolution.downloaded_files,
        notes,
        credit_line: context.credit_line.clone(),
        tags: context.tags.clone(),
        created_at: created_at.to_string(),
    }
}

/// Resolve every selected page in order, one record per page.
///
/// `results` is searched for the first entry whose `url` equals each
/// selected URL to recover its title and any direct image URL.
pub async fn resolve_selection<F>(
    fetcher: &F,
    context: &ProjectContext,
    selected: &[String],
    results: &[SearchResult],
    assets_dir: &Path,
    options: ResolveOptions,
) -> Vec<AssetRecord>
where
    F: ImageFetcher + ?Sized,
{
    let base_name = asset_base_name(&context.project);
    let mut records = Vec::with_capacity(selected.len());

    for page_url in selected {
        let matched = results.iter().find(|r| &r.url == page_url);
        let resolution =
            resolve_page(fetcher, page_url, matched, assets_dir, &base_name, options).await;
        let created_at = chrono::Utc::now().to_rfc3339();
        records.push(build_asset_record(
            context,
            page_url,
            matched,
            resolution,
            &created_at,
        ));
    }

    records
}
