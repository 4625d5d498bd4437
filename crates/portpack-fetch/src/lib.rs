//! Page-to-image resolution for portfolio asset packs.
//!
//! Probes candidate URLs, extracts image candidates from HTML pages, streams
//! downloads to disk under a size floor, and orchestrates all three per
//! selected page without letting any single failure abort a batch.

pub mod client;
pub mod download;
pub mod error;
pub mod extract;
pub mod resolve;
pub mod validate;

pub use client::{FetchSettings, HttpFetcher};
pub use download::{download_image, url_fingerprint, DownloadResult};
pub use error::FetchError;
pub use extract::{extract_image_urls, extract_image_urls_from_html, is_probably_image_url};
pub use resolve::{
    build_asset_record, resolve_page, resolve_selection, ImageFetcher, PageOutcome,
    PageResolution, ResolveOptions, MAX_IMAGES_KEPT_PER_PAGE,
};
pub use validate::{check_image_url, UrlCheck};
