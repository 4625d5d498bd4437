//! Streaming image download with a minimum-size policy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::FetchError;

/// Outcome of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub ok: bool,
    /// Set only when the file was kept.
    pub filepath: Option<PathBuf>,
    pub reason: String,
    pub content_type: String,
    /// Bytes streamed to disk, including bytes of a file later discarded as
    /// too small.
    pub bytes_written: u64,
}

impl DownloadResult {
    fn failed(reason: impl Into<String>, content_type: impl Into<String>, bytes_written: u64) -> Self {
        Self {
            ok: false,
            filepath: None,
            reason: reason.into(),
            content_type: content_type.into(),
            bytes_written,
        }
    }
}

/// First 10 hex chars of the SHA-256 of `url`.
///
/// A pure function of the URL: the same URL always lands on the same file
/// name (last write wins), different URLs practically never collide.
#[must_use]
pub fn url_fingerprint(url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    digest[..10].to_string()
}

/// Extension for a `Content-Type` header value, if it names a supported
/// raster format.
#[must_use]
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let ct = content_type.to_ascii_lowercase();
    if ct.contains("jpeg") || ct.contains("jpg") {
        Some(".jpg")
    } else if ct.contains("png") {
        Some(".png")
    } else if ct.contains("webp") {
        Some(".webp")
    } else {
        None
    }
}

/// Extension inferred from the last path segment of `url`.
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // name is already lowercased
pub fn extension_from_url(url: &str) -> Option<&'static str> {
    let path = reqwest::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let name = path.rsplit('/').next().unwrap_or_default().to_ascii_lowercase();
    if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        Some(".jpg")
    } else if name.ends_with(".png") {
        Some(".png")
    } else if name.ends_with(".webp") {
        Some(".webp")
    } else {
        None
    }
}

/// Stream `url` into `out_dir` as `{base_name}_{fingerprint}{ext}`.
///
/// Creates `out_dir` if needed. Files smaller than `min_kb` KiB are deleted
/// again and reported as skipped. Every failure is folded into the returned
/// [`DownloadResult`]; this function never errors.
pub async fn download_image(
    client: &Client,
    url: &str,
    out_dir: &Path,
    base_name: &str,
    min_kb: u64,
    timeout: Duration,
) -> DownloadResult {
    match try_download(client, url, out_dir, base_name, min_kb, timeout).await {
        Ok(result) => result,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "image download failed");
            let reason = match e {
                FetchError::Http(inner) => format!("Download failed: {inner}"),
                other => format!("Download failed: {other}"),
            };
            DownloadResult::failed(reason, "", 0)
        }
    }
}

async fn try_download(
    client: &Client,
    url: &str,
    out_dir: &Path,
    base_name: &str,
    min_kb: u64,
    timeout: Duration,
) -> Result<DownloadResult, FetchError> {
    tokio::fs::create_dir_all(out_dir).await?;

    let mut response = client.get(url).timeout(timeout).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let Some(ext) = extension_from_content_type(&content_type).or_else(|| extension_from_url(url))
    else {
        return Ok(DownloadResult::failed(
            "Not an image (content-type not recognized).",
            content_type,
            0,
        ));
    };

    let filename = format!("{base_name}_{}{ext}", url_fingerprint(url));
    let path = out_dir.join(filename);
    let path = std::path::absolute(&path).unwrap_or(path);

    let total = match stream_to_file(&mut response, &path).await {
        Ok(total) => total,
        Err(e) => {
            release_file(&path).await;
            return Err(e);
        }
    };

    if total < min_kb.saturating_mul(1024) {
        release_file(&path).await;
        #[allow(clippy::cast_precision_loss)]
        let kb = total as f64 / 1024.0;
        tracing::debug!(url = %url, bytes = total, min_kb, "image below size floor, discarded");
        return Ok(DownloadResult::failed(
            format!("Skipped: too small ({kb:.1} KB)."),
            content_type,
            total,
        ));
    }

    tracing::debug!(url = %url, path = %path.display(), bytes = total, "image downloaded");
    Ok(DownloadResult {
        ok: true,
        filepath: Some(path),
        reason: "Downloaded".to_string(),
        content_type,
        bytes_written: total,
    })
}

async fn stream_to_file(response: &mut reqwest::Response, path: &Path) -> Result<u64, FetchError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut total: u64 = 0;
    while let Some(chunk) = response.chunk().await? {
        if chunk.is_empty() {
            continue;
        }
        file.write_all(&chunk).await?;
        total = total.saturating_add(chunk.len() as u64);
    }
    file.flush().await?;
    Ok(total)
}

/// Best-effort removal; a failure here must not change the reported outcome.
async fn release_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove discarded download");
        }
    }
}
