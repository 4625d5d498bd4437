//! Metadata-only image URL probe.

use std::time::Duration;

use reqwest::Client;

/// Verdict for one probed URL. Failures are data, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    pub ok: bool,
    /// Transport status code; `0` when the probe itself failed.
    pub status: u16,
    /// Lowercased `Content-Type`, empty when the server sent none.
    pub content_type: String,
    /// URL after redirects, or the input URL when the probe failed.
    pub final_url: String,
    pub reason: String,
}

/// Issue a single `HEAD` request (redirects followed) and classify the URL.
///
/// Rules, first match wins: transport failure, status >= 400, a content type
/// without `image/`, otherwise ok. No retries.
pub async fn check_image_url(client: &Client, url: &str, timeout: Duration) -> UrlCheck {
    let response = match client.head(url).timeout(timeout).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "image probe failed");
            return UrlCheck {
                ok: false,
                status: 0,
                content_type: String::new(),
                final_url: url.to_string(),
                reason: format!("HEAD failed: {e}"),
            };
        }
    };

    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let final_url = response.url().to_string();

    let (ok, reason) = if status >= 400 {
        (false, "HTTP error")
    } else if !content_type.contains("image/") {
        (false, "Not an image content-type")
    } else {
        (true, "")
    };

    if !ok {
        tracing::debug!(url = %url, status, content_type = %content_type, reason, "image probe rejected");
    }

    UrlCheck {
        ok,
        status,
        content_type,
        final_url,
        reason: reason.to_string(),
    }
}
