//! Candidate image extraction from a fetched HTML page.
//!
//! Only static markup is inspected; pages that build their galleries with
//! client-side JavaScript yield nothing useful here.

use std::collections::HashSet;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, Url};
use scraper::{Html, Selector};

use crate::error::FetchError;

static IMAGE_EXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpg|jpeg|png|webp)(\?|$)").expect("valid image extension regex")
});
static OG_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:image"][content]"#).expect("og:image selector")
});
static TWITTER_IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[name="twitter:image"][content]"#).expect("twitter:image selector")
});
static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector"));

/// `true` when the URL ends in a common raster image extension, ignoring any
/// query string.
#[must_use]
pub fn is_probably_image_url(url: &str) -> bool {
    IMAGE_EXT_RE.is_match(url)
}

/// Fetch `page_url` and return up to `max_images` ranked candidate image URLs.
///
/// # Errors
///
/// - [`FetchError::Http`] on transport failure while fetching the page.
/// - [`FetchError::UnexpectedStatus`] for any non-2xx page response.
///
/// Callers treat either as "no candidates"; nothing downstream depends on
/// the failure kind.
pub async fn extract_image_urls(
    client: &Client,
    page_url: &str,
    max_images: usize,
    timeout: Duration,
) -> Result<Vec<String>, FetchError> {
    let response = client
        .get(page_url)
        .timeout(timeout)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: page_url.to_string(),
        });
    }

    let body = response.text().await?;
    let urls = extract_image_urls_from_html(page_url, &body, max_images)?;
    tracing::debug!(url = %page_url, count = urls.len(), "extracted candidate image URLs");
    Ok(urls)
}

/// Rank candidate image URLs found in `html`, resolving relative references
/// against `page_url`.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if `page_url` cannot be parsed.
pub fn extract_image_urls_from_html(
    page_url: &str,
    html: &str,
    max_images: usize,
) -> Result<Vec<String>, FetchError> {
    let base = Url::parse(page_url).map_err(|e| FetchError::InvalidUrl {
        url: page_url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(collect_ranked(&base, html, max_images))
}

fn collect_ranked(base: &Url, html: &str, max_images: usize) -> Vec<String> {
    let mut urls: Vec<String> = collect_raw_candidates(html)
        .iter()
        .filter_map(|raw| absolutize_url(base, raw))
        .filter(|u| u.starts_with("http"))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    urls.retain(|u| seen.insert(u.clone()));

    // Extension-bearing first, then shortest: tracker and ad images tend to
    // carry long query strings and no extension.
    urls.sort_by_key(|u| (!is_probably_image_url(u), u.len()));
    urls.truncate(max_images);
    urls
}

fn collect_raw_candidates(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut raw: Vec<String> = Vec::new();

    for selector in [&*OG_IMAGE_SELECTOR, &*TWITTER_IMAGE_SELECTOR] {
        if let Some(content) = document
            .select(selector)
            .find_map(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            raw.push(content.to_string());
        }
    }

    for img in document.select(&IMG_SELECTOR) {
        if let Some(src) = img.value().attr("src").map(str::trim) {
            if !src.is_empty() {
                raw.push(src.to_string());
            }
        }
        if let Some(srcset) = img.value().attr("srcset") {
            raw.extend(parse_srcset(srcset));
        }
    }

    raw
}

/// URL tokens of a `srcset` attribute, dropping width/density descriptors.
fn parse_srcset(srcset: &str) -> Vec<String> {
    srcset
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

fn absolutize_url(base: &Url, candidate: &str) -> Option<String> {
    base.join(candidate).ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(page_url: &str, html: &str, max: usize) -> Vec<String> {
        extract_image_urls_from_html(page_url, html, max).expect("valid page url")
    }

    #[test]
    fn resolves_relative_og_image() {
        let html = r#"<html><head><meta property="og:image" content="/a.jpg"></head></html>"#;
        assert_eq!(
            extract("https://ex.com/show", html, 10),
            vec!["https://ex.com/a.jpg".to_string()]
        );
    }

    #[test]
    fn collects_twitter_img_and_srcset_channels() {
        let html = r#"
            <meta name="twitter:image" content="https://cdn.ex.com/tw.png">
            <img src="look-1.jpg">
            <img srcset="/small.webp 480w, /large.webp 1080w">
        "#;
        let got = extract("https://ex.com/shows/spring/", html, 10);
        assert!(got.contains(&"https://cdn.ex.com/tw.png".to_string()));
        assert!(got.contains(&"https://ex.com/shows/spring/look-1.jpg".to_string()));
        assert!(got.contains(&"https://ex.com/small.webp".to_string()));
        assert!(got.contains(&"https://ex.com/large.webp".to_string()));
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn deduplicates_urls_seen_through_several_channels() {
        let html = r#"
            <meta property="og:image" content="https://ex.com/hero.jpg">
            <meta name="twitter:image" content="/hero.jpg">
            <img src="/hero.jpg" srcset="/hero.jpg 2x">
        "#;
        assert_eq!(
            extract("https://ex.com/show", html, 10),
            vec!["https://ex.com/hero.jpg".to_string()]
        );
    }

    #[test]
    fn drops_non_network_schemes() {
        let html = r#"
            <img src="data:image/png;base64,iVBORw0KGgo=">
            <img src="javascript:void(0)">
            <img src="mailto:press@ex.com">
            <img src="/ok.png">
        "#;
        assert_eq!(
            extract("https://ex.com/show", html, 10),
            vec!["https://ex.com/ok.png".to_string()]
        );
    }

    #[test]
    fn ranks_extension_urls_first_then_shorter() {
        let html = r#"
            <img src="/pixel?id=1">
            <img src="/gallery/very-long-editorial-name.jpg">
            <img src="/a.png?w=1200">
            <img src="/b.webp">
        "#;
        assert_eq!(
            extract("https://ex.com/show", html, 10),
            vec![
                "https://ex.com/b.webp".to_string(),
                "https://ex.com/a.png?w=1200".to_string(),
                "https://ex.com/gallery/very-long-editorial-name.jpg".to_string(),
                "https://ex.com/pixel?id=1".to_string(),
            ]
        );
    }

    #[test]
    fn truncates_to_max_images() {
        let html: String = (0..20)
            .map(|i| format!(r#"<img src="/look-{i}.jpg">"#))
            .collect();
        let got = extract("https://ex.com/show", &html, 5);
        assert_eq!(got.len(), 5);
        assert!(got.iter().all(|u| u.starts_with("https://ex.com/")));
    }

    #[test]
    fn empty_attributes_are_ignored() {
        let html = r#"<meta property="og:image" content="  "><img src=""><img srcset=" , ">"#;
        assert!(extract("https://ex.com/show", html, 10).is_empty());
    }

    #[test]
    fn image_extension_detection_ignores_query_and_case() {
        assert!(is_probably_image_url("https://ex.com/A.JPG"));
        assert!(is_probably_image_url("https://ex.com/a.jpeg?w=400"));
        assert!(!is_probably_image_url("https://ex.com/a.gif"));
        assert!(!is_probably_image_url("https://ex.com/jpg/page"));
    }

    #[test]
    fn rejects_unparseable_page_url() {
        let err = extract_image_urls_from_html("not a url", "<img src=a.jpg>", 5).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn parse_srcset_keeps_url_tokens_only() {
        assert_eq!(
            parse_srcset("a.jpg 1x,  b.jpg 2x ,c.jpg"),
            vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()]
        );
    }
}
