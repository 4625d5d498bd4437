//! Shared records passed between search, resolution, and export.
//!
//! Optional text fields are plain `String`s where `""` means "not provided";
//! every provider fills the same fixed shape.

use serde::{Deserialize, Serialize};

/// One candidate page or image returned by a search provider.
///
/// `url` is the identity: selection and de-duplication across sources both
/// key on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub snippet: String,
    /// Preview image URL, when the provider supplies one.
    #[serde(default)]
    pub thumbnail_url: String,
    /// Provider-asserted direct image URL (image-search providers only).
    #[serde(default)]
    pub image_url: String,
    /// Provenance tag, e.g. `serpapi_images` or `bing_web`.
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "web".to_string()
}

impl SearchResult {
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: String::new(),
            thumbnail_url: String::new(),
            image_url: String::new(),
            source: default_source(),
        }
    }

    /// Direct image URL, if the provider asserted a non-empty one.
    #[must_use]
    pub fn direct_image_url(&self) -> Option<&str> {
        let trimmed = self.image_url.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Operator-supplied context stamped onto every record of an export run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub project: String,
    pub year: String,
    pub location: String,
    pub photographer: String,
    pub credit_line: String,
    pub hashtags: String,
    pub tags: String,
}

/// Persisted provenance for one selected page.
///
/// `downloaded_files` is empty exactly when `notes` reports that nothing
/// could be saved; Instagram records are always empty with a links-only note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub project: String,
    pub year: String,
    pub location: String,
    pub photographer: String,
    pub title: String,
    pub source_url: String,
    pub page_url: String,
    pub downloaded_files: Vec<String>,
    pub notes: String,
    pub credit_line: String,
    pub tags: String,
    pub created_at: String,
}
