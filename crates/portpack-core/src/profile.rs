//! Project profiles: the search terms, sources, and download rules for one
//! asset-pack run, loadable from YAML.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ProjectContext;
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Web,
    Instagram,
}

/// How the Instagram links-only query combines the handle with show terms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstagramMode {
    #[default]
    HandleAndShowTerms,
    HandleOnly,
    ShowTermsOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    #[default]
    Mock,
    Bing,
    SerpApi,
}

impl std::fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderChoice::Mock => write!(f, "mock"),
            ProviderChoice::Bing => write!(f, "bing"),
            ProviderChoice::SerpApi => write!(f, "serpapi"),
        }
    }
}

impl FromStr for ProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderChoice::Mock),
            "bing" => Ok(ProviderChoice::Bing),
            "serpapi" | "serp" => Ok(ProviderChoice::SerpApi),
            other => Err(format!(
                "unknown provider '{other}'; expected mock, bing, or serpapi"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectProfile {
    pub brand: String,
    pub season: String,
    pub year: u16,
    pub location: String,
    /// Comma separated.
    pub keywords: String,
    pub talent_name: String,
    pub agency: String,
    /// Folder label; derived from brand/season/year/location when empty.
    pub project_event: String,
    pub photographer: String,
    pub brand_domain: String,
    pub ig_handle: String,
    pub ig_mode: InstagramMode,
    pub credits_line: String,
    pub hashtags: String,
    pub sources: Vec<SourceKind>,
    pub provider: ProviderChoice,
    pub use_vogue: bool,
    pub use_voguerunway: bool,
    pub use_brand_site: bool,
    pub max_results: usize,
    pub min_kb: u64,
    pub max_images_per_page: usize,
}

impl Default for ProjectProfile {
    fn default() -> Self {
        Self {
            brand: String::new(),
            season: String::new(),
            year: 2025,
            location: String::new(),
            keywords: String::new(),
            talent_name: String::new(),
            agency: String::new(),
            project_event: String::new(),
            photographer: String::new(),
            brand_domain: String::new(),
            ig_handle: String::new(),
            ig_mode: InstagramMode::default(),
            credits_line: String::new(),
            hashtags: String::new(),
            sources: vec![SourceKind::Web],
            provider: ProviderChoice::default(),
            use_vogue: true,
            use_voguerunway: true,
            use_brand_site: true,
            max_results: 10,
            min_kb: 30,
            max_images_per_page: 15,
        }
    }
}

impl ProjectProfile {
    /// Demo profile that runs end to end against the mock provider.
    #[must_use]
    pub fn sample() -> Self {
        Self {
            brand: "Jean Paul Gaultier".to_string(),
            season: "Haute Couture Spring".to_string(),
            year: 2025,
            location: "Paris".to_string(),
            keywords: "backstage, runway, beauty, hair".to_string(),
            talent_name: "Holli Smith".to_string(),
            agency: "Art Partner".to_string(),
            project_event: "JPG Couture Spring 2025 (Paris)".to_string(),
            ig_handle: "jeanpaulgaultier".to_string(),
            credits_line: "Hair: Holli Smith (Art Partner)".to_string(),
            hashtags: "#hair #fashion #runway #backstage #editorial".to_string(),
            sources: vec![SourceKind::Web, SourceKind::Instagram],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn includes(&self, source: SourceKind) -> bool {
        self.sources.contains(&source)
    }

    /// Human-readable project label used for records, captions, and folders.
    #[must_use]
    pub fn project_label(&self) -> String {
        let explicit = self.project_event.trim();
        if !explicit.is_empty() {
            return explicit.to_string();
        }
        let year = self.year.to_string();
        let derived = join_terms(&[
            self.brand.as_str(),
            self.season.as_str(),
            year.as_str(),
            self.location.as_str(),
        ]);
        if derived.is_empty() {
            "Untitled Project".to_string()
        } else {
            derived
        }
    }

    #[must_use]
    pub fn context(&self) -> ProjectContext {
        ProjectContext {
            project: self.project_label(),
            year: self.year.to_string(),
            location: self.location.trim().to_string(),
            photographer: self.photographer.trim().to_string(),
            credit_line: self.credits_line.clone(),
            hashtags: self.hashtags.clone(),
            tags: self.keywords.clone(),
        }
    }
}

/// Normalise one search term: commas become spaces, whitespace collapses.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join normalised terms with single spaces, skipping empty ones.
#[must_use]
pub fn join_terms(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| normalize_term(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Load and validate a project profile from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_profile(path: &Path) -> Result<ProjectProfile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ProfileFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let profile: ProjectProfile = serde_yaml::from_str(&content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Bounds match the operator controls the profiles were designed around.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] naming the first field out of range.
pub fn validate_profile(profile: &ProjectProfile) -> Result<(), ConfigError> {
    if !(1990..=2100).contains(&profile.year) {
        return Err(ConfigError::Validation(format!(
            "year {} is out of range; must be between 1990 and 2100",
            profile.year
        )));
    }
    if !(5..=30).contains(&profile.max_results) {
        return Err(ConfigError::Validation(format!(
            "max_results {} is out of range; must be between 5 and 30",
            profile.max_results
        )));
    }
    if !(5..=250).contains(&profile.min_kb) {
        return Err(ConfigError::Validation(format!(
            "min_kb {} is out of range; must be between 5 and 250",
            profile.min_kb
        )));
    }
    if !(5..=60).contains(&profile.max_images_per_page) {
        return Err(ConfigError::Validation(format!(
            "max_images_per_page {} is out of range; must be between 5 and 60",
            profile.max_images_per_page
        )));
    }
    if profile.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be enabled".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
