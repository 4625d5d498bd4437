//! Search results plus the operator's URL selection, persisted between
//! CLI invocations.

use std::collections::HashSet;

use portpack_core::SearchResult;
use serde::{Deserialize, Serialize};

use crate::types::SourceResults;

/// The state a search run leaves behind: per-source results and the
/// ordered, de-duplicated set of selected page URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    #[serde(default)]
    pub base_query: String,
    #[serde(default)]
    pub results_by_source: Vec<SourceResults>,
    #[serde(default)]
    selected_urls: Vec<String>,
}

impl SearchSession {
    /// Fresh session for a new search run; the selection starts empty.
    #[must_use]
    pub fn new(base_query: impl Into<String>, results_by_source: Vec<SourceResults>) -> Self {
        Self {
            base_query: base_query.into(),
            results_by_source,
            selected_urls: Vec::new(),
        }
    }

    /// Every result across sources, in source order.
    pub fn all_results(&self) -> impl Iterator<Item = &SearchResult> {
        self.results_by_source.iter().flat_map(|s| s.results.iter())
    }

    /// Owned copy of [`Self::all_results`], the lookup table for resolution.
    #[must_use]
    pub fn flat_results(&self) -> Vec<SearchResult> {
        self.all_results().cloned().collect()
    }

    /// First result whose URL equals `url` exactly.
    #[must_use]
    pub fn find(&self, url: &str) -> Option<&SearchResult> {
        self.all_results().find(|r| r.url == url)
    }

    #[must_use]
    pub fn selected_urls(&self) -> &[String] {
        &self.selected_urls
    }

    #[must_use]
    pub fn is_selected(&self, url: &str) -> bool {
        self.selected_urls.iter().any(|u| u == url)
    }

    /// Adds `url` to the selection. Returns `false` if it was already selected
    /// or is blank.
    pub fn select(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || self.is_selected(url) {
            return false;
        }
        self.selected_urls.push(url.to_string());
        true
    }

    /// Returns `true` if `url` was selected.
    pub fn deselect(&mut self, url: &str) -> bool {
        let before = self.selected_urls.len();
        self.selected_urls.retain(|u| u != url.trim());
        self.selected_urls.len() != before
    }

    /// Selects every non-empty result URL, keeping first-seen order.
    /// Returns how many URLs were newly added.
    pub fn select_all(&mut self) -> usize {
        let mut seen: HashSet<String> = self.selected_urls.iter().cloned().collect();
        let new: Vec<String> = self
            .all_results()
            .map(|r| r.url.trim())
            .filter(|u| !u.is_empty() && seen.insert((*u).to_string()))
            .map(str::to_string)
            .collect();
        let added = new.len();
        self.selected_urls.extend(new);
        added
    }

    pub fn clear_selection(&mut self) {
        self.selected_urls.clear();
    }
}
