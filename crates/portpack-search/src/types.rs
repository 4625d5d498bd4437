//! Query and per-source result types.

use portpack_core::SearchResult;
use serde::{Deserialize, Serialize};

/// Whether a source is searched through the image vertical or plain web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Web,
    Images,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Web => write!(f, "web"),
            SearchMode::Images => write!(f, "images"),
        }
    }
}

/// One named, ready-to-run query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceQuery {
    /// Display name, e.g. `Vogue.com` or `Instagram`.
    pub name: String,
    pub mode: SearchMode,
    pub query: String,
}

impl SourceQuery {
    pub(crate) fn new(name: &str, mode: SearchMode, query: String) -> Self {
        Self {
            name: name.to_string(),
            mode,
            query,
        }
    }
}

/// Results of running one [`SourceQuery`].
///
/// A failed source keeps its query and mode, carries an empty result list,
/// and records the failure in `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceResults {
    pub name: String,
    pub query: String,
    pub mode: SearchMode,
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
