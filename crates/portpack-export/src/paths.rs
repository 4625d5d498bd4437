use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use portpack_core::slugify;

use crate::error::ExportError;

/// Directory layout of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub assets: PathBuf,
    pub metadata: PathBuf,
    pub instagram_pack: PathBuf,
}

/// `{project}__{YYYY-mm-dd_HHMMSS}`, unique per run.
#[must_use]
pub fn project_folder_label(project: &str, now: DateTime<Utc>) -> String {
    format!("{project}__{}", now.format("%Y-%m-%d_%H%M%S"))
}

/// Creates `{base}/Portfolio/{year}/{location}/{project}/{photographer}` and
/// its `Assets`, `Metadata` and `Instagram_Pack` subfolders.
///
/// Every component is slugged. An empty location or photographer becomes
/// `unknown-location` / `unknown-photographer`.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if a directory cannot be created.
pub fn build_project_paths(
    base: &Path,
    year: &str,
    location: &str,
    project: &str,
    photographer: &str,
) -> Result<ProjectPaths, ExportError> {
    let root = base
        .join("Portfolio")
        .join(slug_or(year, "unknown-year"))
        .join(slug_or(location, "unknown-location"))
        .join(slug_or(project, "untitled-project"))
        .join(slug_or(photographer, "unknown-photographer"));

    let paths = ProjectPaths {
        assets: root.join("Assets"),
        metadata: root.join("Metadata"),
        instagram_pack: root.join("Instagram_Pack"),
        root,
    };

    for dir in [&paths.assets, &paths.metadata, &paths.instagram_pack] {
        std::fs::create_dir_all(dir).map_err(ExportError::io(dir))?;
    }
    tracing::debug!(root = %paths.root.display(), "project folders ready");

    Ok(paths)
}

fn slug_or(raw: &str, fallback: &str) -> String {
    let slug = slugify(raw);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn folder_label_appends_timestamp() {
        let now = Utc.with_ymd_and_hms(2025, 1, 28, 9, 5, 7).unwrap();
        assert_eq!(
            project_folder_label("JPG Couture", now),
            "JPG Couture__2025-01-28_090507"
        );
    }

    #[test]
    fn layout_is_slugged_and_created() {
        let dir = tempfile::tempdir().unwrap();
        let paths = build_project_paths(
            dir.path(),
            "2025",
            "Paris, France",
            "JPG Couture Spring 2025 (Paris)__2025-01-28_090507",
            "Holli Smith",
        )
        .unwrap();

        assert_eq!(
            paths.root,
            dir.path()
                .join("Portfolio/2025/paris-france")
                .join("jpg-couture-spring-2025-paris-2025-01-28-090507")
                .join("holli-smith")
        );
        assert!(paths.assets.is_dir());
        assert!(paths.metadata.is_dir());
        assert!(paths.instagram_pack.is_dir());
        assert_eq!(paths.assets, paths.root.join("Assets"));
    }

    #[test]
    fn blank_components_get_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let paths = build_project_paths(dir.path(), "2025", "  ", "Run", "").unwrap();
        assert!(paths.root.ends_with("2025/unknown-location/run/unknown-photographer"));
    }

    #[test]
    fn existing_folders_are_reused() {
        let dir = tempfile::tempdir().unwrap();
        let first = build_project_paths(dir.path(), "2025", "Paris", "Run", "A").unwrap();
        let second = build_project_paths(dir.path(), "2025", "Paris", "Run", "A").unwrap();
        assert_eq!(first, second);
    }
}
