//! Metadata files written alongside downloaded assets.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use portpack_core::AssetRecord;
use serde::Serialize;

use crate::error::ExportError;

pub const ASSETS_JSON: &str = "assets.json";
pub const ASSETS_CSV: &str = "assets.csv";
pub const LINKS_TXT: &str = "links.txt";
pub const POST_PLAN_MD: &str = "post_plan.md";

/// Separator for `downloaded_files` inside a single CSV cell.
const FILES_SEPARATOR: &str = ";";

/// Flat CSV view of an [`AssetRecord`]; same columns, list joined.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    project: &'a str,
    year: &'a str,
    location: &'a str,
    photographer: &'a str,
    title: &'a str,
    source_url: &'a str,
    page_url: &'a str,
    downloaded_files: String,
    notes: &'a str,
    credit_line: &'a str,
    tags: &'a str,
    created_at: &'a str,
}

impl<'a> From<&'a AssetRecord> for CsvRow<'a> {
    fn from(r: &'a AssetRecord) -> Self {
        Self {
            project: &r.project,
            year: &r.year,
            location: &r.location,
            photographer: &r.photographer,
            title: &r.title,
            source_url: &r.source_url,
            page_url: &r.page_url,
            downloaded_files: r.downloaded_files.join(FILES_SEPARATOR),
            notes: &r.notes,
            credit_line: &r.credit_line,
            tags: &r.tags,
            created_at: &r.created_at,
        }
    }
}

/// Writes `assets.json`, `assets.csv`, `links.txt` and `post_plan.md` into
/// `meta_dir`, overwriting earlier copies.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or any file write fails.
pub fn export_metadata(
    records: &[AssetRecord],
    meta_dir: &Path,
    now: DateTime<Utc>,
) -> Result<(), ExportError> {
    write_text(
        &meta_dir.join(ASSETS_JSON),
        &format!("{}\n", serde_json::to_string_pretty(records)?),
    )?;
    write_csv(&meta_dir.join(ASSETS_CSV), records)?;
    write_text(&meta_dir.join(LINKS_TXT), &links(records))?;
    write_text(&meta_dir.join(POST_PLAN_MD), &post_plan(now))?;

    tracing::info!(
        records = records.len(),
        dir = %meta_dir.display(),
        "metadata exported"
    );
    Ok(())
}

fn write_csv(path: &Path, records: &[AssetRecord]) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        // serde only emits the header alongside the first row.
        writer.write_record(CSV_HEADER)?;
    }
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush().map_err(ExportError::io(path))?;
    Ok(())
}

const CSV_HEADER: [&str; 12] = [
    "project",
    "year",
    "location",
    "photographer",
    "title",
    "source_url",
    "page_url",
    "downloaded_files",
    "notes",
    "credit_line",
    "tags",
    "created_at",
];

fn links(records: &[AssetRecord]) -> String {
    records.iter().fold(String::new(), |mut out, r| {
        out.push_str(r.source_url.trim());
        out.push('\n');
        out
    })
}

fn post_plan(now: DateTime<Utc>) -> String {
    let mut plan = String::from("# Post Plan\n\n");
    let _ = writeln!(
        plan,
        "Generated: {}\n",
        now.to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    plan.push_str("## Carousel order idea\n");
    plan.push_str("- 1) Strong hero image\n- 2) Detail\n- 3) BTS\n- 4) Final look\n\n");
    plan.push_str("## Checklist\n");
    plan.push_str("- Confirm usage/rights for each file\n- Confirm credits\n- Keep originals backed up\n");
    plan
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(ExportError::io(path))
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
