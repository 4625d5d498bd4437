use std::path::Path;

use chrono::Utc;
use portpack_core::AppConfig;
use portpack_export::{
    build_project_paths, export_metadata, project_folder_label, write_caption_pack,
};
use portpack_fetch::{resolve_selection, FetchSettings, HttpFetcher, ResolveOptions};

use crate::session;

/// Resolves every selected page into the project folder, then writes the
/// metadata files and the caption pack.
///
/// Pages are processed one at a time; a page that yields nothing still gets a
/// record with an explanatory note.
///
/// # Errors
///
/// Returns an error if nothing is selected, the session cannot be read, the
/// HTTP client cannot be built, or the export files cannot be written.
pub(crate) async fn run_export(
    config: &AppConfig,
    session_path: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let file = session::load(session_path)?;
    let selected = file.search.selected_urls();
    if selected.is_empty() {
        anyhow::bail!("select at least one result first (`portpack-cli select <url>`)");
    }

    let ctx = file.profile.context();
    let now = Utc::now();
    let base = output.unwrap_or(config.output_dir.as_path());
    let paths = build_project_paths(
        base,
        &ctx.year,
        &ctx.location,
        &project_folder_label(&ctx.project, now),
        &ctx.photographer,
    )?;
    println!("Saving into: {}", paths.root.display());

    let fetcher = HttpFetcher::new(FetchSettings::from_config(config))?;
    let options = ResolveOptions {
        min_kb: file.profile.min_kb,
        max_images_per_page: file.profile.max_images_per_page,
    };

    let results = file.search.flat_results();
    let records =
        resolve_selection(&fetcher, &ctx, selected, &results, &paths.assets, options).await;

    export_metadata(&records, &paths.metadata, now)?;
    write_caption_pack(&paths.instagram_pack, &ctx)?;

    let files: usize = records.iter().map(|r| r.downloaded_files.len()).sum();
    for record in &records {
        let status = if record.notes.is_empty() {
            format!("{} file(s)", record.downloaded_files.len())
        } else {
            record.notes.clone()
        };
        println!("  {} -> {status}", record.page_url);
    }
    tracing::info!(pages = records.len(), files, "export complete");
    println!("Done: {} page(s), {files} file(s)", records.len());
    println!("{}", paths.root.display());
    Ok(())
}
