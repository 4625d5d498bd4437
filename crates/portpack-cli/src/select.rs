use std::path::Path;

use crate::session;

/// Adds URLs to the selection, or selects/clears everything.
///
/// # Errors
///
/// Returns an error if the session cannot be loaded or saved.
pub(crate) fn run_select(
    session_path: &Path,
    urls: &[String],
    all: bool,
    clear: bool,
) -> anyhow::Result<()> {
    let mut file = session::load(session_path)?;
    let search = &mut file.search;

    if clear {
        search.clear_selection();
        println!("selection cleared");
    } else if all {
        let added = search.select_all();
        println!("selected {added} more URL(s)");
    } else {
        for url in urls {
            if search.find(url).is_none() {
                tracing::warn!(url = %url, "URL is not among the search results; selecting anyway");
            }
            if !search.select(url) {
                println!("already selected: {url}");
            }
        }
    }

    println!("{} URL(s) selected", search.selected_urls().len());
    session::save(session_path, &file)
}

/// # Errors
///
/// Returns an error if the session cannot be loaded or saved.
pub(crate) fn run_deselect(session_path: &Path, urls: &[String]) -> anyhow::Result<()> {
    let mut file = session::load(session_path)?;
    for url in urls {
        if !file.search.deselect(url) {
            println!("not selected: {url}");
        }
    }
    println!("{} URL(s) selected", file.search.selected_urls().len());
    session::save(session_path, &file)
}

/// Prints every source's results with `[x]` marks on selected URLs.
///
/// # Errors
///
/// Returns an error if the session cannot be loaded.
pub(crate) fn run_list(session_path: &Path) -> anyhow::Result<()> {
    let file = session::load(session_path)?;
    let search = &file.search;

    println!("Base query: {}", search.base_query);
    for source in &search.results_by_source {
        println!();
        println!("== {} [{}]", source.name, source.mode);
        if let Some(err) = &source.error {
            println!("   error: {err}");
        }
        if source.results.is_empty() {
            println!("   (no results)");
        }
        for r in &source.results {
            let mark = if search.is_selected(&r.url) { "x" } else { " " };
            println!("   [{mark}] {}\n       {}", r.title, r.url);
        }
    }

    println!();
    println!("{} URL(s) selected", search.selected_urls().len());
    Ok(())
}
