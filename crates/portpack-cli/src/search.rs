use std::path::{Path, PathBuf};

use portpack_core::profile::validate_profile;
use portpack_core::{load_profile, AppConfig, ProjectProfile, ProviderChoice};
use portpack_search::{auto_query, build_provider, build_queries, run_searches, SearchSession};

use crate::session::{self, SessionFile};

#[derive(Debug, Default)]
pub(crate) struct SearchArgs {
    pub profile: Option<PathBuf>,
    pub sample: bool,
    pub provider: Option<ProviderChoice>,
    pub query: Option<String>,
}

/// Picks the profile for a search run: a YAML file, the demo profile, or a
/// blank profile seeded from the environment limits.
///
/// # Errors
///
/// Returns an error if the profile file cannot be loaded or the resulting
/// profile is out of range.
pub(crate) fn resolve_profile(
    config: &AppConfig,
    args: &SearchArgs,
) -> anyhow::Result<ProjectProfile> {
    let mut profile = if let Some(path) = &args.profile {
        load_profile(path)?
    } else if args.sample {
        ProjectProfile::sample()
    } else {
        ProjectProfile {
            max_results: config.max_results,
            min_kb: config.min_kb,
            max_images_per_page: config.max_images_per_page,
            ..ProjectProfile::default()
        }
    };

    if let Some(provider) = args.provider {
        profile.provider = provider;
    }
    validate_profile(&profile)?;
    Ok(profile)
}

/// Runs every enabled source query and stores a fresh session.
///
/// # Errors
///
/// Returns an error if the profile is invalid, the provider cannot be built
/// (for example a missing API key), or the session cannot be saved.
/// Per-source search failures are reported, not propagated.
pub(crate) async fn run_search(
    config: &AppConfig,
    session_path: &Path,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let profile = resolve_profile(config, &args)?;

    let base_query = args
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map_or_else(|| auto_query(&profile), str::to_string);
    if base_query.is_empty() {
        anyhow::bail!("base query is empty; fill in the profile or pass --query");
    }

    let provider = build_provider(profile.provider, config)?;
    let queries = build_queries(&profile, &base_query);
    if queries.is_empty() {
        println!("no sources enabled; nothing to search");
    }

    tracing::info!(
        provider = provider.name(),
        sources = queries.len(),
        query = %base_query,
        "starting search"
    );
    let results = run_searches(provider.as_ref(), &queries, profile.max_results).await;

    println!("Base query: {base_query}");
    for source in &results {
        println!();
        println!("== {} [{}] ({} results)", source.name, source.mode, source.results.len());
        println!("   {}", source.query);
        if let Some(err) = &source.error {
            println!("   error: {err}");
        }
        for r in &source.results {
            let marker = if r.direct_image_url().is_some() { " [image]" } else { "" };
            println!("   - {}{marker}\n     {}", r.title, r.url);
        }
    }

    let file = SessionFile {
        profile,
        search: SearchSession::new(base_query, results),
    };
    session::save(session_path, &file)?;
    println!();
    println!("session saved to {}", session_path.display());
    Ok(())
}
