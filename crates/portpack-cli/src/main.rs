mod diagnose;
mod export;
mod search;
mod select;
mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portpack_core::ProviderChoice;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "portpack-cli")]
#[command(about = "Find, select, and package editorial portfolio assets")]
struct Cli {
    /// Session file holding the last search and the current selection
    #[arg(long, global = true, default_value = "portpack-session.json")]
    session: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run every enabled source query and start a fresh session
    Search {
        /// YAML project profile
        #[arg(long, conflicts_with = "sample")]
        profile: Option<PathBuf>,
        /// Use the built-in demo profile
        #[arg(long)]
        sample: bool,
        /// Override the profile's provider (mock, bing, serpapi)
        #[arg(long)]
        provider: Option<ProviderChoice>,
        /// Override the generated base query
        #[arg(long)]
        query: Option<String>,
    },
    /// Add URLs to the selection, or select/clear everything
    Select {
        #[arg(required_unless_present_any = ["all", "clear"], conflicts_with_all = ["all", "clear"])]
        urls: Vec<String>,
        /// Select every result URL
        #[arg(long, conflicts_with = "clear")]
        all: bool,
        /// Empty the selection
        #[arg(long)]
        clear: bool,
    },
    /// Remove URLs from the selection
    Deselect {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Print results per source with selection marks
    List,
    /// Download and organize every selected page
    Export {
        /// Base output directory (defaults to PORTPACK_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Probe a single URL with the image validator
    Check { url: String },
    /// List image candidates found on a page
    Extract {
        page_url: String,
        /// Candidate limit (defaults to PORTPACK_MAX_IMAGES_PER_PAGE)
        #[arg(long)]
        max: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = portpack_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Search {
            profile,
            sample,
            provider,
            query,
        }) => {
            search::run_search(
                &config,
                &cli.session,
                search::SearchArgs {
                    profile,
                    sample,
                    provider,
                    query,
                },
            )
            .await?;
        }
        Some(Commands::Select { urls, all, clear }) => {
            select::run_select(&cli.session, &urls, all, clear)?;
        }
        Some(Commands::Deselect { urls }) => select::run_deselect(&cli.session, &urls)?,
        Some(Commands::List) => select::run_list(&cli.session)?,
        Some(Commands::Export { output }) => {
            export::run_export(&config, &cli.session, output.as_deref()).await?;
        }
        Some(Commands::Check { url }) => diagnose::run_check(&config, &url).await?,
        Some(Commands::Extract { page_url, max }) => {
            diagnose::run_extract(&config, &page_url, max).await?;
        }
        None => println!("portpack-cli ready; run `portpack-cli search --sample` to try it"),
    }

    Ok(())
}
