// Command-line front end for the site data layer.
// Prints commit activity, footer count, redirects, and profile content as the pages see them.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nyx_site::cache::{FileStore, KvStore};
use nyx_site::profile::Profile;
use nyx_site::redirects::Redirects;
use nyx_site::footer::FooterCounter;
use nyx_site::{CommitFeed, CommitsConfig, SiteConfig};

#[derive(Debug, Parser)]
#[command(name = "nyx-site", version, about = "Portfolio site data layer")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print recent commit activity as JSON
    Commits {
        /// Cache directory (defaults to NYX_CACHE_DIR, then the platform cache dir)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
        /// Skip the cache and always ask GitHub
        #[arg(long, conflicts_with = "cache_dir")]
        no_cache: bool,
        /// Refresh the cache now instead of serving it
        #[arg(long, conflicts_with = "no_cache")]
        refresh: bool,
    },
    /// Hit the page-view counter and print the footer value
    Footer,
    /// Print the target of a short link
    Redirect {
        /// Path such as /gh
        path: String,
    },
    /// Print profile content as JSON
    Profile,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let site = SiteConfig::from_env();

    match cli.command {
        Command::Commits {
            cache_dir,
            no_cache,
            refresh,
        } => {
            let mut feed = CommitFeed::new(CommitsConfig::from_env()?)?;
            if !no_cache {
                feed = feed.with_store(open_store(cache_dir)?);
            }

            let data = if refresh {
                feed.refresh().await
            } else {
                feed.latest().await
            };
            println!("{}", serde_json::to_string_pretty(&data)?);

            // A stale read starts a refresh; let it reach the cache before exit.
            feed.finish_background(feed.config().timeout * 2).await;
        }
        Command::Footer => {
            let data = FooterCounter::new(&site.abacus)?.load().await;
            println!("{}", data.value);
        }
        Command::Redirect { path } => match Redirects::for_site(&site).resolve(&path) {
            Some(target) => println!("{}", target),
            None => {
                eprintln!("no redirect for {}", path);
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Profile => {
            let profile = Profile::for_site(&site);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_store(cache_dir: Option<PathBuf>) -> nyx_site::Result<Arc<dyn KvStore>> {
    let dir = cache_dir.or_else(|| std::env::var_os("NYX_CACHE_DIR").map(PathBuf::from));
    let store = match dir {
        Some(dir) => FileStore::with_dir(dir),
        None => FileStore::new()?,
    };
    Ok(Arc::new(store))
}
