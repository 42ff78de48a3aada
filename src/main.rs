mod categories;
mod collector;
mod error;
mod feed;
mod fetch;
mod parser;
mod settings;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{debug, info};

use collector::Collector;
use fetch::{HttpFetcher, ResponseCache};

#[derive(Parser)]
#[command(
    name = "nitroradical",
    version,
    about = "Scrape a BBC Radio genre index into a JSON feed"
)]
struct Cli {
    /// Genre to scrape (e.g. arts, comedy, news)
    category: String,
    /// Always hit the network, bypassing the response cache
    #[arg(long)]
    no_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let Some(cli) = parse_cli(std::env::args_os()) else {
        println!("{}", categories::usage());
        return Ok(());
    };

    let mut settings = settings::Settings::load()?;
    settings.no_cache |= cli.no_cache;

    let cache = if settings.no_cache {
        None
    } else {
        Some(
            ResponseCache::open(&settings.cache_path, Duration::from_secs(settings.cache_ttl_secs))
                .context("Failed to open response cache")?,
        )
    };
    let fetcher = HttpFetcher::new(&settings, cache)?;

    let t0 = Instant::now();
    let feed = Collector::new(&fetcher)
        .with_spinner()
        .collect(&cli.category)
        .await?;
    for page in &feed.pages {
        debug!(url = %page.url, last = page.is_last, programmes = page.programmes.len(), "page collected");
    }
    info!(
        "Scraped {} in {:.1}s",
        cli.category,
        t0.elapsed().as_secs_f64()
    );

    feed::write_json(&feed, std::io::stdout().lock())?;
    Ok(())
}

/// `None` means show usage: missing, extra or unknown category.
fn parse_cli<I, T>(args: I) -> Option<Cli>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) if categories::is_allowed(&cli.category) => Some(cli),
        Ok(_) => None,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(_) => None,
    }
}
