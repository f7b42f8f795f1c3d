//! irins-harvest main entry point
//!
//! This is the command-line interface for the IRINS faculty-profile
//! harvester.

use anyhow::Context;
use clap::Parser;
use irins_harvest::config::{load_config, Config};
use irins_harvest::crawler::harvest;
use irins_harvest::query::{search, SearchQuery};
use irins_harvest::storage::CacheStore;
use irins_harvest::url::institution_code;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// irins-harvest: a faculty-profile harvester for IRINS directory sites
///
/// Crawls the configured institutional directory sites, extracts faculty
/// records into a cached JSON snapshot, and prints the records matching
/// an optional query expression.
#[derive(Parser, Debug)]
#[command(name = "irins-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Harvests faculty profiles from IRINS directory sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Query expression: "name:...", "vidwan:...", or comma-separated keywords
    #[arg(long)]
    query: Option<String>,

    /// Restrict results to one institution code (e.g. IITM)
    #[arg(long)]
    institution: Option<String>,

    /// Crawl even if the cached snapshot is still fresh
    #[arg(long)]
    refresh: bool,

    /// Print results as JSON instead of text lines
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without crawling
    #[arg(long, conflicts_with = "status")]
    dry_run: bool,

    /// Show snapshot cache status and exit
    #[arg(long, conflicts_with = "dry_run")]
    status: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;

    // Handle different modes
    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.status {
        handle_status(&config);
    } else {
        handle_harvest(config, &cli).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("irins_harvest=info,warn"),
            1 => EnvFilter::new("irins_harvest=debug,info"),
            2 => EnvFilter::new("irins_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be harvested
fn handle_dry_run(config: &Config) {
    println!("=== irins-harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent requests: {}",
        config.crawler.max_concurrent_requests
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!(
        "  Retry: {} attempts, {}ms base delay, {}s budget",
        config.crawler.max_retry_attempts,
        config.crawler.retry_base_delay_ms,
        config.crawler.retry_budget_secs
    );
    println!(
        "  Seed render attempts: {}",
        config.crawler.seed_render_attempts
    );

    println!("\nCache:");
    println!("  Snapshot: {}", config.cache.path.display());
    println!("  Expiration: {}s", config.cache.expiration_secs);

    println!("\nSites ({}):", config.sites.len());
    for site in &config.sites {
        match Url::parse(&site.seed) {
            Ok(seed) => println!("  - {} ({})", site.seed, institution_code(&seed)),
            Err(_) => println!("  - {}", site.seed),
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would harvest {} sites", config.sites.len());
}

/// Handles the --status mode: reports on the snapshot cache
fn handle_status(config: &Config) {
    let store = CacheStore::new(config.cache.path.clone(), config.cache.expiration());

    println!("Snapshot: {}", store.path().display());

    match store.age() {
        Some(age) => {
            let modified: chrono::DateTime<chrono::Local> =
                (std::time::SystemTime::now() - age).into();
            let freshness = if store.is_fresh() { "fresh" } else { "stale" };
            println!(
                "Last updated: {} ({}s ago, {})",
                modified.format("%Y-%m-%d %H:%M:%S"),
                age.as_secs(),
                freshness
            );
            println!("Records: {}", store.load().len());
        }
        None => println!("No snapshot on disk yet"),
    }
}

/// Handles the main harvest-and-query operation
async fn handle_harvest(config: Config, cli: &Cli) -> anyhow::Result<()> {
    if cli.refresh {
        tracing::info!("Refresh requested, ignoring any fresh snapshot");
    }

    let records = harvest(config, cli.refresh).await.context("harvest failed")?;

    let query = SearchQuery::parse(cli.query.as_deref());
    let results = search(&records, &query, cli.institution.as_deref());

    if results.is_empty() {
        println!("No matching profiles found");
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for summary in &results {
            println!(
                "{} | {} | {} | {} | {}",
                summary.institution,
                summary.name,
                summary.department,
                summary.vidwan_id,
                summary.profile_url
            );
        }
        println!("\n{} profile(s)", results.len());
    }

    Ok(())
}
