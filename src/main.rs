//! Linksweep main entry point
//!
//! Command-line interface for the same-domain link inventory crawler.

use anyhow::Context;
use clap::Parser;
use linksweep::config::{load_config, validate, CrawlConfig};
use linksweep::crawler::Crawler;
use linksweep::output::{default_output_path, LinkWriter};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Linksweep: a same-domain link inventory crawler
///
/// Discovers every page reachable from the seed URL within its domain,
/// pacing requests politely. Results print to stdout or stream into a
/// text, CSV, or JSON file as they are discovered.
#[derive(Parser, Debug)]
#[command(name = "linksweep")]
#[command(version = "1.0.0")]
#[command(about = "A same-domain link inventory crawler", long_about = None)]
struct Cli {
    /// Website URL to crawl (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Output file (.txt, .text, .csv, or .json); pass the flag without a
    /// value for a timestamped file under ./output
    #[arg(short, long, value_name = "FILE")]
    output: Option<Option<PathBuf>>,

    /// Maximum concurrent requests
    #[arg(short, long, value_name = "N")]
    concurrency: Option<usize>,

    /// Minimum politeness delay before each request (seconds)
    #[arg(long, value_name = "SECS")]
    delay_min: Option<f64>,

    /// Maximum politeness delay before each request (seconds)
    #[arg(long, value_name = "SECS")]
    delay_max: Option<f64>,

    /// Per-request timeout (seconds)
    #[arg(long, value_name = "SECS")]
    timeout: Option<f64>,

    /// Additional fetch attempts after the first failure
    #[arg(long, value_name = "N")]
    retries: Option<u32>,

    /// Path to TOML configuration file (CLI flags override it)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;

    // A `verbose = true` in the config file widens logging like a single -v
    let verbosity = if config.verbose && cli.verbose == 0 {
        1
    } else {
        cli.verbose
    };
    setup_logging(verbosity, cli.quiet);

    let mut crawler = Crawler::new(&cli.url, config)?;
    let seed = crawler.seed().to_string();

    // Open the output file before crawling so a bad extension fails fast
    let writer = match resolve_output_path(&cli) {
        Some(path) => {
            let writer = Arc::new(LinkWriter::create(path).context("Failed to create output file")?);
            tracing::info!(
                "Incremental saving enabled, writing to {}",
                writer.path().display()
            );
            Some(writer)
        }
        None => None,
    };

    if let Some(writer) = &writer {
        let writer = Arc::clone(writer);
        crawler.set_link_callback(move |link| {
            if let Err(e) = writer.append(link) {
                tracing::warn!("Failed to save link incrementally: {}", e);
            }
        });
    }

    // Ctrl-c stops admission; in-flight fetches finish their attempt
    let shutdown = crawler.shutdown_handle();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("ctrl-c: stopping crawl");
            interrupt.store(true, Ordering::SeqCst);
        }
    });

    tracing::info!("Starting crawler for {}", seed);
    let start = Instant::now();
    let visited = crawler.run().await?;
    let elapsed = start.elapsed();

    match &writer {
        Some(writer) => {
            writer.save_all(&visited)?;
            println!("Results saved to: {}", writer.path().display());
        }
        None => {
            let mut sorted: Vec<&String> = visited.iter().collect();
            sorted.sort();
            for link in sorted {
                println!("{}", link);
            }
        }
    }

    println!(
        "Crawl completed in {:.2} seconds, found {} unique pages",
        elapsed.as_secs_f64(),
        visited.len()
    );

    if shutdown.load(Ordering::SeqCst) {
        return Err(linksweep::SweepError::Interrupted.into());
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linksweep=info,warn"),
            1 => EnvFilter::new("linksweep=debug,info"),
            2 => EnvFilter::new("linksweep=trace,debug"),
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

/// Builds the crawl configuration: TOML file first, CLI flags on top
fn build_config(cli: &Cli) -> anyhow::Result<CrawlConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => CrawlConfig::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        config.concurrency_limit = concurrency;
    }
    if let Some(delay_min) = cli.delay_min {
        config.delay_min = delay_min;
    }
    if let Some(delay_max) = cli.delay_max {
        config.delay_max = delay_max;
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout = timeout;
    }
    if let Some(retries) = cli.retries {
        config.max_retries = retries;
    }
    config.verbose = config.verbose || cli.verbose > 0;

    // CLI overrides can break invariants the file load already checked
    validate(&config)?;

    Ok(config)
}

/// Resolves the output path: explicit file, timestamped default, or none
fn resolve_output_path(cli: &Cli) -> Option<PathBuf> {
    match &cli.output {
        Some(Some(path)) => Some(path.clone()),
        Some(None) => {
            let path = default_output_path();
            println!("Using default output file: {}", path.display());
            Some(path)
        }
        None => None,
    }
}
