// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Build the crawl configuration and open the output file
// 4. Run the crawl and print the summary
// 5. Exit with proper code (0 = crawl completed, 2 = setup error)
//
// The crawl itself never fails: unreachable pages are skipped. Only problems
// before the crawl starts (bad URL, output file we cannot open) are errors.
// =============================================================================

mod cli;
mod config;
mod crawl;

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::{parse_limit, CrawlConfig};
use crawl::{CrawlSummary, Crawler, FileSink, TraversalOrder};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<()> {
    let order = if cli.breadth_first {
        TraversalOrder::BreadthFirst
    } else {
        TraversalOrder::DepthFirst
    };

    let config = CrawlConfig::new(
        &cli.domain,
        &cli.keyword1,
        &cli.keyword2,
        parse_limit(cli.limit.as_deref()),
    )?
    .with_timeout(Duration::from_secs(cli.timeout))
    .with_order(order);

    let sink = FileSink::open(&cli.output)
        .with_context(|| format!("could not open output file {}", cli.output.display()))?;

    let summary = Crawler::new(config, sink)?.run().await;

    print_summary(&summary, cli.json)
}

// RUST_LOG wins if it is set; otherwise warnings only (or debug with --verbose)
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        println!(
            "URLs found: {}. Documents found: {}",
            summary.stats.total_links_seen, summary.stats.found_count
        );
    }
    Ok(())
}
