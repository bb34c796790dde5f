// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   doc-crawler <DOMAIN> <KEYWORD1> <KEYWORD2> [LIMIT]
//
// Example:
//   doc-crawler http://math.purdue.edu Math265 MA265 10000
//
// If the arguments are wrong, clap prints the usage and exits before any
// crawling happens.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DEFAULT_OUTPUT_FILE, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "doc-crawler",
    version,
    about = "Crawl a website and collect links to PDF documents matching two keywords",
    long_about = "doc-crawler walks every page of a single website, starting from DOMAIN, \
                  and appends the URL of every .pdf link that mentions KEYWORD1 or KEYWORD2 \
                  to an output file. Keywords are matched case-insensitively."
)]
pub struct Cli {
    /// Web address to crawl (http:// is added if missing)
    pub domain: String,

    /// A keyword that identifies the documents you want
    pub keyword1: String,

    /// Another keyword that identifies the documents you want
    pub keyword2: String,

    /// Maximum number of pages to crawl
    ///
    /// Leave it out (or pass a negative number) to crawl every page that can
    /// be reached. Note: the crawler stops once it has fetched MORE than
    /// this many pages, so a limit of 10 fetches 11 pages.
    #[arg(allow_negative_numbers = true)]
    pub limit: Option<String>,

    /// File that matched document URLs are appended to
    #[arg(long, short, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Timeout in seconds for each HTTP request
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Visit pages in discovery order instead of newest-first
    #[arg(long)]
    pub breadth_first: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log every link decision to stderr (same as RUST_LOG=debug)
    #[arg(long, short)]
    pub verbose: bool,
}
