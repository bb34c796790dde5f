// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Submodules:
// - classify: Decides what each link is (ignore, reject, match, candidate)
// - probe: HEAD requests to find out whether a link is an HTML page
// - frontier: The stack of pages to visit plus the visited set
// - fetch: Downloads a page and extracts its links
// - sink: Where matched document URLs are written
// - driver: The loop that ties all of the above together
//
// Everything runs one request at a time. There is no shared global state:
// each Crawler owns its own frontier, visited set and counters.
// =============================================================================

mod classify;
mod driver;
mod fetch;
mod frontier;
mod probe;
mod sink;

pub use driver::{CrawlSummary, Crawler};
pub use frontier::TraversalOrder;
pub use sink::FileSink;
