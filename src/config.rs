// src/config.rs
// =============================================================================
// This module holds the immutable configuration for a single crawl.
//
// What lives here:
// - The root URL we start from (normalized with an http:// prefix if needed)
// - The host we stay on (derived ONCE from the root URL)
// - The two keywords we look for in document links (stored lowercase)
// - The optional page limit
// - A few knobs for the HTTP layer (timeout) and traversal order
//
// Rust concepts:
// - Option<T>: The limit may or may not be set
// - Builder-style methods: with_timeout(self, ...) -> Self
// - thiserror: Deriving std::error::Error for our own error enum
// =============================================================================

use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::crawl::TraversalOrder;

/// Default per-request timeout for probes and page downloads.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default file that matched document URLs are appended to.
pub const DEFAULT_OUTPUT_FILE: &str = "papers.txt";

/// Errors that can occur while building a crawl configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The root URL could not be parsed at all
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The root URL parsed but has no host to stay on (e.g. file:///tmp)
    #[error("URL has no host: {0}")]
    MissingHost(String),
}

// Everything the crawl engine needs to know before it starts
//
// Once built, nothing in here changes. The host in particular is computed in
// new() and never recomputed, even if the crawl follows redirects.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    root: String,
    host: String,
    keyword1: String,
    keyword2: String,
    limit: Option<usize>,
    timeout: Duration,
    order: TraversalOrder,
}

impl CrawlConfig {
    // Builds a configuration from raw startup parameters
    //
    // Parameters:
    //   domain: the site to crawl, with or without a scheme
    //   keyword1, keyword2: matched case-insensitively against document links
    //   limit: None = crawl until the frontier is empty
    //
    // Example:
    //   CrawlConfig::new("math.purdue.edu", "MA265", "Math265", Some(100))
    //   -> root = "http://math.purdue.edu", host = "math.purdue.edu"
    pub fn new(
        domain: &str,
        keyword1: &str,
        keyword2: &str,
        limit: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let root = normalize_root(domain);

        let parsed = Url::parse(&root).map_err(|source| ConfigError::InvalidUrl {
            url: root.clone(),
            source,
        })?;

        let host = parsed
            .host_str()
            .ok_or_else(|| ConfigError::MissingHost(root.clone()))?
            .to_lowercase();

        Ok(Self {
            root,
            host,
            keyword1: keyword1.to_lowercase(),
            keyword2: keyword2.to_lowercase(),
            limit,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            order: TraversalOrder::default(),
        })
    }

    /// Sets the per-request timeout used by both the prober and the fetcher
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the order in which discovered pages are visited
    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn keyword1(&self) -> &str {
        &self.keyword1
    }

    pub fn keyword2(&self) -> &str {
        &self.keyword2
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn order(&self) -> TraversalOrder {
        self.order
    }
}

// Adds "http://" in front of the domain unless it already has an http(s) scheme
//
// "purdue.edu"          -> "http://purdue.edu"
// "httpbin.org"         -> "http://httpbin.org"
// "HTTPS://purdue.edu"  -> "HTTPS://purdue.edu" (unchanged)
fn normalize_root(domain: &str) -> String {
    let domain = domain.trim();
    let lower = domain.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        domain.to_string()
    } else {
        format!("http://{}", domain)
    }
}

// Parses the optional limit argument
//
// Anything that is missing, negative or not a number means "no limit".
// We never fail here - a bad limit simply turns into an unbounded crawl.
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value >= 0)
        .map(|value| value as usize)
}
