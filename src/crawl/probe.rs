// src/crawl/probe.rs
// =============================================================================
// This module asks a server what kind of resource a URL points at, without
// downloading it.
//
// Key functionality:
// - Makes an HTTP HEAD request (headers only, no body download)
// - Reads the Content-Type header
// - Turns every failure (bad URL, timeout, refused connection, ...) into a
//   plain value instead of an error
//
// Why bother?
// - A link like /lectures/week3 could be a page or a 200MB video
// - One HEAD round-trip is much cheaper than a full GET of something we
//   would throw away anyway
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;
use url::Url;

/// What a probed URL turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// The server says it is HTML - worth crawling
    Html,
    /// Something else (PDF, image, zip, no Content-Type at all...)
    Other,
    /// We could not get an answer at all
    Unreachable,
}

// Probes a single URL with a HEAD request
//
// This never fails: problems are reported as ContentKind::Unreachable and the
// caller simply drops the link.
pub async fn probe(client: &Client, url: &str) -> ContentKind {
    // reqwest would reject these too, but checking first keeps mailto:,
    // javascript: and friends out of the network layer entirely
    match Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
        _ => {
            debug!(url, "probe skipped: not an http(s) URL");
            return ContentKind::Unreachable;
        }
    }

    match client.head(url).send().await {
        Ok(response) => {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok());
            let kind = content_kind(content_type);
            debug!(url, ?content_type, ?kind, "probed");
            kind
        }
        Err(e) => {
            debug!(url, reason = describe_error(&e), "probe failed");
            ContentKind::Unreachable
        }
    }
}

// Maps a Content-Type header value to a ContentKind
//
// Examples:
//   Some("text/html; charset=utf-8")  -> Html
//   Some("application/xhtml+xml")     -> Html
//   Some("application/pdf")           -> Other
//   None                              -> Other
pub fn content_kind(content_type: Option<&str>) -> ContentKind {
    match content_type {
        Some(value) if value.to_lowercase().contains("html") => ContentKind::Html,
        _ => ContentKind::Other,
    }
}

// Short human-readable reason for a failed request, for the debug log
fn describe_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "request error"
    }
}
