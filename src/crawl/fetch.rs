// src/crawl/fetch.rs
// =============================================================================
// This module downloads a page and pulls the links out of it.
//
// Steps:
// 1. GET the page (non-2xx responses count as failures)
// 2. Decode the raw bytes as Latin-1 (ISO-8859-1)
// 3. Parse the HTML with `scraper`
// 4. Collect every <a href="..."> as an absolute URL
//
// About the Latin-1 decoding:
// - We ignore whatever charset the server declares
// - Every byte maps to exactly one character, so decoding can never fail
// - Non-ASCII text in UTF-8 pages comes out garbled, but URLs are almost
//   always ASCII, and URLs are the only thing we read from the page
// =============================================================================

use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Reasons a page could not be turned into a Document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// A fetched page, reduced to what the crawler needs: its outbound links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub url: String,
    pub links: Vec<String>,
}

impl Document {
    // Parses HTML and extracts all anchors, resolved against the page URL
    //
    // Links keep document order. Duplicates are kept too; the visited set
    // takes care of them later.
    pub fn parse(html: &str, page_url: &Url) -> Self {
        let document = Html::parse_document(html);

        // Constant selector, known to be valid. Anchors without an href
        // (<a name="top">) carry no link and are skipped here on purpose.
        let selector = Selector::parse("a[href]").unwrap();

        let links = document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_url(page_url, href))
            .collect();

        Self {
            url: page_url.to_string(),
            links,
        }
    }
}

// Downloads and parses a single page
pub async fn fetch(client: &Client, url: &str) -> Result<Document, FetchError> {
    let page_url = Url::parse(url)?;

    let response = client.get(page_url.clone()).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let bytes = response.bytes().await?;
    let html = decode_latin1(&bytes);

    Ok(Document::parse(&html, &page_url))
}

// Decodes ISO-8859-1: byte N is Unicode code point U+00NN
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// Resolves an href against the page it was found on
//
// Examples:
//   base = "http://example.test/docs/"
//   href = "notes.pdf"          -> Some("http://example.test/docs/notes.pdf")
//   href = " /about "           -> Some("http://example.test/about")
//   href = "http://other.test"  -> Some("http://other.test/")
//   href = "http://[broken"     -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(|url| url.to_string())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `b as char`?
//    - A u8 cast to char gives the code point with the same number
//    - Latin-1 was designed so that byte values ARE Unicode code points 0-255
//    - So this is a complete, correct Latin-1 decoder in one line
//
// 2. What does #[from] do in the error enum?
//    - thiserror generates `impl From<reqwest::Error> for FetchError`
//    - That is what lets us write `?` after a reqwest call
//
// 3. Why base.join() for absolute links too?
//    - join() with an absolute URL just returns that URL
//    - So one call handles both relative and absolute hrefs
// -----------------------------------------------------------------------------
