// src/crawl/classify.rs
// =============================================================================
// This module decides what to do with each link found on a page.
//
// The rules, checked in order (first one wins):
// 1. Already visited                      -> Ignore
// 2. Wrong host or "garbage" URL           -> Rejected (counted, marked visited)
// 3. Mentions a keyword AND ends up a .pdf -> Match (recorded as a document)
// 4. Anything else                         -> Candidate (might be a page to crawl)
//
// "Garbage" means the link contains '?', '#', "mailto" or ".php". Query
// strings and fragments usually point at the same page again, and .php pages
// on the sites this was built for are calendars and search forms.
//
// All comparisons happen on a lowercase copy of the link. The original link
// is what gets recorded or enqueued.
//
// classify() is a pure function: it only reads its context. The crawl driver
// is the one that marks links visited and bumps the counters.
// =============================================================================

use std::collections::HashSet;

/// Substrings that make a link uninteresting no matter where it points
const GARBAGE_MARKERS: [&str; 4] = ["?", "#", "mailto", ".php"];

/// Extension of the documents we are hunting for
const DOCUMENT_EXTENSION: &str = ".pdf";

/// Everything classify() needs to look at, borrowed from the driver
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub host: &'a str,
    pub keyword1: &'a str,
    pub keyword2: &'a str,
    pub visited: &'a HashSet<String>,
}

/// Outcome of classifying a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Already processed; do nothing at all
    Ignore,
    /// Off-host or garbage; mark visited and count it, never enqueue
    Rejected,
    /// A matching document; record it
    Match,
    /// Possibly a crawlable page; probe it before enqueueing
    Candidate,
}

pub fn classify(link: &str, ctx: &LinkContext<'_>) -> Verdict {
    if ctx.visited.contains(link) {
        return Verdict::Ignore;
    }

    let lower = link.to_lowercase();

    if !lower.contains(ctx.host) || is_garbage(&lower) {
        return Verdict::Rejected;
    }

    let has_keyword = lower.contains(ctx.keyword1) || lower.contains(ctx.keyword2);
    if has_keyword && lower.contains(DOCUMENT_EXTENSION) {
        return Verdict::Match;
    }

    Verdict::Candidate
}

fn is_garbage(lower: &str) -> bool {
    GARBAGE_MARKERS.iter().any(|marker| lower.contains(marker))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the 'a in LinkContext<'a>?
//    - A lifetime parameter: the context only borrows its fields
//    - The driver owns the host, keywords and visited set
//    - The compiler checks the context never outlives those owners
//
// 2. Why return an enum instead of a bool?
//    - There are four different outcomes, each with different side effects
//    - A match on Verdict forces the caller to handle every one of them
//
// 3. Why is the host check a substring check and not a real URL comparison?
//    - It is deliberately loose: "http://purdue.edu" lets through
//      "http://www.math.purdue.edu/..." because the string contains "purdue.edu"
// -----------------------------------------------------------------------------
