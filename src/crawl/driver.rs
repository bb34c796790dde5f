// src/crawl/driver.rs
// =============================================================================
// This module runs the crawl loop.
//
// How it works:
// 1. Start with only the root URL in the frontier
// 2. Stop if the page limit has been passed, or if there is nothing left
// 3. Pop the next URL, count it, fetch and parse it
// 4. Classify every link on the page:
//    - Rejected  -> mark visited, count it
//    - Match     -> record it in the sink
//    - Candidate -> HEAD probe; HTML pages go into the frontier
// 5. Go back to step 2
//
// Nothing in here returns an error once the crawl has started. Pages that
// fail to download are logged and skipped; links that fail to probe are
// dropped. The crawl always ends with a CrawlSummary.
//
// Limit semantics: the check is `visited_count > limit`, so a limit of L
// fetches L + 1 pages. A limit of 0 still fetches the root page.
// =============================================================================

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::classify::{classify, LinkContext, Verdict};
use super::fetch::{fetch, Document};
use super::frontier::{Frontier, FrontierError};
use super::probe::{probe, ContentKind};
use super::sink::MatchSink;
use crate::config::CrawlConfig;

/// Maximum number of redirects followed by probes and page downloads
const MAX_REDIRECTS: usize = 5;

/// Errors that can happen while setting up a crawl
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Counters kept while crawling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    /// Pages popped from the frontier and fetched
    pub visited_count: usize,
    /// Links rejected by the host/garbage filter plus links enqueued
    pub total_links_seen: usize,
    /// Links recorded as matching documents
    pub found_count: usize,
}

/// Why the crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// Every reachable page was visited
    EmptyFrontier,
    /// The page limit was passed with work still pending
    LimitReached,
}

/// Final result of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CrawlSummary {
    pub outcome: CrawlOutcome,
    #[serde(flatten)]
    pub stats: CrawlStats,
}

// Builds the HTTP client shared by the prober and the fetcher
pub fn build_client(config: &CrawlConfig) -> Result<Client, CrawlError> {
    let client = Client::builder()
        .timeout(config.timeout())
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// One crawl over one site
///
/// The frontier, the visited set and the counters all live here, so two
/// crawlers never share state. `run` consumes the crawler: once it has
/// stopped it cannot be resumed.
pub struct Crawler<S: MatchSink> {
    config: CrawlConfig,
    client: Client,
    frontier: Frontier,
    stats: CrawlStats,
    sink: S,
}

impl<S: MatchSink> Crawler<S> {
    pub fn new(config: CrawlConfig, sink: S) -> Result<Self, CrawlError> {
        let client = build_client(&config)?;
        Ok(Self::with_client(config, client, sink))
    }

    pub fn with_client(config: CrawlConfig, client: Client, sink: S) -> Self {
        let frontier = Frontier::new(config.root(), config.order());
        Self {
            config,
            client,
            frontier,
            stats: CrawlStats::default(),
            sink,
        }
    }

    pub async fn run(mut self) -> CrawlSummary {
        info!(
            root = self.config.root(),
            host = self.config.host(),
            limit = ?self.config.limit(),
            order = ?self.config.order(),
            "starting crawl"
        );

        let outcome = loop {
            if self.limit_exceeded() {
                if !self.frontier.is_empty() {
                    debug!(pending = self.frontier.len(), "abandoning pending pages");
                }
                break CrawlOutcome::LimitReached;
            }

            let url = match self.frontier.pop() {
                Ok(url) => url,
                Err(FrontierError::Empty) => break CrawlOutcome::EmptyFrontier,
            };

            self.stats.visited_count += 1;
            println!(
                "Parsing ( {} / {} ) : {}",
                self.stats.visited_count, self.stats.total_links_seen, url
            );

            match fetch(&self.client, &url).await {
                Ok(document) => self.process(document).await,
                Err(e) => warn!(url = %url, error = %e, "dropping page"),
            }
        };

        let summary = CrawlSummary {
            outcome,
            stats: self.stats,
        };
        info!(
            ?outcome,
            visited = summary.stats.visited_count,
            found = summary.stats.found_count,
            "crawl finished"
        );
        summary
    }

    fn limit_exceeded(&self) -> bool {
        matches!(self.config.limit(), Some(limit) if self.stats.visited_count > limit)
    }

    async fn process(&mut self, document: Document) {
        debug!(url = %document.url, links = document.links.len(), "parsed page");
        for link in &document.links {
            self.evaluate(link).await;
        }
    }

    // Applies the classifier's verdict for one link
    async fn evaluate(&mut self, link: &str) {
        let verdict = {
            let ctx = LinkContext {
                host: self.config.host(),
                keyword1: self.config.keyword1(),
                keyword2: self.config.keyword2(),
                visited: self.frontier.visited(),
            };
            classify(link, &ctx)
        };
        debug!(link, ?verdict, "classified");

        match verdict {
            Verdict::Ignore => {}
            Verdict::Rejected => {
                self.frontier.mark_visited(link);
                self.stats.total_links_seen += 1;
            }
            Verdict::Match => {
                // Marked visited so the same document reached from another
                // page is not recorded twice
                self.frontier.mark_visited(link);
                self.stats.found_count += 1;
                if let Err(e) = self.sink.record(link) {
                    warn!(link, error = %e, "failed to record match");
                }
            }
            Verdict::Candidate => {
                // No point probing a page we are not allowed to visit
                if !self.limit_exceeded()
                    && probe(&self.client, link).await == ContentKind::Html
                    && self.frontier.push(link)
                {
                    self.stats.total_links_seen += 1;
                }
                self.frontier.mark_visited(link);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::TraversalOrder;
    use mockito::{Mock, Server, ServerGuard};

    // A fake website on a local mockito server
    //
    // Mocks are kept alive in `mocks` for as long as the site exists.
    struct Site {
        server: ServerGuard,
        mocks: Vec<Mock>,
    }

    impl Site {
        async fn new() -> Self {
            Self {
                server: Server::new_async().await,
                mocks: Vec::new(),
            }
        }

        fn url(&self) -> String {
            self.server.url()
        }

        async fn head(&mut self, path: &str, content_type: &str) {
            let mock = self
                .server
                .mock("HEAD", path)
                .with_status(200)
                .with_header("content-type", content_type)
                .create_async()
                .await;
            self.mocks.push(mock);
        }

        // An HTML page answering both HEAD and GET; returns the GET mock
        async fn page(&mut self, path: &str, links: &[&str]) -> Mock {
            self.head(path, "text/html").await;
            self.server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "text/html")
                .with_body(html(links))
                .create_async()
                .await
        }

        // Like page(), but the test asserts the GET is never made
        async fn unvisited_page(&mut self, path: &str) -> Mock {
            self.head(path, "text/html").await;
            self.server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "text/html")
                .with_body(html(&[]))
                .expect(0)
                .create_async()
                .await
        }
    }

    fn html(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a>"#, href))
            .collect();
        format!("<html><body>{}</body></html>", anchors)
    }

    fn config(root: &str, limit: Option<usize>) -> CrawlConfig {
        CrawlConfig::new(root, "foo", "bar", limit).unwrap()
    }

    #[tokio::test]
    async fn test_limit_zero_fetches_only_root() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site
            .page(
                "/",
                &[
                    "/a.pdf?x=1",
                    "http://other.test/doc.pdf",
                    "/foo-notes.pdf",
                    "/page2",
                ],
            )
            .await;
        let page2 = site.unvisited_page("/page2").await;

        let mut matches: Vec<String> = Vec::new();
        let summary = Crawler::new(config(&root, Some(0)), &mut matches)
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::LimitReached);
        assert_eq!(summary.stats.visited_count, 1);
        assert_eq!(summary.stats.found_count, 1);
        // The two rejected links; page2 was never enqueued
        assert_eq!(summary.stats.total_links_seen, 2);
        assert_eq!(matches, vec![format!("{}/foo-notes.pdf", root)]);
        page2.assert_async().await;
    }

    #[tokio::test]
    async fn test_full_crawl_until_frontier_is_empty() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site
            .page(
                "/",
                &["/page2", "/big.zip", "/bar/slides.pdf", "http://other.test/x"],
            )
            .await;
        let page2 = site
            .page("/page2", &["/page2", "/FOO.pdf", "/bar/slides.pdf"])
            .await;
        site.head("/big.zip", "application/zip").await;
        let zip = site
            .server
            .mock("GET", "/big.zip")
            .expect(0)
            .create_async()
            .await;

        let mut matches: Vec<String> = Vec::new();
        let summary = Crawler::new(config(&root, None), &mut matches)
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::EmptyFrontier);
        assert_eq!(summary.stats.visited_count, 2);
        // slides.pdf is linked twice but recorded once
        assert_eq!(summary.stats.found_count, 2);
        // other.test rejected + page2 enqueued
        assert_eq!(summary.stats.total_links_seen, 2);
        assert_eq!(
            matches,
            vec![format!("{}/bar/slides.pdf", root), format!("{}/FOO.pdf", root)]
        );
        page2.assert_async().await;
        zip.assert_async().await;
    }

    #[tokio::test]
    async fn test_repeated_links_are_evaluated_once() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site
            .page(
                "/",
                &[
                    "http://other.test/x",
                    "/big.zip",
                    "http://other.test/x",
                    "/big.zip",
                ],
            )
            .await;
        let zip_head = site
            .server
            .mock("HEAD", "/big.zip")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .expect(1)
            .create_async()
            .await;

        let summary = Crawler::new(config(&root, None), Vec::new())
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::EmptyFrontier);
        assert_eq!(summary.stats.visited_count, 1);
        // The off-host link is counted once; the zip is never counted
        assert_eq!(summary.stats.total_links_seen, 1);
        zip_head.assert_async().await;
    }

    #[tokio::test]
    async fn test_limit_fetches_one_extra_page() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site.page("/", &["/p1"]).await;
        let p1 = site.page("/p1", &["/p2"]).await;
        let p2 = site.unvisited_page("/p2").await;

        let summary = Crawler::new(config(&root, Some(1)), Vec::new())
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::LimitReached);
        assert_eq!(summary.stats.visited_count, 2);
        p1.assert_async().await;
        p2.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site.page("/", &["/broken", "/ok"]).await;
        site.head("/broken", "text/html").await;
        let _broken = site
            .server
            .mock("GET", "/broken")
            .with_status(500)
            .create_async()
            .await;
        let _ok = site.page("/ok", &["/notes/bar-week1.pdf"]).await;

        let mut matches: Vec<String> = Vec::new();
        let summary = Crawler::new(config(&root, None), &mut matches)
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::EmptyFrontier);
        assert_eq!(summary.stats.visited_count, 3);
        assert_eq!(summary.stats.found_count, 1);
        assert_eq!(matches, vec![format!("{}/notes/bar-week1.pdf", root)]);
    }

    #[tokio::test]
    async fn test_unreachable_root_ends_cleanly() {
        let summary = Crawler::new(config("http://127.0.0.1:9", None), Vec::new())
            .unwrap()
            .run()
            .await;

        assert_eq!(summary.outcome, CrawlOutcome::EmptyFrontier);
        assert_eq!(summary.stats.visited_count, 1);
        assert_eq!(summary.stats.found_count, 0);
    }

    #[tokio::test]
    async fn test_depth_first_visits_newest_link_first() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site.page("/", &["/a", "/b"]).await;
        let a = site.unvisited_page("/a").await;
        let b = site.page("/b", &[]).await;

        Crawler::new(config(&root, Some(1)), Vec::new())
            .unwrap()
            .run()
            .await;

        a.assert_async().await;
        b.assert_async().await;
    }

    #[tokio::test]
    async fn test_breadth_first_visits_oldest_link_first() {
        let mut site = Site::new().await;
        let root = site.url();
        let _root = site.page("/", &["/a", "/b"]).await;
        let a = site.page("/a", &[]).await;
        let b = site.unvisited_page("/b").await;

        let config = config(&root, Some(1)).with_order(TraversalOrder::BreadthFirst);
        Crawler::new(config, Vec::new()).unwrap().run().await;

        a.assert_async().await;
        b.assert_async().await;
    }

    #[test]
    fn test_summary_json() {
        let summary = CrawlSummary {
            outcome: CrawlOutcome::LimitReached,
            stats: CrawlStats {
                visited_count: 3,
                total_links_seen: 10,
                found_count: 2,
            },
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outcome": "limit_reached",
                "visited_count": 3,
                "total_links_seen": 10,
                "found_count": 2,
            })
        );
    }
}
