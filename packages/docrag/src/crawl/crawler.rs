//! Breadth-first documentation crawler.

use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::crawl::fetcher::Fetcher;
use crate::crawl::filter::should_follow;
use crate::error::CrawlError;
use crate::extract;
use crate::types::{CrawlConfig, CrawlReport, Document, SkipReason, SkippedPage};

/// Everything a finished crawl produced.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Documents in discovery order.
    pub documents: Vec<Document>,

    /// Counts and per-page skip causes.
    pub report: CrawlReport,
}

/// Breadth-first crawler bounded by a page budget.
///
/// Visits pages FIFO from a frontier seeded with one URL, extracting
/// content and discovering in-scope links as it goes. A single page
/// failure is never fatal: it is recorded in the report and the crawl
/// moves on.
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    /// Crawl from `seed_url` until the frontier empties or the page
    /// budget is exhausted.
    pub async fn crawl(&self, seed_url: &str) -> Result<CrawlOutcome, CrawlError> {
        let seed = Url::parse(seed_url).map_err(|_| CrawlError::InvalidUrl {
            url: seed_url.to_string(),
        })?;

        let section_pattern = Regex::new(&self.config.section_pattern).map_err(|source| {
            CrawlError::InvalidPattern {
                pattern: self.config.section_pattern.clone(),
                source,
            }
        })?;

        info!(
            seed = %seed,
            max_pages = self.config.max_pages,
            section = %self.config.section_pattern,
            "starting crawl"
        );

        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::new();
        frontier.push_back(seed.to_string());

        let mut documents: Vec<Document> = Vec::new();
        let mut skipped: Vec<SkippedPage> = Vec::new();
        let mut visits = 0usize;

        while let Some(url) = frontier.pop_front() {
            if visits >= self.config.max_pages {
                break;
            }
            if visited.contains(&url) {
                continue;
            }
            visited.insert(url.clone());
            visits += 1;

            debug!(url = %url, visit = visits, queued = frontier.len(), "visiting page");

            match self.fetcher.fetch(&url).await {
                Ok(html) => {
                    self.process_page(
                        &url,
                        &html,
                        &seed,
                        &section_pattern,
                        visits,
                        &visited,
                        &mut frontier,
                        &mut documents,
                        &mut skipped,
                    );
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "fetch failed, skipping page");
                    skipped.push(SkippedPage {
                        url: url.clone(),
                        reason: SkipReason::Fetch {
                            message: e.to_string(),
                        },
                    });
                }
            }

            // Politeness delay after every fetch attempt, success or
            // failure.
            if self.config.politeness_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.politeness_delay_ms)).await;
            }
        }

        let total_characters = documents.iter().map(Document::char_count).sum();
        let report = CrawlReport {
            pages_visited: visits,
            documents: documents.len(),
            total_characters,
            skipped,
        };

        info!(
            pages_visited = report.pages_visited,
            documents = report.documents,
            total_characters = report.total_characters,
            skipped = report.skipped.len(),
            "crawl complete"
        );

        Ok(CrawlOutcome { documents, report })
    }

    /// Extract a fetched page and enqueue its in-scope links.
    #[allow(clippy::too_many_arguments)]
    fn process_page(
        &self,
        url: &str,
        html: &str,
        base: &Url,
        section_pattern: &Regex,
        visits: usize,
        visited: &HashSet<String>,
        frontier: &mut VecDeque<String>,
        documents: &mut Vec<Document>,
        skipped: &mut Vec<SkippedPage>,
    ) {
        let page_url = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => {
                // Frontier entries are resolved URLs, so this only
                // happens for a malformed seed that slipped through.
                warn!(url = %url, "unparseable page URL");
                return;
            }
        };

        let analysis = extract::analyze(html, url, &self.config.title_suffix);

        match analysis.content {
            Ok(content) => {
                debug!(
                    url = %url,
                    title = %content.title,
                    chars = content.text.chars().count(),
                    "page added"
                );
                documents.push(Document::new(content.text, url, content.title, visits));
            }
            Err(reason) => {
                debug!(url = %url, %reason, "page skipped");
                skipped.push(SkippedPage {
                    url: url.to_string(),
                    reason,
                });
            }
        }

        // No point discovering links once the budget is spent.
        if visits >= self.config.max_pages {
            return;
        }

        for href in &analysis.links {
            if frontier.len() >= self.config.max_frontier {
                debug!(cap = self.config.max_frontier, "frontier cap reached");
                break;
            }
            if let Some(resolved) =
                should_follow(href, &page_url, base, section_pattern, visited, frontier)
            {
                debug!(link = %resolved, "link enqueued");
                frontier.push_back(resolved.to_string());
            }
        }
    }
}
