//! A polite, multi-worker web crawler scoped to a set of allowlisted
//! academic domains.
//!
//! Seed URLs come from configuration; pages are fetched through an
//! external cache server, outbound links pass an admissibility filter
//! before entering the frontier, per-authority politeness delays gate every
//! dispatch, and discovery/download state is durable across restarts. The
//! observable output is a report over all successfully fetched pages:
//! unique URLs, the longest page by word count, the 50 most common
//! dictionary words, and per-subdomain page counts.

pub mod config;
pub mod crawl_engine;
pub mod fetch;
pub mod scrape;
pub mod stats;
pub mod utils;

pub use config::CrawlConfig;
pub use crawl_engine::{CrawlError, CrawlResult, Crawler, Frontier, Worker};
pub use fetch::{CacheFetcher, Fetcher, Response};
pub use scrape::{extract_next_links, is_valid, scrape};
pub use stats::tokenize::{Lexicon, tokenize};
pub use stats::{GlobalStats, StatsRecord, process_page};

/// Whether the `TESTING=true` override is active. It disables all durable
/// I/O: the frontier and the aggregate run purely in memory and create no
/// files of any kind.
#[must_use]
pub fn is_testing() -> bool {
    std::env::var("TESTING").is_ok_and(|value| value == "true")
}

/// Run a full crawl with the production fetcher: load the lexicon, build
/// the crawler, run the workers to frontier exhaustion, and emit the
/// report.
pub async fn crawl(config: CrawlConfig, restart: bool) -> CrawlResult<()> {
    let lexicon = Lexicon::load(config.stopwords_file(), config.dictionary_file())?;
    let fetcher = CacheFetcher::new(&config)?;
    let crawler = Crawler::new(config, restart, fetcher, lexicon).await?;
    crawler.run().await
}
