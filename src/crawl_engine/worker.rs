//! The worker loop: pull from the frontier, fetch, scrape, feed the
//! frontier and the aggregate.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::time::sleep;

use super::crawl_types::CrawlResult;
use super::frontier::Frontier;
use crate::config::CrawlConfig;
use crate::fetch::Fetcher;
use crate::scrape::scrape;
use crate::stats::GlobalStats;
use crate::stats::tokenize::Lexicon;

/// One of N parallel crawl workers. The frontier and the aggregate are
/// shared; everything else is per-worker.
pub struct Worker<F: Fetcher> {
    id: usize,
    config: Arc<CrawlConfig>,
    frontier: Arc<Frontier>,
    stats: Arc<GlobalStats>,
    fetcher: Arc<F>,
    lexicon: Arc<Lexicon>,
}

impl<F: Fetcher> Worker<F> {
    pub fn new(
        id: usize,
        config: Arc<CrawlConfig>,
        frontier: Arc<Frontier>,
        stats: Arc<GlobalStats>,
        fetcher: Arc<F>,
        lexicon: Arc<Lexicon>,
    ) -> Self {
        Self {
            id,
            config,
            frontier,
            stats,
            fetcher,
            lexicon,
        }
    }

    /// Run until the frontier reports empty. An error here kills this
    /// worker only; the crawler observes it at join time.
    pub async fn run(self) -> CrawlResult<()> {
        info!(target: "campus_crawler::worker", "starting worker {}", self.id);
        let delay = self.config.delay();

        loop {
            let Some(url) = self.frontier.get_tbd_url().await else {
                if self.frontier.empty().await {
                    info!(
                        target: "campus_crawler::worker",
                        "frontier is empty, stopping worker {}", self.id
                    );
                    break;
                }
                // throttled, not exhausted: no URL is politeness-eligible
                info!(
                    target: "campus_crawler::worker",
                    "respecting politeness delay since there are no free links to download, idling"
                );
                sleep(delay).await;
                continue;
            };

            info!(target: "campus_crawler::worker", "fetching {url}");
            let resp = match self.fetcher.download(&url).await {
                Ok(resp) => resp,
                Err(err) => {
                    let backoff = delay + Duration::from_secs_f64(rand::random::<f64>());
                    warn!(
                        target: "campus_crawler::worker",
                        "fetch failed for {url}: {err}; backing off {backoff:?}"
                    );
                    sleep(backoff).await;
                    continue;
                }
            };

            let scraped_urls = scrape(&url, &resp, &self.stats, &self.lexicon).await?;
            for scraped_url in &scraped_urls {
                self.frontier.add_url(scraped_url).await?;
            }

            self.frontier.mark_url_complete(&url).await?;

            // bounds the worker wake rate on top of the per-authority gate
            sleep(delay).await;
        }

        info!(target: "campus_crawler::worker", "worker {} shutting down", self.id);
        Ok(())
    }
}
