//! Crawl orchestration: build the shared frontier and aggregate, run the
//! worker pool to exhaustion, then emit the deliverables.

use std::sync::Arc;

use log::{error, info};
use tokio::task::JoinSet;

use super::crawl_types::{CrawlError, CrawlResult};
use super::frontier::Frontier;
use super::worker::Worker;
use crate::config::CrawlConfig;
use crate::fetch::Fetcher;
use crate::stats::GlobalStats;
use crate::stats::tokenize::Lexicon;

/// A configured crawl, ready to run.
pub struct Crawler<F: Fetcher> {
    config: Arc<CrawlConfig>,
    frontier: Arc<Frontier>,
    stats: Arc<GlobalStats>,
    fetcher: Arc<F>,
    lexicon: Arc<Lexicon>,
}

impl<F: Fetcher> Crawler<F> {
    /// Construct the frontier (seeded or restored per `restart`) and
    /// open/resume the aggregate.
    pub async fn new(
        config: CrawlConfig,
        restart: bool,
        fetcher: F,
        lexicon: Lexicon,
    ) -> CrawlResult<Self> {
        let frontier = Frontier::open(&config, restart).await?;
        let stats = GlobalStats::open(config.output_dir()).await?;

        Ok(Self {
            config: Arc::new(config),
            frontier: Arc::new(frontier),
            stats: Arc::new(stats),
            fetcher: Arc::new(fetcher),
            lexicon: Arc::new(lexicon),
        })
    }

    /// Run the worker pool until the frontier is exhausted, then mark the
    /// aggregate finished and emit the report. A worker failure kills that
    /// worker only; the remaining workers run to completion, the aggregate
    /// is left resumable, and the failure is returned.
    pub async fn run(self) -> CrawlResult<()> {
        let thread_count = self.config.threads_count();
        info!(target: "campus_crawler::crawler", "creating {thread_count} workers");

        let mut workers = JoinSet::new();
        for worker_id in 0..thread_count {
            let worker = Worker::new(
                worker_id,
                Arc::clone(&self.config),
                Arc::clone(&self.frontier),
                Arc::clone(&self.stats),
                Arc::clone(&self.fetcher),
                Arc::clone(&self.lexicon),
            );
            workers.spawn(worker.run());
        }

        let mut failed = 0usize;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failed += 1;
                    error!(target: "campus_crawler::crawler", "worker failed: {err}");
                }
                Err(err) => {
                    failed += 1;
                    error!(target: "campus_crawler::crawler", "worker panicked: {err}");
                }
            }
        }

        self.frontier.close().await;

        if failed > 0 {
            // leave the aggregate unfinished so the next startup resumes it
            return Err(CrawlError::Other(format!(
                "{failed} worker(s) died before the crawl completed"
            )));
        }

        info!(target: "campus_crawler::crawler", "finished crawl, outputting deliverables");
        self.stats.mark_finished().await?;
        self.stats.output().await?;
        info!(target: "campus_crawler::crawler", "finished program");
        Ok(())
    }

    /// Shared frontier handle.
    #[must_use]
    pub fn frontier(&self) -> &Arc<Frontier> {
        &self.frontier
    }

    /// Shared aggregate handle.
    #[must_use]
    pub fn stats(&self) -> &Arc<GlobalStats> {
        &self.stats
    }
}
