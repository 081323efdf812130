//! The frontier: a concurrency-safe, politeness-aware URL queue with a
//! durable seen-set.
//!
//! All externally visible operations serialize on one mutex, so politeness
//! scheduling is effectively sequential no matter how many workers share
//! the frontier. Deduplication happens in `add_url` against the seen-set,
//! which is written through to SQLite on every insert; an interrupted crawl
//! resumes by re-queueing every entry not yet marked downloaded.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::{debug, info};
use tokio::sync::Mutex;

use super::crawl_types::{CrawlError, CrawlResult};
use super::seen_index::{self, SeenIndex};
use crate::config::CrawlConfig;
use crate::is_testing;
use crate::utils::{authority, fingerprint, normalize};

#[derive(Default)]
struct FrontierState {
    /// Normalized URLs awaiting download; most recently added at the tail.
    queue: Vec<String>,
    /// Authority -> time of last dispatch. `None` means "never dispatched"
    /// (the entry exists so seeds and restored URLs are known authorities).
    last_access: HashMap<String, Option<Instant>>,
    /// In-memory mirror of the seen-set's download flags, keyed by
    /// fingerprint; the durable store also keeps the URL text.
    seen: HashMap<String, bool>,
}

/// The shared URL frontier.
pub struct Frontier {
    state: Mutex<FrontierState>,
    store: Option<SeenIndex>,
    delay: Duration,
    seed_count: usize,
    /// Queue length right after construction; `empty()` uses it to tell a
    /// crawl that has discovered URLs beyond its seeds from one that has
    /// not yet made forward progress.
    initial_url_count: usize,
    testing: bool,
}

impl Frontier {
    /// Build the frontier. With `restart` any existing store files are
    /// deleted and the queue is seeded from the configuration; otherwise an
    /// existing store is reloaded (falling back to seeding when there is
    /// none). With `TESTING=true` all durable I/O is disabled and the
    /// frontier is purely in-memory.
    pub async fn open(config: &CrawlConfig, restart: bool) -> CrawlResult<Self> {
        let testing = is_testing();
        let mut state = FrontierState::default();

        let store = if testing {
            None
        } else {
            if restart {
                seen_index::delete_store_files(config.save_file())?;
            }
            Some(SeenIndex::open(config.save_file()).await?)
        };

        let saved_entries = match (&store, restart) {
            (Some(index), false) => index.scan().await?,
            _ => Vec::new(),
        };

        if !saved_entries.is_empty() {
            for (fp, url, downloaded) in saved_entries {
                if !downloaded {
                    state.queue.push(url.clone());
                }
                state.last_access.insert(authority(&url), None);
                state.seen.insert(fp, downloaded);
            }
            info!(
                target: "campus_crawler::frontier",
                "starting from save in {}; {} URLs restored to the frontier",
                config.save_file().display(),
                state.queue.len()
            );
        } else {
            info!(
                target: "campus_crawler::frontier",
                "starting from seed: {:?}", config.seed_urls()
            );
            for url in config.seed_urls() {
                add_url_inner(&mut state, store.as_ref(), url).await?;
                state.last_access.insert(authority(url), None);
            }
        }

        let initial_url_count = state.queue.len();
        Ok(Self {
            state: Mutex::new(state),
            store,
            delay: config.delay(),
            seed_count: config.seed_urls().len(),
            initial_url_count,
            testing,
        })
    }

    /// Add a URL to the frontier. Idempotent: a URL whose fingerprint is
    /// already in the seen-set is silently dropped — this is the primary
    /// deduplication point of the whole crawler.
    pub async fn add_url(&self, url: &str) -> CrawlResult<()> {
        let mut state = self.state.lock().await;
        add_url_inner(&mut state, self.store.as_ref(), url).await?;
        Ok(())
    }

    /// Dispatch the next politeness-eligible URL, scanning from the most
    /// recently added entry toward the head.
    ///
    /// `None` does not mean the frontier is empty — it means no queued URL's
    /// authority is currently accessible. Callers distinguish the two via
    /// [`empty`](Self::empty).
    pub async fn get_tbd_url(&self) -> Option<String> {
        let mut state = self.state.lock().await;

        for index in (0..state.queue.len()).rev() {
            let candidate_authority = authority(&state.queue[index]);
            if self.can_access(&state, &candidate_authority) {
                state.last_access.insert(candidate_authority, Some(Instant::now()));
                return Some(state.queue.remove(index));
            }
        }
        None
    }

    /// Record that a dispatched URL was successfully retrieved and
    /// processed. Completing a URL that was never added, or completing one
    /// twice, is a scheduling bug and fails hard.
    pub async fn mark_url_complete(&self, url: &str) -> CrawlResult<()> {
        let fp = fingerprint(url);
        let mut state = self.state.lock().await;

        match state.seen.get_mut(&fp) {
            None => Err(CrawlError::Frontier(format!(
                "marking {url} complete, but it was never added to the frontier"
            ))),
            Some(true) => Err(CrawlError::Frontier(format!(
                "marking {url} complete, but it was already downloaded"
            ))),
            Some(downloaded) => {
                *downloaded = true;
                if let Some(store) = &self.store {
                    store.set_downloaded(&fp).await?;
                }
                Ok(())
            }
        }
    }

    /// Whether the crawl is finished from this frontier's point of view.
    ///
    /// Outside of testing the queue being empty is not enough: at least one
    /// non-seed URL must have been known at construction, otherwise a seed
    /// page that yields no admissible links would terminate the crawl
    /// before the workers had a chance to poll.
    pub async fn empty(&self) -> bool {
        let state = self.state.lock().await;
        if self.testing {
            state.queue.is_empty()
        } else {
            state.queue.is_empty() && self.initial_url_count > self.seed_count
        }
    }

    /// Whether a fingerprint has ever been added.
    pub async fn url_seen(&self, fp: &str) -> CrawlResult<bool> {
        match &self.store {
            Some(store) => Ok(store.contains(fp).await?),
            None => Ok(self.state.lock().await.seen.contains_key(fp)),
        }
    }

    /// Whether a fingerprint's page was successfully downloaded.
    pub async fn url_downloaded(&self, fp: &str) -> CrawlResult<bool> {
        match &self.store {
            Some(store) => Ok(store.is_downloaded(fp).await?),
            None => Ok(self
                .state
                .lock()
                .await
                .seen
                .get(fp)
                .copied()
                .unwrap_or(false)),
        }
    }

    /// Number of URLs currently queued.
    pub async fn len(&self) -> usize {
        self.state.lock().await.queue.len()
    }

    /// Close the durable store, flushing outstanding writes.
    pub async fn close(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }

    fn can_access(&self, state: &FrontierState, candidate_authority: &str) -> bool {
        match state.last_access.get(candidate_authority) {
            None | Some(None) => true,
            Some(Some(last)) => last.elapsed() > self.delay,
        }
    }
}

async fn add_url_inner(
    state: &mut FrontierState,
    store: Option<&SeenIndex>,
    url: &str,
) -> CrawlResult<bool> {
    let url = normalize(url);
    let fp = fingerprint(url);

    if state.seen.contains_key(&fp) {
        debug!(target: "campus_crawler::frontier", "duplicate URL dropped: {url}");
        return Ok(false);
    }

    if let Some(store) = store {
        store.insert_new(&fp, url).await?;
    }
    state.seen.insert(fp, false);
    state.queue.push(url.to_string());
    Ok(true)
}
