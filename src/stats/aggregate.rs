//! Durable crawl-wide statistics.
//!
//! Workers pipe their per-page [`StatsRecord`]s into one `GlobalStats`,
//! which persists the merged state as a JSON document under the output
//! directory on every update. A crawl that stops early leaves the document
//! with `finished: false`; the next startup finds and resumes it. Only a
//! normal termination marks it finished and emits the report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::StatsRecord;
use crate::is_testing;

const STORE_PREFIX: &str = "deliverables-";
const DUMP_SUFFIX: &str = "-dump.json";

/// How many of the most common words the report lists.
const TOP_WORD_COUNT: usize = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AggregateState {
    #[serde(flatten)]
    record: StatsRecord,
    finished: bool,
}

/// The crawl-wide aggregate shared by all workers.
///
/// All merging happens under one mutex; the durable document is written
/// through inside the critical section, so the file on disk never lags the
/// in-memory state. With `TESTING=true` the aggregate is purely in-memory
/// and never touches the filesystem.
pub struct GlobalStats {
    inner: Mutex<AggregateState>,
    /// `{output_dir}/deliverables-{MM-DD-HH-MM-SS}`; the store lives at
    /// `{base}.json`, the report at `{base}.txt`, the dump at
    /// `{base}-dump.json`. `None` in testing mode.
    base_path: Option<PathBuf>,
}

impl GlobalStats {
    /// Open the aggregate for a crawl. If an unfinished aggregate document
    /// exists under `output_dir` it is resumed; otherwise a fresh
    /// timestamped one is created.
    pub async fn open(output_dir: &Path) -> Result<Self> {
        if is_testing() {
            return Ok(Self {
                inner: Mutex::new(AggregateState::default()),
                base_path: None,
            });
        }

        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("failed to create {}", output_dir.display()))?;

        if let Some((base_path, state)) = find_unfinished(output_dir).await? {
            info!(
                target: "campus_crawler::stats",
                "resuming unfinished aggregate {}", base_path.display()
            );
            return Ok(Self {
                inner: Mutex::new(state),
                base_path: Some(base_path),
            });
        }

        let stamp = chrono::Local::now().format("%m-%d-%H-%M-%S");
        let base_path = output_dir.join(format!("{STORE_PREFIX}{stamp}"));
        let stats = Self {
            inner: Mutex::new(AggregateState::default()),
            base_path: Some(base_path),
        };
        {
            let state = stats.inner.lock().await;
            stats.persist(&state).await?;
        }
        Ok(stats)
    }

    /// Merge one page's record into the aggregate and write it through.
    pub async fn update(&self, record: &StatsRecord) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.record.merge(record);
        self.persist(&state).await
    }

    /// Mark the crawl as complete. Set only at normal termination; an
    /// aggregate without this flag is resumed by the next startup.
    pub async fn mark_finished(&self) -> Result<()> {
        let mut state = self.inner.lock().await;
        state.finished = true;
        self.persist(&state).await
    }

    /// Read-only copy of the accumulated record.
    pub async fn get_raw(&self) -> StatsRecord {
        self.inner.lock().await.record.clone()
    }

    pub async fn is_finished(&self) -> bool {
        self.inner.lock().await.finished
    }

    /// Write the human-readable report and the JSON dump next to the store.
    /// In testing mode the report goes to the log instead.
    pub async fn output(&self) -> Result<()> {
        let record = self.get_raw().await;
        let report = render_report(&record);

        let Some(base) = &self.base_path else {
            info!(target: "campus_crawler::stats", "crawl report:\n{report}");
            return Ok(());
        };

        let report_path = base.with_extension("txt");
        tokio::fs::write(&report_path, &report)
            .await
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        info!(
            target: "campus_crawler::stats",
            "wrote crawl report to {}", report_path.display()
        );

        let dump_path = dump_path(base);
        let dump = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&dump_path, dump)
            .await
            .with_context(|| format!("failed to write dump {}", dump_path.display()))?;
        info!(
            target: "campus_crawler::stats",
            "wrote JSON dump to {}", dump_path.display()
        );

        Ok(())
    }

    /// Path of the durable JSON store, if this aggregate is durable.
    #[must_use]
    pub fn store_path(&self) -> Option<PathBuf> {
        self.base_path.as_ref().map(|base| base.with_extension("json"))
    }

    async fn persist(&self, state: &AggregateState) -> Result<()> {
        let Some(base) = &self.base_path else {
            return Ok(());
        };
        let path = base.with_extension("json");
        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("failed to write aggregate {}", path.display()))?;
        Ok(())
    }
}

fn dump_path(base: &Path) -> PathBuf {
    let mut name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(DUMP_SUFFIX);
    base.with_file_name(name)
}

/// Scan `output_dir` for aggregate documents and return the first (in
/// filename order) that is not marked finished, together with its base
/// path.
async fn find_unfinished(output_dir: &Path) -> Result<Option<(PathBuf, AggregateState)>> {
    let mut candidates = Vec::new();
    let mut entries = tokio::fs::read_dir(output_dir)
        .await
        .with_context(|| format!("failed to read {}", output_dir.display()))?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with(STORE_PREFIX)
            && name.ends_with(".json")
            && !name.ends_with(DUMP_SUFFIX)
            && entry.file_type().await?.is_file()
        {
            candidates.push(entry.path());
        }
    }
    candidates.sort();

    for path in candidates {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read aggregate {}", path.display()))?;
        let state: AggregateState = serde_json::from_slice(&bytes)
            .with_context(|| format!("malformed aggregate {}", path.display()))?;
        if !state.finished {
            return Ok(Some((path.with_extension(""), state)));
        }
    }
    Ok(None)
}

/// Render the four-deliverable crawl report.
#[must_use]
pub fn render_report(record: &StatsRecord) -> String {
    use std::fmt::Write;

    let mut out = String::new();

    let unique_pages = record.url_word_counts.len();
    let _ = writeln!(out, "--- DELIVERABLE 1: NUMBER OF UNIQUE PAGES ---");
    let _ = writeln!(out, "UNIQUE PAGES (DOWNLOADED): {unique_pages}");
    let _ = writeln!(out, "UNIQUE URLS (SEEN): {}", record.urls_seen_on_page);
    let _ = writeln!(out);

    // highest count wins; ties break to the lexicographically first URL
    let longest = record
        .url_word_counts
        .iter()
        .max_by(|(url_a, count_a), (url_b, count_b)| {
            count_a.cmp(count_b).then(url_b.cmp(url_a))
        });
    let (longest_url, longest_len) = match longest {
        Some((url, len)) => (url.as_str(), *len),
        None => ("-", 0),
    };
    let _ = writeln!(out, "--- DELIVERABLE 2: LONGEST PAGE IN WORDS ---");
    let _ = writeln!(out, "PAGE: {longest_url}");
    let _ = writeln!(out, "PAGE LENGTH: {longest_len}");
    let _ = writeln!(out);

    let _ = writeln!(out, "--- DELIVERABLE 3: MOST COMMON WORDS ---");
    for (word, freq) in top_words(record, TOP_WORD_COUNT) {
        let _ = writeln!(out, "{word}\t{freq}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "--- DELIVERABLE 4: SUBDOMAINS COUNT ---");
    let _ = writeln!(out, "Raw subdomain count: {}", record.subdomains.len());
    let _ = writeln!(out);
    let _ = writeln!(out, "Subdomain counts (alphabetically):");
    for (subdomain, count) in &record.subdomains {
        let _ = writeln!(out, "{subdomain}\t{count}");
    }

    out
}

/// The `limit` most common words, frequency descending and then
/// alphabetical.
#[must_use]
pub fn top_words(record: &StatsRecord, limit: usize) -> Vec<(&str, u64)> {
    let mut words: Vec<(&str, u64)> = record
        .words
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();
    words.sort_by(|(word_a, count_a), (word_b, count_b)| {
        count_b.cmp(count_a).then(word_a.cmp(word_b))
    });
    words.truncate(limit);
    words
}
