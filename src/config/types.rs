//! Core configuration types for the crawler.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration for a crawl.
///
/// Loadable from a JSON file; every field has a default so partial files
/// work. Validation (worker count, delay range) happens in the builder and
/// in [`CrawlConfig::from_file`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Starting URLs; they define the initial frontier on a restart.
    pub(crate) seed_urls: Vec<String>,
    /// Number of parallel workers. At least 1.
    pub(crate) threads_count: usize,
    /// Minimum interval in seconds between two dispatches to the same
    /// authority. Also the worker idle/backoff unit.
    pub(crate) time_delay: f64,
    /// Path prefix for the durable seen-set store.
    pub(crate) save_file: PathBuf,
    /// Cache server the fetcher routes through; opaque to the engine.
    /// Empty means direct fetching.
    pub(crate) cache_server: String,
    /// Directory for aggregate stores, reports and dumps.
    pub(crate) output_dir: PathBuf,
    /// Whitespace-separated stopword list.
    pub(crate) stopwords_file: PathBuf,
    /// Whitespace-separated English dictionary.
    pub(crate) dictionary_file: PathBuf,
    /// User agent sent with every request.
    pub(crate) user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_urls: vec![
                "https://www.ics.uci.edu".to_string(),
                "https://www.cs.uci.edu".to_string(),
                "https://www.informatics.uci.edu".to_string(),
                "https://www.stat.uci.edu".to_string(),
            ],
            threads_count: 4,
            time_delay: 0.5,
            save_file: PathBuf::from("frontier"),
            cache_server: String::new(),
            output_dir: PathBuf::from("Output"),
            stopwords_file: PathBuf::from("stopwords.txt"),
            dictionary_file: PathBuf::from("dictionary.txt"),
            user_agent: concat!("campus-crawler/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlConfig {
    /// Load a configuration from a JSON file. Missing keys fall back to
    /// defaults; the result is validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("malformed config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.threads_count >= 1, "threads_count must be at least 1");
        anyhow::ensure!(
            self.time_delay >= 0.0 && self.time_delay.is_finite(),
            "time_delay must be a non-negative number of seconds"
        );
        Ok(())
    }

    #[must_use]
    pub fn seed_urls(&self) -> &[String] {
        &self.seed_urls
    }

    #[must_use]
    pub fn threads_count(&self) -> usize {
        self.threads_count
    }

    /// The politeness delay in seconds, as configured.
    #[must_use]
    pub fn time_delay(&self) -> f64 {
        self.time_delay
    }

    /// The politeness delay as a `Duration`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_secs_f64(self.time_delay)
    }

    #[must_use]
    pub fn save_file(&self) -> &Path {
        &self.save_file
    }

    #[must_use]
    pub fn cache_server(&self) -> &str {
        &self.cache_server
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn stopwords_file(&self) -> &Path {
        &self.stopwords_file
    }

    #[must_use]
    pub fn dictionary_file(&self) -> &Path {
        &self.dictionary_file
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
