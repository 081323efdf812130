//! Fluent builder for `CrawlConfig`.
//!
//! Every field has a default, so the builder is only about overriding;
//! `build()` runs the same validation as file loading.

use std::path::PathBuf;

use anyhow::Result;

use super::types::CrawlConfig;

#[derive(Debug, Default)]
pub struct CrawlConfigBuilder {
    config: CrawlConfig,
}

impl CrawlConfig {
    /// Create a builder pre-populated with the defaults.
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }
}

impl CrawlConfigBuilder {
    #[must_use]
    pub fn seed_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.seed_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn threads_count(mut self, count: usize) -> Self {
        self.config.threads_count = count;
        self
    }

    #[must_use]
    pub fn time_delay(mut self, seconds: f64) -> Self {
        self.config.time_delay = seconds;
        self
    }

    #[must_use]
    pub fn save_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.save_file = path.into();
        self
    }

    #[must_use]
    pub fn cache_server(mut self, server: impl Into<String>) -> Self {
        self.config.cache_server = server.into();
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn stopwords_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.stopwords_file = path.into();
        self
    }

    #[must_use]
    pub fn dictionary_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.dictionary_file = path.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<CrawlConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
