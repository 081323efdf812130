//! Core types for crawl operations.

use thiserror::Error;

/// Errors surfaced by the crawl engine.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
    /// Durable seen-set store error
    #[error("seen-set store error: {0}")]
    Store(#[from] sqlx::Error),
    /// Network error talking to the cache server
    #[error("fetch error: {0}")]
    Fetch(#[from] reqwest::Error),
    /// Frontier bookkeeping violation; indicates a scheduling bug
    #[error("frontier error: {0}")]
    Frontier(String),
    /// Filesystem error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Other errors
    #[error("crawl error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CrawlError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} preserves the full context chain
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `CrawlError`
pub type CrawlResult<T> = Result<T, CrawlError>;
