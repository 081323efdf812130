//! Crawler configuration.
//!
//! `CrawlConfig` carries the recognized options (seeds, worker count,
//! politeness delay, durable-state paths, cache server, lexicon files)
//! with validation and sensible defaults.

pub mod builder;
pub mod types;

pub use builder::CrawlConfigBuilder;
pub use types::CrawlConfig;
