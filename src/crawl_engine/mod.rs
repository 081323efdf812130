//! The crawl engine: frontier, worker pool, and orchestration.

pub mod crawl_types;
pub mod crawler;
pub mod frontier;
pub mod seen_index;
pub mod worker;

pub use crawl_types::{CrawlError, CrawlResult};
pub use crawler::Crawler;
pub use frontier::Frontier;
pub use seen_index::SeenIndex;
pub use worker::Worker;
