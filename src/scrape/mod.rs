//! Response validation and link extraction.
//!
//! [`scrape`] is the per-page pipeline a worker runs after a fetch:
//! validate the response, process the page into a statistics record, push
//! the record to the aggregate, and return the admissible outbound links.

pub mod filter;
pub mod tables;

use log::{error, info, warn};
use scraper::Html;

use crate::crawl_engine::CrawlResult;
use crate::fetch::Response;
use crate::stats::tokenize::Lexicon;
use crate::stats::{GlobalStats, page_links, process_page};
use crate::utils::{defragment, normalize};

pub use filter::is_valid;

/// Validate a fetched response, fold its statistics into the aggregate,
/// and return the outbound links worth crawling. Invalid responses (bad
/// status, missing body, redirect out of scope) contribute nothing and
/// yield no links.
pub async fn scrape(
    url: &str,
    resp: &Response,
    stats: &GlobalStats,
    lexicon: &Lexicon,
) -> CrawlResult<Vec<String>> {
    if resp.status != 200 {
        error!(
            target: "campus_crawler::scrape",
            "response error status <{}> fetched for {url}, acquired from {}",
            resp.status, resp.url
        );
        return Ok(Vec::new());
    }

    let Some(body) = resp.body() else {
        error!(
            target: "campus_crawler::scrape",
            "response for {url} returned a 200 code, yet had no body"
        );
        return Ok(Vec::new());
    };

    // a redirect can land anywhere; re-check the final URL
    if !is_valid(&resp.url) {
        return Ok(Vec::new());
    }

    if url != resp.url {
        warn!(
            target: "campus_crawler::scrape",
            "fetched URL was not an exact match with response URL ({url} and {})",
            resp.url
        );
    }
    if !resp.url.contains(url) {
        warn!(
            target: "campus_crawler::scrape",
            "fetched URL was not a near match with response URL ({url} and {})",
            resp.url
        );
    }

    if body.len() < 100 {
        warn!(
            target: "campus_crawler::scrape",
            "{} contents contain little information, despite returning 200", resp.url
        );
    }

    let text = String::from_utf8_lossy(body);
    // scraper::Html is not Send; parse and process before any await
    let (record, links) = {
        let dom = Html::parse_document(&text);
        let record = process_page(&resp.url, &dom, lexicon);
        let links = extract_next_links(url, &dom);
        (record, links)
    };

    let word_total = record.total_words();
    stats.update(&record).await?;

    info!(
        target: "campus_crawler::scrape",
        "processed unique page {} containing {word_total} words",
        normalize(defragment(&resp.url))
    );

    Ok(links)
}

/// Outbound links worth crawling: every `<a href>` resolved against the
/// *requested* URL (so relative links stay predictable under redirects),
/// defragmented, deduplicated, and passed through [`is_valid`].
#[must_use]
pub fn extract_next_links(base_url: &str, dom: &Html) -> Vec<String> {
    page_links(base_url, dom)
        .into_iter()
        .filter(|link| is_valid(link))
        .collect()
}
