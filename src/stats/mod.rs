//! Per-page statistics extraction and the crawl-wide aggregate.
//!
//! Each processed page yields a [`StatsRecord`]; the records from every
//! worker are merged into one durable [`GlobalStats`](aggregate::GlobalStats)
//! that backs the final crawl report.

pub mod aggregate;
pub mod tokenize;

use std::collections::{BTreeMap, HashSet};

use log::error;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::{authority, defragment};
use tokenize::Lexicon;

pub use aggregate::GlobalStats;

/// The statistics gathered from pages. One instance per processed page,
/// and the same shape accumulated crawl-wide by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    /// Defragmented page URL to the page's word count.
    pub url_word_counts: BTreeMap<String, u64>,
    /// Unique defragmented outbound links observed on pages.
    pub urls_seen_on_page: u64,
    /// Dictionary-word frequencies.
    pub words: BTreeMap<String, u64>,
    /// Pages per authority; a single processed page contributes exactly one
    /// count of 1 to its own authority.
    pub subdomains: BTreeMap<String, u64>,
}

impl StatsRecord {
    /// Merge another record into this one. Word counts for the same URL are
    /// overwritten (same URL implies same count); link totals add; word and
    /// subdomain multisets add. Commutative and associative over disjoint
    /// and overlapping inputs alike.
    pub fn merge(&mut self, other: &StatsRecord) {
        for (url, count) in &other.url_word_counts {
            self.url_word_counts.insert(url.clone(), *count);
        }
        self.urls_seen_on_page += other.urls_seen_on_page;
        for (word, count) in &other.words {
            *self.words.entry(word.clone()).or_insert(0) += count;
        }
        for (subdomain, count) in &other.subdomains {
            *self.subdomains.entry(subdomain.clone()).or_insert(0) += count;
        }
    }

    /// Total number of words across all per-page counts.
    #[must_use]
    pub fn total_words(&self) -> u64 {
        self.words.values().sum()
    }
}

/// Extract the statistics record for a single fetched page.
///
/// The page identity is the defragmented `url`; the word count is the sum
/// of dictionary-word occurrences in the page text; the outbound-link count
/// is the number of unique defragmented link targets. Callers are expected
/// to have run the admissibility filter on `url` already.
#[must_use]
pub fn process_page(url: &str, dom: &Html, lexicon: &Lexicon) -> StatsRecord {
    let page_authority = authority(url);
    debug_assert!(
        page_authority.contains("uci.edu"),
        "processing {url} despite it being out of scope"
    );

    let mut record = StatsRecord::default();

    let text = extract_text(dom);
    let words = lexicon.words(&text);
    let word_count: u64 = words.values().sum();

    record
        .url_word_counts
        .insert(defragment(url).to_string(), word_count);
    record.urls_seen_on_page = page_links(url, dom).len() as u64;
    record.words = words;
    record.subdomains.insert(page_authority, 1);

    record
}

/// All text in the document with inter-element whitespace: every text node
/// trimmed, empties dropped, the rest joined by single spaces.
#[must_use]
pub fn extract_text(dom: &Html) -> String {
    dom.root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The unique defragmented link targets of a page: every `<a href>`
/// resolved against `base_url` (relative links included), fragment
/// stripped. Hrefs that do not resolve are dropped.
#[must_use]
pub fn page_links(base_url: &str, dom: &Html) -> HashSet<String> {
    let Ok(base) = Url::parse(base_url) else {
        error!(
            target: "campus_crawler::stats",
            "cannot resolve links against unparseable base {base_url}"
        );
        return HashSet::new();
    };

    let mut links = HashSet::new();
    if let Ok(selector) = Selector::parse("a[href]") {
        for element in dom.select(&selector) {
            if let Some(href) = element.value().attr("href")
                && let Ok(resolved) = base.join(href)
            {
                links.insert(defragment(resolved.as_str()).to_string());
            }
        }
    }
    links
}
