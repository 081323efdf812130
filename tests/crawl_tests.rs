//! End-to-end crawl over a canned site: seed page, discovered pages, a
//! 404, and a redirect out of scope.
//!
//! Runs with `TESTING=true` so the whole crawl is in-memory and the
//! frontier's empty() lets the workers terminate once the queue drains.

mod common;

use std::sync::{Arc, Once};

use campus_crawler::utils::fingerprint;
use campus_crawler::{CrawlConfig, Crawler};

use common::{StubFetcher, html_page, test_lexicon};

static TESTING_MODE: Once = Once::new();

fn enable_testing_mode() {
    TESTING_MODE.call_once(|| unsafe { std::env::set_var("TESTING", "true") });
}

fn crawl_config(threads: usize) -> CrawlConfig {
    CrawlConfig::builder()
        .seed_urls(["https://ics.uci.edu"])
        .threads_count(threads)
        .time_delay(0.0)
        .build()
        .expect("valid config")
}

fn canned_site() -> StubFetcher {
    StubFetcher::new()
        .page(
            "https://ics.uci.edu",
            &html_page(
                "foo foo computer",
                &["/a", "https://ics.uci.edu/b", "https://ics.uci.edu/gone"],
            ),
        )
        .page(
            "https://ics.uci.edu/a",
            // links back to already-seen pages: dedup drops them
            &html_page("bar science", &["https://ics.uci.edu", "/b"]),
        )
        .page(
            "https://ics.uci.edu/b",
            &html_page("data crawler crawler", &[]),
        )
        .redirect(
            "https://ics.uci.edu/gone",
            "https://elsewhere.com/landing",
            &html_page("foo", &["https://ics.uci.edu/should-not-appear"]),
        )
}

#[tokio::test]
async fn crawl_runs_to_frontier_exhaustion() {
    enable_testing_mode();

    let crawler = Crawler::new(crawl_config(1), true, canned_site(), test_lexicon())
        .await
        .expect("crawler builds");
    let frontier = Arc::clone(crawler.frontier());
    let stats = Arc::clone(crawler.stats());

    crawler.run().await.expect("crawl completes");

    let record = stats.get_raw().await;

    // three in-scope pages processed; the out-of-scope redirect target is
    // fetched but contributes nothing
    assert_eq!(record.url_word_counts.len(), 3);
    assert_eq!(record.url_word_counts.get("https://ics.uci.edu"), Some(&3));
    assert_eq!(record.url_word_counts.get("https://ics.uci.edu/a"), Some(&2));
    assert_eq!(record.url_word_counts.get("https://ics.uci.edu/b"), Some(&3));

    // word multiset accumulated across pages
    assert_eq!(record.words.get("foo"), Some(&2));
    assert_eq!(record.words.get("crawler"), Some(&2));
    assert_eq!(record.words.get("computer"), Some(&1));

    // one authority, three pages
    assert_eq!(record.subdomains.get("ics.uci.edu"), Some(&3));
    assert_eq!(record.subdomains.len(), 1);

    // every dispatched URL was marked complete, including the 404-free
    // redirect page, and the link behind the out-of-scope redirect was
    // never discovered
    assert!(frontier.empty().await);
    for url in [
        "https://ics.uci.edu",
        "https://ics.uci.edu/a",
        "https://ics.uci.edu/b",
        "https://ics.uci.edu/gone",
    ] {
        assert!(
            frontier.url_downloaded(&fingerprint(url)).await.unwrap(),
            "{url} should be marked downloaded"
        );
    }
    assert!(
        !frontier
            .url_seen(&fingerprint("https://ics.uci.edu/should-not-appear"))
            .await
            .unwrap()
    );

    assert!(stats.is_finished().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crawl_with_multiple_workers_reaches_the_same_state() {
    enable_testing_mode();

    let crawler = Crawler::new(crawl_config(3), true, canned_site(), test_lexicon())
        .await
        .expect("crawler builds");
    let stats = Arc::clone(crawler.stats());

    crawler.run().await.expect("crawl completes");

    let record = stats.get_raw().await;
    assert_eq!(record.url_word_counts.len(), 3);
    assert_eq!(record.subdomains.get("ics.uci.edu"), Some(&3));
}

#[tokio::test]
async fn unknown_urls_are_completed_without_stats() {
    enable_testing_mode();

    // seed page links to a page the stub does not know: that fetch 404s,
    // the URL is still marked complete, the crawl still terminates
    let fetcher = StubFetcher::new().page(
        "https://ics.uci.edu",
        &html_page("foo", &["https://ics.uci.edu/missing"]),
    );

    let crawler = Crawler::new(crawl_config(1), true, fetcher, test_lexicon())
        .await
        .expect("crawler builds");
    let frontier = Arc::clone(crawler.frontier());
    let stats = Arc::clone(crawler.stats());

    crawler.run().await.expect("crawl completes");

    assert!(frontier.empty().await);
    assert!(
        frontier
            .url_downloaded(&fingerprint("https://ics.uci.edu/missing"))
            .await
            .unwrap()
    );
    let record = stats.get_raw().await;
    assert_eq!(record.url_word_counts.len(), 1);
}
