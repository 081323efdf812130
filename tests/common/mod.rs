//! Shared helpers for the integration test suite.

#![allow(dead_code)]

use std::collections::HashMap;

use bytes::Bytes;
use campus_crawler::{CrawlResult, Fetcher, Lexicon, Response};

/// A lexicon small enough to reason about in assertions.
pub fn test_lexicon() -> Lexicon {
    Lexicon::from_words(
        ["the", "a", "of"],
        ["foo", "bar", "computer", "science", "crawler", "data"],
    )
}

/// Canned-response fetcher: URLs map to `(status, final_url, body)`.
/// Unknown URLs come back as 404s.
pub struct StubFetcher {
    responses: HashMap<String, (u16, String, String)>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Serve `body` with status 200 for `url`.
    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (200, url.to_string(), body.to_string()));
        self
    }

    /// Serve a redirect: fetching `url` lands on `final_url`.
    pub fn redirect(mut self, url: &str, final_url: &str, body: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            (200, final_url.to_string(), body.to_string()),
        );
        self
    }

    /// Serve a non-200 status for `url`.
    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), (status, url.to_string(), String::new()));
        self
    }
}

impl Fetcher for StubFetcher {
    async fn download(&self, url: &str) -> CrawlResult<Response> {
        match self.responses.get(url) {
            Some((status, final_url, body)) => Ok(Response {
                status: *status,
                url: final_url.clone(),
                error: (*status != 200).then(|| format!("status {status}")),
                content: Some(Bytes::from(body.clone())),
            }),
            None => Ok(Response {
                status: 404,
                url: url.to_string(),
                error: Some("not found".to_string()),
                content: None,
            }),
        }
    }
}

/// Build a minimal HTML page from a text body and a list of hrefs.
pub fn html_page(text: &str, hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!("<a href=\"{href}\">link</a>"))
        .collect();
    format!("<html><body><p>{text}</p>{links}</body></html>")
}
