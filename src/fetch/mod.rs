//! HTTP transport to the cache server.
//!
//! The crawler never talks to origin servers directly; every request goes
//! through the configured cache/proxy. The [`Fetcher`] trait is the seam
//! the worker pool consumes, so tests can substitute a canned-response
//! implementation without any network.

use std::future::Future;

use bytes::Bytes;
use reqwest::{Client, Proxy};

use crate::config::CrawlConfig;
use crate::crawl_engine::{CrawlError, CrawlResult};

/// A fetched page.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Final URL after redirects.
    pub url: String,
    /// Server-side explanation when the status is not 200.
    pub error: Option<String>,
    /// Raw body. `None` or empty counts as an absent body.
    pub content: Option<Bytes>,
}

impl Response {
    /// The body, when present and non-empty.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.content.as_ref().filter(|bytes| !bytes.is_empty())
    }
}

/// Downloads pages for the worker pool.
///
/// `Err` means the transport itself failed (connection refused, timeout,
/// proxy race) — the worker backs off and retries its loop. HTTP-level
/// failures come back as an `Ok` response with a non-200 status and are
/// never retried.
pub trait Fetcher: Send + Sync + 'static {
    fn download(&self, url: &str) -> impl Future<Output = CrawlResult<Response>> + Send;
}

/// Production fetcher: a reqwest client routed through the configured
/// cache server (when one is set).
pub struct CacheFetcher {
    client: Client,
}

impl CacheFetcher {
    pub fn new(config: &CrawlConfig) -> CrawlResult<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent());

        let cache_server = config.cache_server();
        if !cache_server.is_empty() {
            let proxy_url = if cache_server.contains("://") {
                cache_server.to_string()
            } else {
                format!("http://{cache_server}")
            };
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| CrawlError::Config(format!("invalid cache_server {cache_server}: {e}")))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetcher for CacheFetcher {
    async fn download(&self, url: &str) -> CrawlResult<Response> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let error = if status.as_u16() == 200 {
            None
        } else {
            Some(
                status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), str::to_string),
            )
        };
        let content = response.bytes().await?;

        Ok(Response {
            status: status.as_u16(),
            url: final_url,
            error,
            content: Some(content),
        })
    }
}
