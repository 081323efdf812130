//! URL canonicalization: the textual forms and identity keys used by the
//! frontier and the statistics pipeline.
//!
//! Normalization and defragmentation are deliberately textual (no re-parse,
//! no percent-encoding cleanup) so that the stored form of a URL is exactly
//! what was discovered on the page. Only `fingerprint` and `authority` go
//! through a full parse.

use sha2::{Digest, Sha256};
use url::Url;

/// Trim trailing `/` characters from a URL.
///
/// This is the textual form stored in the frontier. Idempotent.
#[must_use]
pub fn normalize(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Strip the `#fragment` part of a URL, if any. Idempotent.
#[must_use]
pub fn defragment(url: &str) -> &str {
    match url.split_once('#') {
        Some((before, _)) => before,
        None => url,
    }
}

/// Compute the deterministic identity key of a URL.
///
/// SHA-256 hex over `"{netloc}/{path}/{params}/{query}/{fragment}"`. The
/// scheme is excluded on purpose: the admissibility filter accepts http and
/// https equivalently, so the two variants of a page collapse to one entry
/// in the seen-set. The params slot is always empty (kept so the five-field
/// layout is stable) since `url::Url` exposes no separate params component.
///
/// URLs that fail to parse are hashed verbatim.
#[must_use]
pub fn fingerprint(url: &str) -> String {
    let mut hasher = Sha256::new();
    match Url::parse(url) {
        Ok(parsed) => {
            let mut netloc = parsed.host_str().unwrap_or_default().to_string();
            if let Some(port) = parsed.port() {
                netloc.push(':');
                netloc.push_str(&port.to_string());
            }
            hasher.update(netloc.as_bytes());
            hasher.update(b"/");
            hasher.update(parsed.path().as_bytes());
            hasher.update(b"/");
            // params slot, always empty
            hasher.update(b"/");
            hasher.update(parsed.query().unwrap_or_default().as_bytes());
            hasher.update(b"/");
            hasher.update(parsed.fragment().unwrap_or_default().as_bytes());
        }
        Err(_) => hasher.update(url.as_bytes()),
    }
    hex::encode(&hasher.finalize()[..])
}

/// Extract the politeness-delay key of a URL: the host, lowercased, with a
/// single leading `www.` stripped.
///
/// Strings without a parseable host fall back to the same stripping applied
/// to the input itself, so bare hostnames still map to a usable key.
#[must_use]
pub fn authority(url: &str) -> String {
    let host = match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => url.to_lowercase(),
        },
        Err(_) => url.to_lowercase(),
    };
    strip_www(&host).to_string()
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
