//! The URL admissibility filter.
//!
//! `is_valid` decides whether a URL is worth fetching at all: in scope,
//! not a known binary/media asset, and not a crawler trap. The rules are
//! the product of empirical trap discovery (infinite calendars, paginated
//! listings, robots-disallowed subtrees, action query strings) and are
//! evaluated in a fixed order; the first failing rule wins.

use url::Url;

use super::tables::{
    ANY_NUMBER_PATTERN, CALENDAR_TRAP_PATTERN, FILE_EXT_PATTERN, INVALID_DOMAINS,
    INVALID_FRAGMENTS, INVALID_PATH_SEGMENTS, INVALID_PATHS, INVALID_QUERIES,
    MAX_PAGINATION_INDEX, VALID_DOMAINS, VALID_SCHEMES,
};

/// Decide whether to crawl this URL. Pure: the decision depends only on
/// the URL itself. Unparseable URLs are rejected.
#[must_use]
pub fn is_valid(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    let domain = parsed.host_str().unwrap_or_default().to_lowercase();
    let path = parsed.path().to_lowercase();
    let raw_path = parsed.path();
    let query = parsed.query().unwrap_or_default();
    let fragment = parsed.fragment().unwrap_or_default();

    if !VALID_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    if FILE_EXT_PATTERN.is_match(&path) {
        return false;
    }

    // bad queries typically lead to a 4XX, which gleans no information
    if INVALID_QUERIES.iter().any(|q| query.contains(q)) {
        return false;
    }

    if !in_crawl_scope(&domain, &path) {
        return false;
    }

    if INVALID_DOMAINS.contains(&domain.as_str()) {
        return false;
    }

    if hits_disallowed_prefix(&domain, &path) {
        return false;
    }

    if INVALID_PATH_SEGMENTS.iter().any(|seg| raw_path.contains(seg)) {
        return false;
    }

    let path_parts: Vec<&str> = raw_path.split('/').filter(|p| !p.is_empty()).collect();
    let query_parts: Vec<&str> = query.split('&').collect();

    if looks_like_calendar(raw_path, &path_parts, &query_parts) && !is_news_article(&path_parts) {
        return false;
    }

    if INVALID_FRAGMENTS.iter().any(|f| fragment.contains(f)) {
        return false;
    }

    if is_runaway_pagination(&path_parts) {
        return false;
    }

    true
}

/// The crawl boundary: the allowlisted domains and their subdomains, plus
/// the departmental slice of `today.uci.edu`.
fn in_crawl_scope(domain: &str, path: &str) -> bool {
    let allowlisted = VALID_DOMAINS.iter().any(|valid| {
        domain == *valid || domain.ends_with(&format!(".{valid}"))
    });

    allowlisted
        || (domain == "today.uci.edu"
            && path.starts_with("/department/information_computer_sciences/"))
}

/// Per-host robots.txt prefixes. The key matches the host itself or its
/// `www.` twin.
fn hits_disallowed_prefix(domain: &str, path: &str) -> bool {
    INVALID_PATHS.iter().any(|(host, prefixes)| {
        (domain == *host || domain == format!("www.{host}"))
            && prefixes.iter().any(|prefix| path.starts_with(prefix))
    })
}

/// Anything that looks like a calendar is probably a trap. Checked against
/// every path segment, every `&`-split query segment, and the full path.
fn looks_like_calendar(raw_path: &str, path_parts: &[&str], query_parts: &[&str]) -> bool {
    path_parts
        .iter()
        .chain(query_parts.iter())
        .chain(std::iter::once(&raw_path))
        .any(|part| CALENDAR_TRAP_PATTERN.is_match(part))
}

/// The one date shape that is legitimate content rather than a calendar:
/// the last four path segments form exactly `YYYY/MM/DD/slug`.
fn is_news_article(path_parts: &[&str]) -> bool {
    if path_parts.len() <= 3 {
        return false;
    }
    let tail = &path_parts[path_parts.len() - 4..];
    ANY_NUMBER_PATTERN.is_match(tail[0])
        && tail[0].len() == 4
        && ANY_NUMBER_PATTERN.is_match(tail[1])
        && tail[1].len() == 2
        && ANY_NUMBER_PATTERN.is_match(tail[2])
        && tail[2].len() == 2
        && !tail[3].is_empty()
}

/// Some sites expose pages 1..infinity of the same listing; `/page/N` with
/// N past the cutoff is rejected.
fn is_runaway_pagination(path_parts: &[&str]) -> bool {
    if path_parts.len() < 2 {
        return false;
    }
    let last = path_parts[path_parts.len() - 1];
    path_parts[path_parts.len() - 2] == "page"
        && ANY_NUMBER_PATTERN.is_match(last)
        && last.parse::<u64>().is_ok_and(|n| n > MAX_PAGINATION_INDEX)
}
