//! Data tables for the URL admissibility filter.
//!
//! Every scheme, domain, query, fragment or path shape that makes a URL
//! valid or invalid lives here. The rules themselves are in `filter.rs`;
//! new traps discovered during crawling are handled by extending these
//! tables, not by editing control flow. Regexes are compiled once at first
//! use.

use once_cell::sync::Lazy;
use regex::Regex;

/// Schemes the crawler will follow.
pub static VALID_SCHEMES: &[&str] = &["http", "https"];

/// The crawl boundary. A URL is in scope when its host equals one of these
/// or is a subdomain of one. The `today.uci.edu` departmental carve-in is
/// path-scoped and handled separately in the filter.
pub static VALID_DOMAINS: &[&str] = &[
    "ics.uci.edu",
    "cs.uci.edu",
    "informatics.uci.edu",
    "stat.uci.edu",
];

/// Host whitelisted by scope but whose root robots.txt disallows everything.
/// The cache server answers these with an override status, so they glean
/// nothing.
pub static INVALID_DOMAINS: &[&str] = &["intranet.ics.uci.edu"];

/// Per-host path prefixes disallowed by that host's robots.txt (found by
/// manual inspection), plus a few prefixes that only multiply URLs without
/// producing new content. Matches the host itself or its `www.` twin.
pub static INVALID_PATHS: &[(&str, &[&str])] = &[
    ("ics.uci.edu", &["/people", "/happening"]),
    ("cs.uci.edu", &["/people", "/happening"]),
    // informatics and stat also expose /wp-admin/admin-ajax.php; it answers
    // with a bare "0", so the whole /wp-admin subtree stays out.
    ("informatics.uci.edu", &["/wp-admin", "/research"]),
    ("stat.uci.edu", &["/wp-admin"]),
    (
        "www-db.ics.uci.edu",
        &[
            "/cgi-bin",
            "/web-images",
            "/downloads",
            "/glimpse_index",
            "/pages/internal",
        ],
    ),
    // every blog post carries a cloud of tags; the tags all point back at
    // the same posts
    ("ngs.ics.uci.edu", &["/tag"]),
];

/// Substrings that disqualify a path wherever they appear.
pub static INVALID_PATH_SEGMENTS: &[&str] = &[
    "files/pdf",
    "file/pdf",
    "/-/",
    "/seminar/Nanda",
    "/accounts:",
];

/// Query substrings associated with actions, calendar exports and redirects
/// that never produce a crawlable page.
pub static INVALID_QUERIES: &[&str] = &[
    "action=login",
    "action=download",
    "action=upload",
    "action=edit",
    "action=search",
    "action=source",
    "share=",
    "ical=",
    "outlook=",
    "outlook-ical=",
    "redirect_to",
    "rev=",
    "do=media",
    "do=login",
    "do=backlink",
    "idx=",
];

/// Fragments that point at a different section of an identical page.
/// Mostly obsolete since links are defragmented at extraction; kept as a
/// second line of defense.
pub static INVALID_FRAGMENTS: &[&str] = &["comment-", "respond"];

/// Paginated listings past this index are assumed to repeat forever.
pub const MAX_PAGINATION_INDEX: u64 = 500;

/// File extensions with no textual content worth crawling. Applied to the
/// lowercased path.
pub static FILE_EXT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^.*\.(css|js|bmp|gif|jpe?g|ico|png|tiff?|mid|mp2|mp3|mp4",
        r"|wav|avi|mov|mpeg|ram|m4v|mkv|ogg|ogv|pdf|ps|eps|tex",
        r"|ppt|pptx|pps|ppsx|doc|docx|xls|xlsx|odc|odp|ods|odt",
        r"|names|data|dat|exe|bz2|tar|msi|bin|7z|psd|dmg|iso",
        r"|epub|dll|cnf|tgz|sha1|thmx|mso|arff|rtf|jar|csv",
        r"|rm|smil|wmv|swf|wma|zip|rar|gz|war|img|apk|sql)$"
    ))
    .expect("file extension pattern is valid")
});

/// Date shapes that mark dynamically generated calendar pages:
/// YYYY-M-D, D-M-YYYY, YYYY-M or M-YYYY, with any non-digit run as the
/// delimiter.
pub static CALENDAR_TRAP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4}\D+\d{1,2}(\D+\d{1,2})?|\d{1,2}\D+(\d{1,2}\D+)?\d{4})")
        .expect("calendar trap pattern is valid")
});

/// A segment that is nothing but digits.
pub static ANY_NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("number pattern is valid"));
