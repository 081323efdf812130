//! Admissibility filter tests.
//!
//! Most cases here were collected from URLs that actually misbehaved during
//! crawling: robots-disallowed subtrees, calendar traps, action queries,
//! runaway pagination.

use campus_crawler::is_valid;

#[test]
fn accepts_allowlisted_domains_and_subdomains() {
    assert!(is_valid("https://www.ics.uci.edu/"));
    assert!(is_valid("https://ics.uci.edu/"));
    assert!(is_valid("https://ics.uci.edu"));
    assert!(is_valid("http://hub.ics.uci.edu/"));
    assert!(is_valid("https://foo.cs.uci.edu/bar"));
    assert!(is_valid("http://research.informatics.uci.edu/foo"));
    assert!(is_valid("https://www.stat.uci.edu/courses"));
}

#[test]
fn rejects_bad_schemes() {
    assert!(!is_valid("bad://xxx.com"));
    assert!(!is_valid("bad://www.xxx.com"));
    assert!(!is_valid("foo://bar.baz.stat.uci.edu/foo/bar#baz"));
    assert!(!is_valid("mailto:someone@ics.uci.edu"));
    assert!(!is_valid("not a url at all"));
}

#[test]
fn rejects_out_of_scope_domains() {
    assert!(!is_valid("http://foo.com/"));
    assert!(!is_valid("https://engineering.uci.edu/"));
    assert!(!is_valid("https://google.com"));
    assert!(!is_valid("http://ics.uci.edu.evil.com/"));
    assert!(!is_valid("http://math.uci.edu/"));
    assert!(!is_valid("http://uci.edu/"));
    assert!(!is_valid("http://news.nacs.uci.edu/2009-05-psearch"));
}

#[test]
fn today_uci_edu_is_path_scoped() {
    assert!(is_valid(
        "https://today.uci.edu/department/information_computer_sciences/x"
    ));
    assert!(is_valid(
        "https://today.uci.edu/department/information_computer_sciences/foo/bar/baz"
    ));
    assert!(!is_valid("https://today.uci.edu/department/engineering/"));
    assert!(!is_valid("https://today.uci.edu/"));
}

#[test]
fn rejects_blocked_file_extensions() {
    assert!(is_valid("http://www.ics.uci.edu/foo.txt"));
    assert!(!is_valid("http://cs.uci.edu/foo.css"));
    assert!(!is_valid("http://cs.uci.edu/foo.CSS"));
    assert!(!is_valid(
        "http://today.uci.edu/department/information_computer_sciences/foo/bar/baz.jpg"
    ));
    assert!(!is_valid(
        "https://ics.uci.edu/~shantas/tutorials/20-icde-crypto_tutorial.ppsx"
    ));
    assert!(!is_valid("https://ics.uci.edu/~wjohnson/BIDA/Ch8/Ch8WinBUGScode.odc"));
    assert!(!is_valid("https://ics.uci.edu/papers/paper.pdf"));
    assert!(!is_valid("https://ics.uci.edu/releases/tool.tar"));
}

#[test]
fn rejects_action_and_calendar_queries() {
    assert!(!is_valid(
        "http://sli.ics.uci.edu/Category/PmWikiDeveloper?action=login"
    ));
    assert!(!is_valid(
        "http://sli.ics.uci.edu/PmWiki/Uploads?action=upload&upname=file.doc"
    ));
    assert!(!is_valid(
        "http://sli.ics.uci.edu/Pubs/Pubs?action=download&upname=nips99.ps"
    ));
    assert!(!is_valid(
        "https://sli.ics.uci.edu/Classes-2008/Classes-2008?action=edit"
    ));
    assert!(!is_valid(
        "http://sli.ics.uci.edu/PmWiki/WikiGroup?action=search&q=fmt%3Dgroup"
    ));
    assert!(!is_valid("https://sli.ics.uci.edu/Site/Preferences?action=source"));
    assert!(!is_valid(
        "https://wics.ics.uci.edu/spring-2021-week-1/?share=twitter"
    ));
    assert!(!is_valid(
        "https://ngs.ics.uci.edu/wp-login.php?redirect_to=http%3A%2F%2Fngs.ics.uci.edu%2F"
    ));
    assert!(!is_valid(
        "https://swiki.ics.uci.edu/doku.php/hardware:cluster?idx=group%3Asupport"
    ));
    assert!(!is_valid("https://wiki.ics.uci.edu/doku.php?do=login&sectok=x"));
    assert!(!is_valid("https://calendar.ics.uci.edu/week?ical=1"));
}

#[test]
fn rejects_robots_disallowed_subtrees() {
    assert!(!is_valid("https://intranet.ics.uci.edu/"));
    assert!(!is_valid("https://ics.uci.edu/people/sven-koenig"));
    assert!(!is_valid("https://www.ics.uci.edu/happening/news/"));
    assert!(!is_valid("https://ics.uci.edu/happening/news/page/3"));
    assert!(!is_valid("https://www.informatics.uci.edu/research/area"));
    assert!(!is_valid("https://www.informatics.uci.edu/wp-admin/"));
    assert!(!is_valid("https://www-db.ics.uci.edu/glimpse_index/wgindex.shtml"));
    assert!(!is_valid("https://ngs.ics.uci.edu/tag/social-computing/"));
    // the prefix tables bind the named host and its www twin, not others
    assert!(is_valid("https://vision.ics.uci.edu/people"));
}

#[test]
fn rejects_blocked_path_segments() {
    assert!(!is_valid(
        "https://www.informatics.uci.edu/files/pdf/InformaticsBrochure-March2018"
    ));
    assert!(!is_valid("https://gitlab.ics.uci.edu/group/-/blob/main/x"));
    assert!(!is_valid("https://ics.uci.edu/seminar/Nanda/overview"));
}

#[test]
fn rejects_calendar_shaped_paths() {
    assert!(!is_valid(
        "https://isg.ics.uci.edu/events/tag/talks/day/2024-11-08"
    ));
    assert!(!is_valid("https://wics.ics.uci.edu/events/2021-04"));
    assert!(!is_valid("https://ics.uci.edu/events/month/04-2021"));
    assert!(!is_valid("https://ics.uci.edu/calendar?date=2022-6-15"));
}

#[test]
fn accepts_dated_news_articles() {
    // YYYY/MM/DD/slug is an article, not a calendar
    assert!(is_valid("https://ics.uci.edu/news/2024/11/08/story-slug"));
    assert!(is_valid("https://cs.uci.edu/blog/2019/01/02/new-faculty"));
    // a bare day listing with no slug is still a calendar
    assert!(!is_valid("https://ics.uci.edu/news/2024/11/08"));
}

#[test]
fn rejects_runaway_pagination() {
    assert!(is_valid("https://ics.uci.edu/category/research/page/10"));
    assert!(is_valid("https://ics.uci.edu/category/research/page/500"));
    assert!(!is_valid("https://ics.uci.edu/category/research/page/501"));
    assert!(!is_valid("https://ics.uci.edu/category/research/page/9999"));
}

#[test]
fn rejects_comment_fragments() {
    assert!(!is_valid("https://ics.uci.edu/post#comment-42"));
    assert!(!is_valid("https://ics.uci.edu/post#respond"));
    assert!(is_valid("https://ics.uci.edu/post#section-2"));
}

#[test]
fn is_pure() {
    let url = "https://ics.uci.edu/category/research/page/10";
    let first = is_valid(url);
    for _ in 0..10 {
        assert_eq!(is_valid(url), first);
    }
}
