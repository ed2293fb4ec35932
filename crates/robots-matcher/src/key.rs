/**
 * @file key.rs
 * @author Krisna Pranav
 * @brief robots-matcher[key]
 * @version 1.0
 * @date 2024-11-25
 *
 * @copyright Copyright (c) 2024 Doodle Developers, Krisna Pranav
 *
 */

/// Directive key of a robots.txt line. Unrecognized keys keep their original
/// text so handlers can still inspect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    UserAgent,
    Allow,
    Disallow,
    Sitemap,
    CrawlDelay,
    RequestRate,
    ContentSignal,
    Unknown(&'a [u8]),
} // pub enum Key<'a>

/// Classifies a whitespace-stripped key token. Matching is case-insensitive
/// and prefix-based, so `disallowed` still classifies as `Disallow`. The
/// second field reports whether one of the accepted typo spellings matched.
pub(crate) fn classify(key: &[u8]) -> (Key<'_>, bool) {
    let table: [(Key, &str, &[&str]); 7] = [
        (Key::UserAgent, "user-agent", &["useragent", "user agent"]),
        (Key::Allow, "allow", &[]),
        (
            Key::Disallow,
            "disallow",
            &["dissallow", "dissalow", "disalow", "diasllow", "disallaw"],
        ),
        (Key::Sitemap, "sitemap", &["site-map"]),
        (Key::CrawlDelay, "crawl-delay", &["crawldelay", "crawl delay"]),
        (Key::RequestRate, "request-rate", &[]),
        (
            Key::ContentSignal,
            "content-signal",
            &["contentsignal", "content signal"],
        ),
    ];

    for (kind, canonical, typos) in table {
        if starts_with_ignore_case(key, canonical) {
            return (kind, false);
        }
        if typos.iter().any(|typo| starts_with_ignore_case(key, typo)) {
            return (kind, true);
        }
    }

    (Key::Unknown(key), false)
} // pub(crate) fn classify(key: &[u8]) -> (Key<'_>, bool)

fn starts_with_ignore_case(key: &[u8], prefix: &str) -> bool {
    key.len() >= prefix.len() && key[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
} // fn starts_with_ignore_case(key: &[u8], prefix: &str) -> bool
