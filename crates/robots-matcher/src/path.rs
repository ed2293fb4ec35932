/**
 * @file path.rs
 * @author Krisna Pranav
 * @brief robots-matcher[path]
 * @version 1.0
 * @date 2024-11-25
 *
 * @copyright Copyright (c) 2024 Doodle Developers, Krisna Pranav
 *
 */
use url::Url;

/// Extracts the path (with params) and query from a URL, removing scheme,
/// authority and fragment. The result always starts with `/`; anything
/// unsalvageable falls back to `/` outright.
///
/// The url must already be %-encoded per RFC 3986; no canonicalization
/// beyond what WHATWG parsing performs happens here.
pub(crate) fn get_path_params_query(url: &str) -> String {
    if url.is_empty() {
        return "/".to_string();
    }

    let parsed = Url::parse(url).ok().or_else(|| {
        if url.starts_with("//") {
            // Protocol-relative: borrow a scheme so the authority parses.
            Url::parse(&format!("http:{url}")).ok()
        } else if !url.starts_with('/') {
            // Schemeless, e.g. "example.com/path".
            Url::parse(&format!("http://{url}")).ok()
        } else {
            None
        }
    });

    let path = match parsed {
        Some(parsed) if !parsed.cannot_be_a_base() => {
            let mut path = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                path.push('?');
                path.push_str(query);
            }
            path
        }
        // Last resort: a rooted input is usable as a path once the fragment
        // is gone.
        _ if url.starts_with('/') => url.split('#').next().unwrap_or_default().to_string(),
        _ => return "/".to_string(),
    };

    if path.is_empty() || !path.starts_with('/') {
        return "/".to_string();
    }
    escape_meta_characters(path)
} // pub(crate) fn get_path_params_query(url: &str) -> String

/// A literal `*` or `$` in the query URL would collide with the pattern
/// grammar, so both re-encode; a rule spelled `%2A`/`%24` still matches.
fn escape_meta_characters(path: String) -> String {
    if !path.contains(['*', '$']) {
        return path;
    }
    let mut escaped = String::with_capacity(path.len() + 4);
    for c in path.chars() {
        match c {
            '*' => escaped.push_str("%2A"),
            '$' => escaped.push_str("%24"),
            _ => escaped.push(c),
        }
    }
    escaped
}
