/**
 * @file parser.rs
 * @author Krisna Pranav
 * @brief robots-matcher[parser]
 * @version 1.0
 * @date 2024-11-25
 *
 * @copyright Copyright (c) 2024 Doodle Developers, Krisna Pranav
 *
 */
use std::borrow::Cow;

use crate::key::{classify, Key};
use crate::value;
use crate::value::{ContentSignal, RequestRate};

/// Longest line kept, in bytes. Common browsers cap URLs at 2083 bytes and a
/// robots.txt line should never need more than a few times that; everything
/// past the cap is dropped.
pub const MAX_LINE_LEN: usize = 2083 * 8;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Flags describing one scanned line. Reported for every line, whether or
/// not it carried a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMeta {
    /// The line is empty once comments and whitespace are gone.
    pub is_empty: bool,
    /// A `#` comment was present, possibly after content.
    pub has_comment: bool,
    /// The whole line is a comment.
    pub is_comment: bool,
    /// The line parsed as a key/value pair.
    pub has_directive: bool,
    /// The key is one of the accepted typo variants of a known directive.
    pub is_acceptable_typo: bool,
    /// The line ran past `MAX_LINE_LEN` and was truncated.
    pub is_line_too_long: bool,
    /// Whitespace stood in for the missing `:` separator.
    pub is_missing_colon_separator: bool,
} // pub struct LineMeta

/// Callbacks fired by [`parse`] in source order. Directive values are slices
/// of the input body, except where pattern normalization had to rewrite
/// bytes. The scanner accepts any input; lines that do not look like
/// robots.txt directives only produce [`ParseHandler::report_line`].
pub trait ParseHandler {
    /// Fires once before the first line.
    fn start(&mut self);

    /// Fires once after the final line.
    fn end(&mut self);

    fn user_agent(&mut self, line_num: u32, value: &[u8]);

    fn allow(&mut self, line_num: u32, value: &[u8]);

    fn disallow(&mut self, line_num: u32, value: &[u8]);

    fn sitemap(&mut self, _line_num: u32, _value: &[u8]) {}

    /// Crawl-delay in seconds. Non-standard but widely honored.
    fn crawl_delay(&mut self, _line_num: u32, _seconds: f64) {}

    /// Request-rate, e.g. `1/5` for one request per five seconds.
    fn request_rate(&mut self, _line_num: u32, _rate: RequestRate) {}

    /// Content-Signal AI/search usage preferences.
    fn content_signal(&mut self, _line_num: u32, _signal: ContentSignal) {}

    /// Any other key/value pair.
    fn unknown(&mut self, _line_num: u32, _key: &[u8], _value: &[u8]) {}

    /// Per-line metadata, reported after the line's directive callback.
    fn report_line(&mut self, _line_num: u32, _meta: LineMeta) {}
} // pub trait ParseHandler

/// Drives the scanner over a robots.txt body, firing `handler` callbacks for
/// every line. The body is treated as opaque bytes; lines end at LF, CR or
/// CRLF and the final line is emitted with or without a terminator.
pub fn parse<H: ParseHandler>(body: &[u8], handler: &mut H) {
    tracing::trace!(bytes = body.len(), "parsing robots.txt body");

    // Byte order marks should never appear in a robots.txt file, but they do
    // nevertheless. Skip whatever prefix of one is present.
    let matched_bom = body
        .iter()
        .zip(UTF8_BOM.iter())
        .take_while(|(got, want)| got == want)
        .count();
    let body = &body[matched_bom..];

    handler.start();

    let mut line_num: u32 = 0;
    let mut rest = body;
    loop {
        match rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                line_num += 1;
                emit_line(line_num, &rest[..end], handler);
                // CRLF is a single terminator, not an empty extra line.
                let terminator =
                    if rest[end] == b'\r' && rest.get(end + 1) == Some(&b'\n') { 2 } else { 1 };
                rest = &rest[end + terminator..];
            }
            None => {
                line_num += 1;
                emit_line(line_num, rest, handler);
                break;
            }
        }
    }

    handler.end();
} // pub fn parse<H: ParseHandler>(body: &[u8], handler: &mut H)

fn emit_line<H: ParseHandler>(line_num: u32, content: &[u8], handler: &mut H) {
    let mut meta = LineMeta::default();
    let content = if content.len() > MAX_LINE_LEN {
        meta.is_line_too_long = true;
        &content[..MAX_LINE_LEN]
    } else {
        content
    };

    if let Some((key, raw_value)) = split_key_value(content, &mut meta) {
        dispatch(line_num, key, raw_value, &mut meta, handler);
    }
    handler.report_line(line_num, meta);
}

/// Splits a line into its key and value. Rules must look like
/// `<key>[ \t]*:[ \t]*<value>`; a whitespace run is accepted in place of the
/// forgotten colon, but only between exactly two tokens.
fn split_key_value<'a>(line: &'a [u8], meta: &mut LineMeta) -> Option<(&'a [u8], &'a [u8])> {
    let line = match line.iter().position(|&b| b == b'#') {
        Some(comment) => {
            meta.has_comment = true;
            &line[..comment]
        }
        None => line,
    };
    let line = trim(line);
    if line.is_empty() {
        if meta.has_comment {
            meta.is_comment = true;
        } else {
            meta.is_empty = true;
        }
        return None;
    }

    let sep = match line.iter().position(|&b| b == b':') {
        Some(sep) => sep,
        None => {
            let sep = line.iter().position(|&b| b == b' ' || b == b'\t')?;
            let value = trim_start(&line[sep..]);
            if value.iter().any(|&b| b == b' ' || b == b'\t') {
                // More than two tokens; not salvageable as a key/value pair.
                return None;
            }
            meta.is_missing_colon_separator = true;
            sep
        }
    };

    let key = trim(&line[..sep]);
    if key.is_empty() {
        return None;
    }
    let value = trim_start(&line[sep + 1..]);
    meta.has_directive = true;
    Some((key, value))
}

fn dispatch<H: ParseHandler>(
    line_num: u32,
    key: &[u8],
    value: &[u8],
    meta: &mut LineMeta,
    handler: &mut H,
) {
    let (kind, is_typo) = classify(key);
    meta.is_acceptable_typo = is_typo;
    match kind {
        Key::UserAgent => handler.user_agent(line_num, value),
        Key::Allow => handler.allow(line_num, &maybe_escape_pattern(value)),
        Key::Disallow => handler.disallow(line_num, &maybe_escape_pattern(value)),
        Key::Sitemap => handler.sitemap(line_num, value),
        Key::CrawlDelay => handler.crawl_delay(line_num, value::crawl_delay(value)),
        Key::RequestRate => {
            // A malformed rate drops the directive, not the line.
            if let Some(rate) = value::request_rate(value) {
                handler.request_rate(line_num, rate);
            }
        }
        Key::ContentSignal => handler.content_signal(line_num, value::content_signal(value)),
        Key::Unknown(key) => handler.unknown(line_num, key, &maybe_escape_pattern(value)),
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Canonicalizes a path pattern: uppercases the digits of existing `%HH`
/// triplets (`%aa` becomes `%AA`) and percent-encodes octets with the high
/// bit set (`/SanJoséSellers` becomes `/SanJos%C3%A9Sellers`). Most patterns
/// need neither, so the original slice passes through unallocated.
pub(crate) fn maybe_escape_pattern(pattern: &[u8]) -> Cow<'_, [u8]> {
    let mut num_to_escape = 0;
    let mut need_capitalize = false;

    let mut i = 0;
    while i < pattern.len() {
        if is_escape_triplet(pattern, i) {
            if pattern[i + 1].is_ascii_lowercase() || pattern[i + 2].is_ascii_lowercase() {
                need_capitalize = true;
            }
            i += 3;
            continue;
        }
        if pattern[i] & 0x80 != 0 {
            num_to_escape += 1;
        }
        i += 1;
    }
    if num_to_escape == 0 && !need_capitalize {
        return Cow::Borrowed(pattern);
    }

    let mut escaped = Vec::with_capacity(pattern.len() + num_to_escape * 2);
    let mut i = 0;
    while i < pattern.len() {
        if is_escape_triplet(pattern, i) {
            escaped.push(b'%');
            escaped.push(pattern[i + 1].to_ascii_uppercase());
            escaped.push(pattern[i + 2].to_ascii_uppercase());
            i += 3;
        } else if pattern[i] & 0x80 != 0 {
            escaped.push(b'%');
            escaped.push(HEX_DIGITS[(pattern[i] >> 4) as usize]);
            escaped.push(HEX_DIGITS[(pattern[i] & 0xF) as usize]);
            i += 1;
        } else {
            escaped.push(pattern[i]);
            i += 1;
        }
    }
    Cow::Owned(escaped)
} // pub(crate) fn maybe_escape_pattern(pattern: &[u8]) -> Cow<'_, [u8]>

fn is_escape_triplet(s: &[u8], i: usize) -> bool {
    s[i] == b'%' && i + 2 < s.len() && s[i + 1].is_ascii_hexdigit() && s[i + 2].is_ascii_hexdigit()
}

pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

pub(crate) fn trim(s: &[u8]) -> &[u8] {
    trim_end(trim_start(s))
}

pub(crate) fn trim_start(s: &[u8]) -> &[u8] {
    let from = s.iter().position(|&b| !is_space(b)).unwrap_or(s.len());
    &s[from..]
}

fn trim_end(s: &[u8]) -> &[u8] {
    let to = s.iter().rposition(|&b| !is_space(b)).map_or(0, |i| i + 1);
    &s[..to]
}
