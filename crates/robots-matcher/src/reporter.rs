/**
 * @file reporter.rs
 * @author Krisna Pranav
 * @brief robots-matcher[reporter]
 * @version 1.0
 * @date 2024-11-25
 *
 * @copyright Copyright (c) 2024 Doodle Developers, Krisna Pranav
 *
 */
use crate::parser::{LineMeta, ParseHandler};
use crate::value::{ContentSignal, RequestRate};

/// Passive parse handler for diagnostics. Counts directives, collects
/// sitemap URLs and per-line metadata, and keeps the last side-channel value
/// seen anywhere in the file. It never judges URLs; pair it with
/// [`crate::Matcher`] when a verdict is needed.
#[derive(Debug, Default)]
pub struct Reporter {
    last_line_seen: u32,
    valid_directives: u32,
    unknown_directives: u32,
    sitemaps: Vec<String>,
    crawl_delay: Option<f64>,
    request_rate: Option<RequestRate>,
    content_signal: Option<ContentSignal>,
    lines: Vec<LineMeta>,
} // pub struct Reporter

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn digest(&mut self, line_num: u32) {
        self.last_line_seen = line_num;
        self.valid_directives += 1;
    }

    /// Line number of the last directive seen, recognized or not.
    pub fn last_line_seen(&self) -> u32 {
        self.last_line_seen
    }

    /// Number of recognized directives, typos included.
    pub fn valid_directives(&self) -> u32 {
        self.valid_directives
    }

    pub fn unknown_directives(&self) -> u32 {
        self.unknown_directives
    }

    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay
    }

    pub fn request_rate(&self) -> Option<RequestRate> {
        self.request_rate
    }

    pub fn content_signal(&self) -> Option<ContentSignal> {
        self.content_signal
    }

    /// Metadata for 1-based line `line_num`, as the scanner reported it.
    pub fn line(&self, line_num: u32) -> Option<&LineMeta> {
        line_num
            .checked_sub(1)
            .and_then(|index| self.lines.get(index as usize))
    }

    pub fn lines(&self) -> &[LineMeta] {
        &self.lines
    }
} // impl Reporter

impl ParseHandler for Reporter {
    fn start(&mut self) {
        *self = Reporter::default();
    }

    fn end(&mut self) {}

    fn user_agent(&mut self, line_num: u32, _value: &[u8]) {
        self.digest(line_num);
    }

    fn allow(&mut self, line_num: u32, _value: &[u8]) {
        self.digest(line_num);
    }

    fn disallow(&mut self, line_num: u32, _value: &[u8]) {
        self.digest(line_num);
    }

    fn sitemap(&mut self, line_num: u32, value: &[u8]) {
        self.digest(line_num);
        self.sitemaps.push(String::from_utf8_lossy(value).into_owned());
    }

    fn crawl_delay(&mut self, line_num: u32, seconds: f64) {
        self.digest(line_num);
        self.crawl_delay = Some(seconds);
    }

    fn request_rate(&mut self, line_num: u32, rate: RequestRate) {
        self.digest(line_num);
        self.request_rate = Some(rate);
    }

    fn content_signal(&mut self, line_num: u32, signal: ContentSignal) {
        self.digest(line_num);
        self.content_signal = Some(signal);
    }

    fn unknown(&mut self, line_num: u32, _key: &[u8], _value: &[u8]) {
        self.last_line_seen = line_num;
        self.unknown_directives += 1;
    }

    fn report_line(&mut self, _line_num: u32, meta: LineMeta) {
        self.lines.push(meta);
    }
} // impl ParseHandler for Reporter
