/**
 * @file value.rs
 * @author Krisna Pranav
 * @brief robots-matcher[value]
 * @version 1.0
 * @date 2024-11-25
 *
 * @copyright Copyright (c) 2024 Doodle Developers, Krisna Pranav
 *
 */
use nom::character::complete::u32 as parse_u32;
use nom::number::complete::double as parse_double;

use crate::parser::trim;

type NomError<'a> = nom::error::Error<&'a [u8]>;

fn leading_double(value: &[u8]) -> Option<f64> {
    parse_double::<_, NomError<'_>>(value).ok().map(|(_, v)| v)
}

fn leading_u32(value: &[u8]) -> Option<(&[u8], u32)> {
    parse_u32::<_, NomError<'_>>(value).ok()
}

/// Request-rate directive value: `requests` per `seconds`, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestRate {
    pub requests: u32,
    pub seconds: u32,
} // pub struct RequestRate

impl RequestRate {
    pub fn requests_per_second(&self) -> f64 {
        f64::from(self.requests) / f64::from(self.seconds)
    }

    /// Minimum delay between two requests, in seconds.
    pub fn delay_seconds(&self) -> f64 {
        f64::from(self.seconds) / f64::from(self.requests)
    }
} // impl RequestRate

/// Content-Signal directive value, expressing AI and search usage
/// preferences. An unset field means the publisher stated no preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSignal {
    pub ai_train: Option<bool>,
    pub ai_input: Option<bool>,
    pub search: Option<bool>,
} // pub struct ContentSignal

impl ContentSignal {
    pub fn has_any_signal(&self) -> bool {
        self.ai_train.is_some() || self.ai_input.is_some() || self.search.is_some()
    }

    /// Unset preferences default to permissive.
    pub fn allows_ai_train(&self) -> bool {
        self.ai_train.unwrap_or(true)
    }

    pub fn allows_ai_input(&self) -> bool {
        self.ai_input.unwrap_or(true)
    }

    pub fn allows_search(&self) -> bool {
        self.search.unwrap_or(true)
    }
} // impl ContentSignal

/// Crawl-delay values parse like `strtod`: a leading decimal number with
/// trailing junk ignored. Garbage, negative and non-finite values flatten
/// to 0.0.
pub(crate) fn crawl_delay(value: &[u8]) -> f64 {
    match leading_double(value) {
        Some(seconds) if seconds.is_finite() && seconds >= 0.0 => seconds,
        _ => 0.0,
    }
}

/// Request-rate grammar: `digits [ "/" digits ("s" | "S")? ]`. A missing
/// slash means "per second". A zero or unparseable number on either side
/// drops the whole directive.
pub(crate) fn request_rate(value: &[u8]) -> Option<RequestRate> {
    let (rest, requests) = leading_u32(value)?;
    let seconds = match rest.split_first() {
        Some((b'/', after_slash)) => leading_u32(after_slash)?.1,
        _ => 1,
    };
    if requests == 0 || seconds == 0 {
        return None;
    }
    Some(RequestRate { requests, seconds })
}

/// Content-Signal values are a comma-separated `key=value` list. Keys are
/// case-insensitive; unknown keys and unreadable values are skipped without
/// giving up on the rest of the list.
pub(crate) fn content_signal(value: &[u8]) -> ContentSignal {
    let mut signal = ContentSignal::default();
    for item in value.split(|&b| b == b',') {
        let Some(eq) = item.iter().position(|&b| b == b'=') else {
            continue;
        };
        let name = trim(&item[..eq]);
        let Some(setting) = boolean(trim(&item[eq + 1..])) else {
            continue;
        };
        if name.eq_ignore_ascii_case(b"ai-train") {
            signal.ai_train = Some(setting);
        } else if name.eq_ignore_ascii_case(b"ai-input") {
            signal.ai_input = Some(setting);
        } else if name.eq_ignore_ascii_case(b"search") {
            signal.search = Some(setting);
        }
    }
    signal
}

fn boolean(value: &[u8]) -> Option<bool> {
    if value.eq_ignore_ascii_case(b"yes") || value.eq_ignore_ascii_case(b"true") || value == b"1" {
        Some(true)
    } else if value.eq_ignore_ascii_case(b"no")
        || value.eq_ignore_ascii_case(b"false")
        || value == b"0"
    {
        Some(false)
    } else {
        None
    }
}
