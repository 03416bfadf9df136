//! Free-text station search and highlight markup
//!
//! The query is always treated as a literal string. Highlighting is done
//! with a hand-rolled case-insensitive scanner rather than any pattern
//! facility, so metacharacters in user input carry no special meaning.

use serde::Serialize;

use crate::types::StationReading;

/// Whether a reading matches a free-text query.
///
/// Empty query matches everything. Otherwise the query must be a
/// case-insensitive substring of the station name, or a case-sensitive
/// substring of the station number.
pub fn matches(reading: &StationReading, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    reading
        .station_name
        .to_lowercase()
        .contains(&query.to_lowercase())
        || reading.station_no.contains(query)
}

/// Filter a reading list by a query, preserving original order.
///
/// The empty query returns the input unchanged; filtering is idempotent.
pub fn filter_readings(readings: &[StationReading], query: &str) -> Vec<StationReading> {
    readings
        .iter()
        .filter(|r| matches(r, query))
        .cloned()
        .collect()
}

/// One segment of highlighted display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub matched: bool,
}

impl Span {
    fn plain(text: String) -> Self {
        Span {
            text,
            matched: false,
        }
    }

    fn hit(text: String) -> Self {
        Span {
            text,
            matched: true,
        }
    }
}

/// Byte length of `haystack`'s prefix that equals `needle` ignoring case,
/// or `None` when it does not start with it.
fn ci_prefix_len(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.chars();
    let mut consumed = 0;
    for nc in needle.chars() {
        let hc = hay.next()?;
        if !hc.to_lowercase().eq(nc.to_lowercase()) {
            return None;
        }
        consumed += hc.len_utf8();
    }
    Some(consumed)
}

/// Split display text on case-insensitive occurrences of the query,
/// flagging matched segments for emphasis.
///
/// An empty query returns the text unmodified as a single unmatched span.
pub fn highlight(text: &str, query: &str) -> Vec<Span> {
    if query.is_empty() {
        return vec![Span::plain(text.to_string())];
    }

    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(len) = ci_prefix_len(rest, query) {
            if !plain.is_empty() {
                spans.push(Span::plain(std::mem::take(&mut plain)));
            }
            spans.push(Span::hit(rest[..len].to_string()));
            rest = &rest[len..];
        } else {
            let Some(ch) = rest.chars().next() else { break };
            plain.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    if !plain.is_empty() {
        spans.push(Span::plain(plain));
    }
    spans
}
