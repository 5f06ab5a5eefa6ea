//! Date normalization.

use chrono::{Datelike, NaiveDate};

use super::patterns::{DATE_ISO, DATE_MONTH_NAME, DATE_NUMERIC};
use super::{ExtractionMatch, FieldExtractor};

/// Formats tried in order when parsing a date token.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%m-%d-%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

/// Date token extractor. Values are ISO `YYYY-MM-DD` when the token parses,
/// otherwise the token itself.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        // Pattern order matters more than position in the text.
        for pattern in [&*DATE_NUMERIC, &*DATE_ISO, &*DATE_MONTH_NAME] {
            if let Some(m) = pattern.find(text) {
                return Some(to_match(m));
            }
        }
        None
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = [&*DATE_NUMERIC, &*DATE_ISO, &*DATE_MONTH_NAME]
            .into_iter()
            .flat_map(|pattern| pattern.find_iter(text).map(to_match))
            .collect();

        results.sort_by_key(|m| m.position);
        results
    }
}

fn to_match(m: regex::Match<'_>) -> ExtractionMatch<String> {
    let parsed = parse_date_token(m.as_str());
    let confidence = if parsed.is_some() { 0.9 } else { 0.4 };
    let value = parsed.map_or_else(|| m.as_str().to_string(), |d| d.format("%Y-%m-%d").to_string());

    ExtractionMatch::new(value, confidence, m.as_str()).with_position(m.start(), m.end())
}

/// Parse a date token with the known formats.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim().replace("  ", " ");

    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(&token, fmt)
            .ok()
            // %Y must be a four-digit year; chrono would accept `21` as year 21.
            .filter(|d| !fmt.contains("%Y") || d.year() >= 1000)
    })
}

/// Normalize a date token to ISO `YYYY-MM-DD`, or return it unchanged.
pub fn normalize_date_token(token: &str) -> String {
    match parse_date_token(token) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => token.trim().replace("  ", " "),
    }
}

/// Find the first date token in `text` and normalize it.
pub fn find_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}
