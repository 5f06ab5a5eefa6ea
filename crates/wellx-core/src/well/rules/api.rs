//! API well number canonicalization.

use super::patterns::{API_BARE, API_SEGMENTED};
use super::{ExtractionMatch, FieldExtractor};

/// API number extractor. Produces canonical `NN-NNN-NNNNN[-EXT]` strings.
pub struct ApiExtractor;

impl ApiExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ApiExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for ApiExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let mut results: Vec<Self::Output> = API_SEGMENTED
            .find_iter(text)
            .filter_map(|m| {
                format_api(&digits_of(m.as_str()))
                    .map(|api| ExtractionMatch::new(api, 0.9, m.as_str()).with_position(m.start(), m.end()))
            })
            .collect();

        if results.is_empty() {
            results = API_BARE
                .find_iter(text)
                .filter_map(|m| {
                    format_api(m.as_str())
                        .map(|api| ExtractionMatch::new(api, 0.7, m.as_str()).with_position(m.start(), m.end()))
                })
                .collect();
        }

        results
    }
}

/// Canonicalize the first API number found in `value`.
///
/// Segmented forms (`33-053-12345-01`, `33 053 12345`) are preferred over a
/// bare run of 10 to 14 digits. Fewer than 10 digits yields `None`.
pub fn canonicalize_api(value: &str) -> Option<String> {
    ApiExtractor::new().extract(value.trim()).map(|m| m.value)
}

fn digits_of(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn format_api(digits: &str) -> Option<String> {
    if digits.len() < 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let base = format!("{}-{}-{}", &digits[..2], &digits[2..5], &digits[5..10]);
    let ext = &digits[10..];

    Some(if ext.is_empty() { base } else { format!("{}-{}", base, ext) })
}
