//! Well name resolution.
//!
//! Well names sit next to one of several label wordings, frequently on the line
//! below, and often behind a "see attached" cross-reference. The resolver walks
//! every label occurrence in order and only falls back to a heuristic scan of
//! the document head when no occurrence yields a plausible name.

use tracing::debug;

use crate::models::config::ExtractionConfig;

use super::labels::LabelValueExtractor;
use super::patterns::{ADDRESS_LIKE, HEADER_WORDS, LETTER_DIGIT_MIX, STREET_HINT};
use super::ruleset::{RuleSet, VALUE_TRIM};
use super::ExtractionMatch;

/// Multi-pass well-name resolver.
pub struct WellNameResolver<'a> {
    rules: &'a RuleSet,
    scan_depth: usize,
    fallback_lines: usize,
    min_len: usize,
    max_len: usize,
}

impl<'a> WellNameResolver<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self::with_config(rules, &ExtractionConfig::default())
    }

    pub fn with_config(rules: &'a RuleSet, config: &ExtractionConfig) -> Self {
        Self {
            rules,
            scan_depth: config.well_name_scan_depth,
            fallback_lines: config.well_name_fallback_lines,
            min_len: config.well_name_min_len,
            max_len: config.well_name_max_len,
        }
    }

    /// Resolve the well name. The match position is the line span of the value.
    pub fn resolve(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        let labels = LabelValueExtractor::new(self.rules).with_lookahead(0);
        let mut start = 0;

        while let Some(found) = labels.extract(lines, &self.rules.well_name_labels, start) {
            if let Some(m) = self.scan_below(lines, found.line) {
                return Some(m);
            }

            if let Some(value) = found.value.as_deref() {
                if !self.rules.is_cross_reference(value) {
                    let value = self.rules.trim_spillover(value);
                    if self.is_plausible(&value) {
                        debug!("Well name from label line {}", found.line);
                        return Some(
                            ExtractionMatch::new(value, 0.9, lines[found.line].as_str())
                                .with_position(found.line, found.line + 1),
                        );
                    }
                }
            }

            start = found.line + 1;
        }

        self.fallback(lines)
    }

    /// Look at the lines under a label until a section header or another label.
    fn scan_below(&self, lines: &[String], label_line: usize) -> Option<ExtractionMatch<String>> {
        let below = lines.iter().enumerate().skip(label_line + 1).take(self.scan_depth);

        for (index, line) in below {
            let candidate = line.trim();
            if candidate.is_empty() {
                continue;
            }
            if self.rules.is_stop_line(candidate) || self.rules.is_well_name_label(candidate) {
                break;
            }
            if self.rules.is_cross_reference(candidate) {
                continue;
            }

            let candidate = self.rules.trim_spillover(candidate);
            if self.is_plausible(&candidate) {
                debug!("Well name from line {} below label line {}", index, label_line);
                return Some(
                    ExtractionMatch::new(candidate, 0.95, line.as_str())
                        .with_position(index, index + 1),
                );
            }
        }

        None
    }

    /// Last resort: the first line near the top that looks like a name with a number.
    fn fallback(&self, lines: &[String]) -> Option<ExtractionMatch<String>> {
        for (index, line) in lines.iter().enumerate().take(self.fallback_lines) {
            let candidate = self.rules.trim_spillover(self.rules.strip_well_name_label(line));
            if self.is_plausible(&candidate) && LETTER_DIGIT_MIX.is_match(&candidate) {
                debug!("Well name from fallback scan at line {}", index);
                return Some(
                    ExtractionMatch::new(candidate, 0.5, line.as_str())
                        .with_position(index, index + 1),
                );
            }
        }

        None
    }

    /// Check a candidate against the configured length bounds and the content rules.
    pub fn is_plausible(&self, value: &str) -> bool {
        plausible_within(value, self.min_len, self.max_len)
    }
}

/// Plausibility check for a well name with the default length bounds.
pub fn is_plausible_well_name(value: &str) -> bool {
    let config = ExtractionConfig::default();
    plausible_within(value, config.well_name_min_len, config.well_name_max_len)
}

fn plausible_within(value: &str, min_len: usize, max_len: usize) -> bool {
    let value = value.trim_matches(VALUE_TRIM).trim();
    let len = value.chars().count();

    if len < min_len || len > max_len {
        return false;
    }
    if !value.chars().any(|c| c.is_ascii_alphabetic()) || !value.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    !(ADDRESS_LIKE.is_match(value) || STREET_HINT.is_match(value) || HEADER_WORDS.is_match(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    fn resolve(text: &str) -> Option<String> {
        let rules = RuleSet::standard();
        WellNameResolver::new(&rules).resolve(&lines(text)).map(|m| m.value)
    }

    #[test]
    fn test_cross_reference_skipped() {
        let text = "Well Name and Number: see attached\n\
                    see page 2\n\
                    Attachment A\n\
                    BISON UNIT 4-12H";

        assert_eq!(resolve(text).as_deref(), Some("BISON UNIT 4-12H"));
    }

    #[test]
    fn test_same_line_value_with_spillover() {
        let text = "Well Name and Number: JOHNSON 1-2H Qtr-Qtr NWNE Section 5\n\
                    Township 153 N";

        assert_eq!(resolve(text).as_deref(), Some("JOHNSON 1-2H"));
    }

    #[test]
    fn test_value_below_label() {
        let text = "Well or Facility Name\nDAKOTA 2-11H\nOperator: ACME";
        let rules = RuleSet::standard();
        let m = WellNameResolver::new(&rules).resolve(&lines(text)).unwrap();

        assert_eq!(m.value, "DAKOTA 2-11H");
        assert_eq!(m.position, Some((1, 2)));
    }

    #[test]
    fn test_advances_to_next_label_occurrence() {
        let text = "Well Name and Number: see below\n\
                    Operator: ACME\n\
                    Address: 1 Main Street\n\
                    Notes\n\
                    Well Name and Number: DAKOTA 2-11H\n\
                    Field: SANISH";

        assert_eq!(resolve(text).as_deref(), Some("DAKOTA 2-11H"));
    }

    #[test]
    fn test_repeated_label_ends_scan() {
        let text = "Well Name and Number\n\
                    Facility Name\n\
                    RIVER 7-3H";
        let rules = RuleSet::standard();
        let m = WellNameResolver::new(&rules).resolve(&lines(text)).unwrap();

        // Only the head scan reaches the name.
        assert_eq!(m.value, "RIVER 7-3H");
        assert_eq!(m.confidence, 0.5);
    }

    #[test]
    fn test_fallback_scan() {
        let text = "COMPLETION REPORT\nBISON 4-12H\nPage 2";
        let rules = RuleSet::standard();
        let m = WellNameResolver::new(&rules).resolve(&lines(text)).unwrap();

        assert_eq!(m.value, "BISON 4-12H");
        assert_eq!(m.confidence, 0.5);
    }

    #[test]
    fn test_nothing_plausible() {
        assert_eq!(resolve("COMPLETION REPORT\nOperator: ACME\n"), None);
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_plausibility() {
        assert!(is_plausible_well_name("BISON UNIT 4-12H"));
        assert!(is_plausible_well_name("Johnson 1-2H."));
        assert!(!is_plausible_well_name("AB"));
        assert!(!is_plausible_well_name("NO DIGITS HERE"));
        assert!(!is_plausible_well_name("12345"));
        assert!(!is_plausible_well_name("Bismarck, ND 58505"));
        assert!(!is_plausible_well_name("Houston, TX 77002"));
        assert!(!is_plausible_well_name("PO Box 1234"));
        assert!(!is_plausible_well_name("100 Main Street"));
        assert!(!is_plausible_well_name("Production Rate 24 hours"));
        assert!(!is_plausible_well_name("Unit: 5"));
        assert!(!is_plausible_well_name("Spacing Unit 640"));
        assert!(!is_plausible_well_name(&"A1".repeat(61)));
    }
}
