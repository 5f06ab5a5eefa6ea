//! Label-value extraction over normalized lines.

use regex::Regex;
use tracing::trace;

use super::ruleset::{trim_value, RuleSet};

/// Result of a label lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatch {
    /// Spillover-trimmed value; `None` when the label was found without a value.
    pub value: Option<String>,
    /// Index of the line carrying the label.
    pub line: usize,
    /// Whether the value came from a line below the label.
    pub from_lookahead: bool,
}

/// Finds the value attached to a label: same-line capture first, then a
/// bounded look at the following lines.
pub struct LabelValueExtractor<'a> {
    rules: &'a RuleSet,
    lookahead: usize,
}

impl<'a> LabelValueExtractor<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules, lookahead: 2 }
    }

    /// Set how many lines below a bare label are considered.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Look up the first occurrence of any pattern, in pattern priority order,
    /// scanning lines from `start`.
    ///
    /// Returns `None` when no pattern matches anywhere after `start`. A label
    /// found with nothing usable after it yields a match whose value is `None`.
    pub fn extract(&self, lines: &[String], patterns: &[Regex], start: usize) -> Option<LabelMatch> {
        for pattern in patterns {
            for (index, line) in lines.iter().enumerate().skip(start) {
                let Some(caps) = pattern.captures(line) else {
                    continue;
                };

                let same_line = match caps.name("val") {
                    Some(val) => val.as_str(),
                    None => caps.get(0).map_or("", |m| &line[m.end()..]),
                };

                let mut candidate = trim_value(same_line).to_string();
                let mut from_lookahead = false;

                if candidate.is_empty() {
                    if let Some(next) = self.look_below(lines, index) {
                        candidate = next.to_string();
                        from_lookahead = true;
                    }
                }

                let value = self.rules.trim_spillover(&candidate);
                trace!("label {:?} matched line {}: {:?}", pattern.as_str(), index, value);

                return Some(LabelMatch {
                    value: (!value.is_empty()).then_some(value),
                    line: index,
                    from_lookahead,
                });
            }
        }

        None
    }

    /// First line below `index` within the lookahead window, unless a stop
    /// line comes first.
    fn look_below<'l>(&self, lines: &'l [String], index: usize) -> Option<&'l str> {
        let next = lines.iter().skip(index + 1).take(self.lookahead).next()?;
        if self.rules.is_stop_line(next) {
            return None;
        }
        Some(next.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well::rules::patterns::{API_LABEL, FORMATION_LABEL, OPERATOR_LABEL, TOP_LABEL};
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_same_line_value() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Header\nOperator: ACME OIL CO.\nOther");

        let m = extractor.extract(&doc, &[OPERATOR_LABEL.clone()], 0).unwrap();
        assert_eq!(m.value.as_deref(), Some("ACME OIL CO"));
        assert_eq!(m.line, 1);
        assert!(!m.from_lookahead);
    }

    #[test]
    fn test_lookahead_value() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Stimulated Formation\nBAKKEN\nMore");

        let m = extractor.extract(&doc, &[FORMATION_LABEL.clone()], 0).unwrap();
        assert_eq!(m.value.as_deref(), Some("BAKKEN"));
        assert!(m.from_lookahead);
    }

    #[test]
    fn test_lookahead_stops_at_section_header() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Operator:\nTelephone Number\nACME");

        let m = extractor.extract(&doc, &[OPERATOR_LABEL.clone()], 0).unwrap();
        assert_eq!(m.value, None);
        assert_eq!(m.line, 0);
    }

    #[test]
    fn test_lookahead_zero() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules).with_lookahead(0);
        let doc = lines("Formation:\nBAKKEN");

        let m = extractor.extract(&doc, &[FORMATION_LABEL.clone()], 0).unwrap();
        assert_eq!(m.value, None);
    }

    #[test]
    fn test_spillover_trimmed() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Formation: Middle Bakken Pool: Bakken County: McKenzie");

        let m = extractor.extract(&doc, &[FORMATION_LABEL.clone()], 0).unwrap();
        assert_eq!(m.value.as_deref(), Some("Middle Bakken"));
    }

    #[test]
    fn test_start_index_and_no_match() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Top (ft): 10,250\nTop (ft): 11,000");

        let m = extractor.extract(&doc, &[TOP_LABEL.clone()], 1).unwrap();
        assert_eq!(m.value.as_deref(), Some("11,000"));
        assert_eq!(m.line, 1);

        assert!(extractor.extract(&doc, &[API_LABEL.clone()], 0).is_none());
        assert!(extractor.extract(&doc, &[TOP_LABEL.clone()], 5).is_none());
    }

    #[test]
    fn test_pattern_priority_over_line_order() {
        let rules = RuleSet::standard();
        let extractor = LabelValueExtractor::new(&rules);
        let doc = lines("Formation: BAKKEN\nOperator: ACME");

        let m = extractor
            .extract(&doc, &[OPERATOR_LABEL.clone(), FORMATION_LABEL.clone()], 0)
            .unwrap();
        assert_eq!(m.value.as_deref(), Some("ACME"));
        assert_eq!(m.line, 1);
    }
}
