//! Keyword context windows for the free-text details field.

use std::collections::HashSet;

use regex::Regex;

use crate::models::config::DetailsConfig;

use super::lines::Document;
use super::patterns::DETAIL_KEYWORDS;
use super::ExtractionMatch;

/// Collects the lines following each keyword line, page by page.
#[derive(Debug, Clone)]
pub struct ContextWindowExtractor {
    keywords: Regex,
    window: usize,
    separator: String,
    max_len: usize,
}

impl ContextWindowExtractor {
    pub fn new() -> Self {
        Self::with_config(&DetailsConfig::default())
    }

    pub fn with_config(config: &DetailsConfig) -> Self {
        Self {
            keywords: DETAIL_KEYWORDS.clone(),
            window: config.window,
            separator: config.separator.clone(),
            max_len: config.max_len,
        }
    }

    pub fn with_keywords(mut self, keywords: Regex) -> Self {
        self.keywords = keywords;
        self
    }

    /// Blocks of one page: every keyword line plus the lines after it, up to
    /// the window size, joined by single spaces. Positions are line spans.
    pub fn blocks(&self, lines: &[String]) -> Vec<ExtractionMatch<String>> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.keywords.is_match(line))
            .map(|(i, line)| {
                let end = (i + self.window).min(lines.len());
                let block = lines[i..end]
                    .iter()
                    .flat_map(|l| l.split_whitespace())
                    .collect::<Vec<_>>()
                    .join(" ");
                ExtractionMatch::new(block, 0.6, line.as_str()).with_position(i, end)
            })
            .collect()
    }

    /// De-duplicated blocks of the whole document, joined and capped.
    pub fn extract(&self, document: &Document) -> Option<String> {
        let mut seen = HashSet::new();
        let mut blocks = Vec::new();

        for page in document.page_lines() {
            for block in self.blocks(&page) {
                if seen.insert(block.value.clone()) {
                    blocks.push(block.value);
                }
            }
        }

        if blocks.is_empty() {
            return None;
        }

        let joined = blocks.join(&self.separator);
        Some(joined.chars().take(self.max_len).collect())
    }
}

impl Default for ContextWindowExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_blocks_take_window() {
        let extractor = ContextWindowExtractor::with_config(&DetailsConfig {
            window: 2,
            ..DetailsConfig::default()
        });
        let blocks = extractor.blocks(&lines("Header\nFrac job summary\n30 stages\nEnd"));

        let values: Vec<_> = blocks.iter().map(|b| b.value.as_str()).collect();
        assert_eq!(values, vec!["Frac job summary 30 stages", "30 stages End"]);
        assert_eq!(blocks[0].position, Some((1, 3)));
    }

    #[test]
    fn test_extract_dedups_and_joins() {
        let doc = Document::new(vec![
            "Hydraulic fracturing\nSand".to_string(),
            "Hydraulic fracturing\nSand".to_string(),
            "Max pressure 9000".to_string(),
        ]);

        let details = ContextWindowExtractor::new().extract(&doc).unwrap();
        assert_eq!(details, "Hydraulic fracturing Sand | Max pressure 9000");
    }

    #[test]
    fn test_windows_do_not_cross_pages() {
        let doc = Document::new(vec!["Acidized well".to_string(), "next page".to_string()]);
        assert_eq!(ContextWindowExtractor::new().extract(&doc).as_deref(), Some("Acidized well"));
    }

    #[test]
    fn test_cap_applies_to_characters() {
        let doc = Document::new(vec![format!("Stimulation {}", "é".repeat(2000))]);
        let details = ContextWindowExtractor::new().extract(&doc).unwrap();
        assert_eq!(details.chars().count(), 1200);
    }

    #[test]
    fn test_no_keywords() {
        let doc = Document::new(vec!["Operator: ACME".to_string()]);
        assert_eq!(ContextWindowExtractor::new().extract(&doc), None);
    }

    #[test]
    fn test_custom_keywords() {
        let doc = Document::new(vec!["Flowback started".to_string()]);
        let extractor =
            ContextWindowExtractor::new().with_keywords(Regex::new(r"(?i)flowback").unwrap());
        assert_eq!(extractor.extract(&doc).as_deref(), Some("Flowback started"));
    }
}
