//! Text normalization: raw page text into ordered, non-empty lines.

/// Page separator used by plain-text documents.
pub const PAGE_BREAK: char = '\x0c';

/// Normalize raw text into clean lines.
///
/// Carriage returns become line breaks, runs of spaces and tabs collapse to a
/// single space, and lines are trimmed with empty ones dropped.
pub fn page_lines(text: &str) -> Vec<String> {
    text.replace('\r', "\n")
        .split('\n')
        .map(collapse_spaces)
        .filter(|line| !line.is_empty())
        .collect()
}

fn collapse_spaces(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut in_run = false;

    for c in line.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }

    out.trim().to_string()
}

/// An immutable document: its pages, their concatenation and the normalized lines.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<String>,
    text: String,
    lines: Vec<String>,
}

impl Document {
    /// Build a document from ordered page texts. Empty pages are allowed.
    pub fn new(pages: Vec<String>) -> Self {
        let text = pages.join("\n");
        let lines = page_lines(&text);
        Self { pages, text, lines }
    }

    /// Build a document from plain text, splitting pages on form feeds.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split(PAGE_BREAK).map(str::to_string).collect())
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Page texts joined with line breaks, otherwise untouched.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Normalized lines of the whole document.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Normalized lines of each page, in page order.
    pub fn page_lines(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.pages.iter().map(|page| page_lines(page))
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for Document {
    fn from(pages: Vec<String>) -> Self {
        Self::new(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_lines_normalizes_whitespace() {
        let lines = page_lines("  Operator:\t\tACME   OIL \r\r\n\n\nWell Name:  X-1  \n   \n");
        assert_eq!(lines, vec!["Operator: ACME OIL", "Well Name: X-1"]);
    }

    #[test]
    fn test_page_lines_empty() {
        assert!(page_lines("").is_empty());
        assert!(page_lines(" \t \r\n ").is_empty());
    }

    #[test]
    fn test_document_joins_pages() {
        let doc = Document::new(vec![
            "Page one\nline 2".to_string(),
            String::new(),
            "Page three".to_string(),
        ]);

        assert_eq!(doc.text(), "Page one\nline 2\n\nPage three");
        assert_eq!(doc.lines(), &["Page one", "line 2", "Page three"]);
        assert_eq!(doc.page_lines().count(), 3);
        assert!(!doc.is_blank());
    }

    #[test]
    fn test_document_from_text_splits_form_feeds() {
        let doc = Document::from_text("first page\x0csecond page");
        assert_eq!(doc.pages().len(), 2);
        assert_eq!(doc.pages()[1], "second page");
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::new(Vec::new());
        assert!(doc.is_blank());
        assert_eq!(doc.text(), "");
    }
}
