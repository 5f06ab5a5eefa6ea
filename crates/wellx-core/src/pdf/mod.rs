//! PDF page-text extraction.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor};

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains enough extractable text.
    Text,
    /// Little or no text layer; likely a scan that needs OCR.
    Scanned,
    /// No pages with any text at all.
    Empty,
}

impl PdfType {
    /// Classify by total extracted text length.
    pub fn classify(text_len: usize, min_text_length: usize) -> Self {
        if text_len == 0 {
            PdfType::Empty
        } else if text_len < min_text_length {
            PdfType::Scanned
        } else {
            PdfType::Text
        }
    }
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract text from the entire PDF, pages separated by form feeds.
    fn extract_text(&self) -> Result<String> {
        Ok(self.extract_pages()?.join("\x0c"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(PdfType::classify(0, 50), PdfType::Empty);
        assert_eq!(PdfType::classify(12, 50), PdfType::Scanned);
        assert_eq!(PdfType::classify(50, 50), PdfType::Text);
    }
}
