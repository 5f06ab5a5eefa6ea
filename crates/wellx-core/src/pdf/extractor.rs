//! PDF page-text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{PdfProcessor, PdfType, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf, with pdf-extract for layout-aware text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted text content of a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Type of PDF content.
    pub pdf_type: PdfType,
    /// Text of each page, in page order.
    pub pages: Vec<String>,
}

impl PdfContent {
    /// Total number of non-whitespace characters across pages.
    pub fn text_len(&self) -> usize {
        self.pages
            .iter()
            .map(|p| p.chars().filter(|c| !c.is_whitespace()).count())
            .sum()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract all page texts and classify the document.
    pub fn extract_all(&self, min_text_length: usize) -> Result<PdfContent> {
        let pages = self.extract_pages()?;
        let mut content = PdfContent {
            pdf_type: PdfType::Empty,
            pages,
        };
        content.pdf_type = PdfType::classify(content.text_len(), min_text_length);

        debug!(
            "PDF analysis: {} pages, {} chars text -> {:?}",
            content.pages.len(),
            content.text_len(),
            content.pdf_type
        );
        Ok(content)
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))
    }

    /// Per-page text from lopdf's content-stream extraction.
    fn lopdf_page_text(&self, doc: &Document, page: u32) -> String {
        match doc.extract_text(&[page]) {
            Ok(text) => text,
            Err(e) => {
                warn!("Text extraction failed on page {}: {}", page, e);
                String::new()
            }
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract reads the bytes itself, so keep the decrypted copy.
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        let doc = self.document()?;
        let page_count = self.page_count();

        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages)
                if pages.len() == page_count as usize && pages.iter().any(|p| !p.trim().is_empty()) =>
            {
                return Ok(pages);
            }
            Ok(pages) => debug!(
                "pdf-extract returned {} usable pages, expected {}; using lopdf",
                pages.iter().filter(|p| !p.trim().is_empty()).count(),
                page_count
            ),
            Err(e) => debug!("pdf-extract failed ({}); using lopdf", e),
        }

        Ok((1..=page_count)
            .map(|page| self.lopdf_page_text(doc, page))
            .collect())
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        let pages = self.extract_pages()?;
        Ok(pages
            .into_iter()
            .nth((page - 1) as usize)
            .unwrap_or_else(|| self.lopdf_page_text(doc, page)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    fn sample_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
        assert!(extractor.extract_pages().is_err());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_extract_pages_in_order() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&sample_pdf(&["Operator ACME", "Stages 30"])).unwrap();

        assert_eq!(extractor.page_count(), 2);
        let pages = extractor.extract_pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("ACME"));
        assert!(pages[1].contains("30"));
    }

    #[test]
    fn test_extract_page_text_bounds() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&sample_pdf(&["Only page"])).unwrap();

        assert!(extractor.extract_page_text(1).unwrap().contains("Only"));
        assert!(matches!(extractor.extract_page_text(0), Err(PdfError::InvalidPage(0))));
        assert!(matches!(extractor.extract_page_text(2), Err(PdfError::InvalidPage(2))));
    }

    #[test]
    fn test_extract_all_classifies() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&sample_pdf(&["short"])).unwrap();

        let content = extractor.extract_all(50).unwrap();
        assert_eq!(content.pdf_type, PdfType::Scanned);
    }
}
