//! Turning input files into documents.

use std::path::Path;

use tracing::{debug, info, warn};

use wellx_core::pdf::{PdfExtractor, PdfProcessor, PdfType};
use wellx_core::{Document, WellxConfig};

use crate::ocr::ocr_pdf;

/// Kinds of input the CLI accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    /// Plain text, pages separated by form feeds.
    Text,
}

impl SourceKind {
    /// Detect the kind from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" | "text" => Some(SourceKind::Text),
            _ => None,
        }
    }
}

/// Options for loading a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Never run OCR, even on scanned PDFs.
    pub no_ocr: bool,
}

/// Load `path` as a document.
///
/// Unreadable or unsupported files are errors. A PDF whose text cannot be
/// extracted becomes an empty document, which yields an all-null record.
pub async fn load_document(
    path: &Path,
    config: &WellxConfig,
    options: LoadOptions,
) -> anyhow::Result<Document> {
    let Some(kind) = SourceKind::from_path(path) else {
        anyhow::bail!("Unsupported file format: {}", path.display());
    };

    match kind {
        SourceKind::Text => {
            let text = tokio::fs::read_to_string(path).await?;
            Ok(Document::from_text(&text))
        }
        SourceKind::Pdf => {
            let data = tokio::fs::read(path).await?;
            Ok(Document::new(pdf_pages(data, config, options).await))
        }
    }
}

async fn pdf_pages(data: Vec<u8>, config: &WellxConfig, options: LoadOptions) -> Vec<String> {
    let min_text_length = config.pdf.min_text_length;
    let (pages, pdf_type) = extract_blocking(data.clone(), min_text_length).await;

    if pdf_type == PdfType::Text || options.no_ocr || !config.ocr.enabled {
        return pages;
    }

    info!("PDF has {:?} text layer, running OCR", pdf_type);
    let ocred = ocr_pdf(&data, &config.ocr).await;
    if ocred == data {
        return pages;
    }

    let (ocr_pages, ocr_type) = extract_blocking(ocred, min_text_length).await;
    debug!("After OCR: {:?}", ocr_type);
    if ocr_pages.is_empty() { pages } else { ocr_pages }
}

/// Page texts and classification; any failure is an empty page list.
async fn extract_blocking(data: Vec<u8>, min_text_length: usize) -> (Vec<String>, PdfType) {
    let result = tokio::task::spawn_blocking(move || {
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        extractor.extract_all(min_text_length)
    })
    .await;

    match result {
        Ok(Ok(content)) => (content.pages, content.pdf_type),
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {}", e);
            (Vec::new(), PdfType::Empty)
        }
        Err(e) => {
            warn!("PDF text extraction panicked: {}", e);
            (Vec::new(), PdfType::Empty)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::from_path(&PathBuf::from("a/REPORT.PDF")), Some(SourceKind::Pdf));
        assert_eq!(SourceKind::from_path(&PathBuf::from("b.txt")), Some(SourceKind::Text));
        assert_eq!(SourceKind::from_path(&PathBuf::from("c.png")), None);
        assert_eq!(SourceKind::from_path(&PathBuf::from("noext")), None);
    }

    #[tokio::test]
    async fn test_text_pages_split_on_form_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "Operator: ACME\x0cStages: 30").unwrap();

        let doc = load_document(&path, &WellxConfig::default(), LoadOptions::default())
            .await
            .unwrap();
        assert_eq!(doc.pages().len(), 2);
    }

    #[tokio::test]
    async fn test_broken_pdf_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not really a pdf").unwrap();

        let options = LoadOptions { no_ocr: true };
        let doc = load_document(&path, &WellxConfig::default(), options).await.unwrap();
        assert!(doc.is_blank());
    }

    #[tokio::test]
    async fn test_unsupported_extension() {
        let path = PathBuf::from("scan.png");
        assert!(load_document(&path, &WellxConfig::default(), LoadOptions::default())
            .await
            .is_err());
    }
}
