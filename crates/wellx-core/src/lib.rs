//! Core library for well-treatment record extraction.
//!
//! This crate provides:
//! - Text normalization of OCR'd page text
//! - Rule-based field extraction (labels, well names, coordinates, API numbers, dates, volumes)
//! - Per-field resolution plans with provenance
//! - Well-treatment record and configuration models
//! - PDF page-text extraction (feature `pdf`)

pub mod error;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod well;

pub use error::{PdfError, Result, WellxError};
pub use models::{Field, WellRecord, WellxConfig};
#[cfg(feature = "pdf")]
pub use pdf::{PdfContent, PdfExtractor, PdfProcessor, PdfType};
pub use well::{
    Document, ExtractionResult, FieldPlan, FieldSource, RecordExtractor, ResolutionPlan, Strategy,
    ValueKind, WellParser, WellRecordParser,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
