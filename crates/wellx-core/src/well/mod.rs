//! Well-treatment record extraction.

mod parser;
pub mod rules;
pub mod strategy;

pub use parser::{ExtractionResult, FieldSource, WellParser, WellRecordParser};
pub use rules::Document;
pub use strategy::{FieldPlan, ResolutionPlan, Strategy, ValueKind};

use crate::models::WellRecord;

/// Trait for well-treatment record extractors.
pub trait RecordExtractor {
    /// Extract a record from ordered page texts.
    fn extract(&self, pages: &[String]) -> WellRecord;

    /// Extract a record from plain text, pages separated by form feeds.
    fn extract_from_text(&self, text: &str) -> WellRecord;
}
