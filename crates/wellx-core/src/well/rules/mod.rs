//! Rule-based field extractors for well-treatment documents.

pub mod api;
pub mod coordinates;
pub mod dates;
pub mod details;
pub mod labels;
pub mod lines;
pub mod numbers;
pub mod patterns;
pub mod ruleset;
pub mod well_name;

pub use api::{canonicalize_api, ApiExtractor};
pub use coordinates::{Axis, CoordinateCandidate, CoordinatePair, CoordinateScanner, Notation};
pub use dates::{find_date, normalize_date_token, DateExtractor};
pub use details::ContextWindowExtractor;
pub use labels::{LabelMatch, LabelValueExtractor};
pub use lines::{page_lines, Document};
pub use numbers::{parse_number, parse_number_with_unit};
pub use ruleset::{LabelRule, RuleSet};
pub use well_name::{is_plausible_well_name, WellNameResolver};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// Extracted value with its confidence and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Span in the source: byte offsets for text, line indices for line-based rules.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
