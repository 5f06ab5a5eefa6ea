//! Record assembler: runs the resolution plan over a document.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::models::{Field, WellRecord, WellxConfig};

use super::rules::{
    ContextWindowExtractor, CoordinatePair, CoordinateScanner, DateExtractor, Document,
    ExtractionMatch, FieldExtractor, LabelValueExtractor, RuleSet, WellNameResolver,
};
use super::strategy::{FieldPlan, FieldValue, ResolutionPlan, Strategy, ValueKind};
use super::RecordExtractor;

/// Where a field value came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSource {
    /// Strategy that produced the value.
    pub strategy: Strategy,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Line span for line-based strategies, character span in the document text otherwise.
    pub position: Option<(usize, usize)>,
    /// Raw text the value was converted from.
    pub raw: String,
}

/// Result of record extraction.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: WellRecord,
    /// Provenance of every populated field.
    pub sources: BTreeMap<Field, FieldSource>,
    /// Fields that stayed absent.
    pub missing_fields: Vec<Field>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for record parsing.
pub trait WellParser {
    /// Parse a document into a record with provenance. Never fails.
    fn parse(&self, document: &Document) -> ExtractionResult;
}

/// Rule-based well-treatment record parser.
#[derive(Debug, Clone)]
pub struct WellRecordParser {
    rules: RuleSet,
    plan: ResolutionPlan,
    config: WellxConfig,
}

/// Per-document state; the coordinate pair is computed at most once.
struct Scratch<'d> {
    document: &'d Document,
    coordinates: Option<CoordinatePair>,
    warnings: Vec<String>,
}

impl WellRecordParser {
    /// Create a parser with the standard rules, plan and configuration.
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
            plan: ResolutionPlan::standard(),
            config: WellxConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WellxConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_plan(mut self, plan: ResolutionPlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &WellxConfig {
        &self.config
    }

    fn resolve_field(
        &self,
        plan: &FieldPlan,
        scratch: &mut Scratch<'_>,
    ) -> Option<(FieldValue, FieldSource)> {
        for &strategy in &plan.strategies {
            let Some(found) = self.locate(strategy, plan.field, scratch) else {
                trace!("{}: {:?} found nothing", plan.field, strategy);
                continue;
            };

            let value = match found.value {
                Located::Degrees(v) => Some(FieldValue::Degrees(v)),
                Located::Raw(ref raw) => plan.kind.convert(raw),
            };

            match value {
                Some(value) => {
                    debug!("{}: resolved by {:?}", plan.field, strategy);
                    let source = FieldSource {
                        strategy,
                        confidence: found.confidence,
                        position: found.position,
                        raw: found.source,
                    };
                    return Some((value, source));
                }
                None => {
                    let msg = format!(
                        "Discarded malformed {} value {:?} from {:?}",
                        plan.field, found.source, strategy
                    );
                    debug!("{}", msg);
                    scratch.warnings.push(msg);
                }
            }
        }

        None
    }

    /// Run one strategy for one field.
    fn locate(
        &self,
        strategy: Strategy,
        field: Field,
        scratch: &mut Scratch<'_>,
    ) -> Option<ExtractionMatch<Located>> {
        let document = scratch.document;

        match strategy {
            Strategy::Label => {
                let rule = self.rules.label(field)?;
                let found = LabelValueExtractor::new(&self.rules)
                    .with_lookahead(self.config.extraction.label_lookahead)
                    .extract(document.lines(), &rule.patterns, 0)?;
                let value = found.value?;

                let (line, confidence) = if found.from_lookahead {
                    (found.line + 1, 0.8)
                } else {
                    (found.line, 0.9)
                };
                Some(
                    ExtractionMatch::new(Located::Raw(value.clone()), confidence, value)
                        .with_position(line, line + 1),
                )
            }
            Strategy::Inline => {
                let m = self.rules.inline(field)?.find(document.text())?;
                let (start, end) = char_span(document.text(), m.start(), m.end());
                Some(
                    ExtractionMatch::new(Located::Raw(m.as_str().to_string()), 0.6, m.as_str())
                        .with_position(start, end),
                )
            }
            Strategy::WellName => {
                let m = WellNameResolver::with_config(&self.rules, &self.config.extraction)
                    .resolve(document.lines())?;
                Some(ExtractionMatch {
                    value: Located::Raw(m.value.clone()),
                    confidence: m.confidence,
                    position: m.position,
                    source: m.value,
                })
            }
            Strategy::Coordinates => {
                let pair = scratch.coordinates.get_or_insert_with(|| {
                    CoordinateScanner::with_config(self.config.coordinates.clone())
                        .resolve(document.text())
                });
                let candidate = match field {
                    Field::Latitude => pair.latitude.as_ref()?,
                    Field::Longitude => pair.longitude.as_ref()?,
                    _ => return None,
                };
                let confidence = if pair.score.is_some() { 0.9 } else { 0.5 };

                Some(
                    ExtractionMatch::new(
                        Located::Degrees(candidate.value),
                        confidence,
                        candidate.raw.as_str(),
                    )
                    .with_position(candidate.offset, candidate.offset + candidate.raw.chars().count()),
                )
            }
            Strategy::Context => {
                let details = ContextWindowExtractor::with_config(&self.config.details).extract(document)?;
                Some(ExtractionMatch::new(Located::Raw(details.clone()), 0.6, details))
            }
            Strategy::DateScan => {
                let m = DateExtractor::new().extract(document.text())?;
                Some(ExtractionMatch {
                    value: Located::Raw(m.source.clone()),
                    confidence: 0.5,
                    position: m.position.map(|(start, end)| char_span(document.text(), start, end)),
                    source: m.source,
                })
            }
        }
    }
}

/// Strategy output before conversion.
#[derive(Debug, Clone)]
enum Located {
    Raw(String),
    Degrees(f64),
}

/// Processing-time clock; wasm32 has no monotonic clock, so timings read zero there.
#[cfg(not(target_arch = "wasm32"))]
mod clock {
    use std::time::Instant;

    pub fn start() -> Instant {
        Instant::now()
    }

    pub fn elapsed_ms(start: Instant) -> u64 {
        start.elapsed().as_millis() as u64
    }
}

#[cfg(target_arch = "wasm32")]
mod clock {
    pub fn start() {}

    pub fn elapsed_ms(_start: ()) -> u64 {
        0
    }
}

impl Default for WellRecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl WellParser for WellRecordParser {
    fn parse(&self, document: &Document) -> ExtractionResult {
        let start = clock::start();
        info!(
            "Parsing well document: {} pages, {} lines",
            document.pages().len(),
            document.lines().len()
        );

        let mut scratch = Scratch {
            document,
            coordinates: None,
            warnings: Vec::new(),
        };
        if document.is_blank() {
            scratch.warnings.push("Document has no text".to_string());
        }

        let mut record = WellRecord::new();
        let mut sources = BTreeMap::new();

        for plan in self.plan.fields() {
            if record.has(plan.field) {
                continue;
            }
            let Some((value, source)) = self.resolve_field(plan, &mut scratch) else {
                continue;
            };

            if apply(&mut record, plan.field, plan.kind, value) {
                if plan.kind == ValueKind::Measure && record.volume_units.is_some() {
                    sources.insert(Field::VolumeUnits, source.clone());
                }
                sources.insert(plan.field, source);
            } else {
                scratch
                    .warnings
                    .push(format!("Plan kind {:?} does not fit field {}", plan.kind, plan.field));
            }
        }

        clip_lengths(&mut record);

        let missing_fields = record.missing_fields();
        let processing_time_ms = clock::elapsed_ms(start);
        info!(
            "Extracted {}/{} fields in {} ms",
            Field::ALL.len() - missing_fields.len(),
            Field::ALL.len(),
            processing_time_ms
        );

        ExtractionResult {
            record,
            sources,
            missing_fields,
            warnings: scratch.warnings,
            processing_time_ms,
        }
    }
}

impl RecordExtractor for WellRecordParser {
    fn extract(&self, pages: &[String]) -> WellRecord {
        self.parse(&Document::new(pages.to_vec())).record
    }

    fn extract_from_text(&self, text: &str) -> WellRecord {
        self.parse(&Document::from_text(text)).record
    }
}

/// Store a converted value; `false` when the value type does not fit the field.
fn apply(record: &mut WellRecord, field: Field, kind: ValueKind, value: FieldValue) -> bool {
    match value {
        FieldValue::Text(text) => match record.text_mut(field) {
            Some(slot) => {
                *slot = Some(text);
                true
            }
            None => false,
        },
        FieldValue::Number(number) => match record.decimal_mut(field) {
            Some(slot) => {
                *slot = Some(number);
                true
            }
            None => false,
        },
        FieldValue::Count(count) if field == Field::StimulationStages => {
            record.stimulation_stages = Some(count);
            true
        }
        FieldValue::Measure(number, unit) => match record.decimal_mut(field) {
            Some(slot) => {
                *slot = Some(number);
                if kind == ValueKind::Measure && field == Field::VolumeValue {
                    record.volume_units = unit;
                }
                true
            }
            None => false,
        },
        FieldValue::Degrees(degrees) => match field {
            Field::Latitude => {
                record.latitude = Some(degrees);
                true
            }
            Field::Longitude => {
                record.longitude = Some(degrees);
                true
            }
            _ => false,
        },
        FieldValue::Count(_) => false,
    }
}

/// Trim and clip every string field to its column limit, in characters.
fn clip_lengths(record: &mut WellRecord) {
    for field in Field::ALL {
        let Some(limit) = field.max_len() else {
            continue;
        };
        if let Some(slot) = record.text_mut(field) {
            if let Some(text) = slot.take() {
                let clipped: String = text.trim().chars().take(limit).collect();
                *slot = (!clipped.is_empty()).then_some(clipped);
            }
        }
    }
}

/// Byte span to character span.
fn char_span(text: &str, start: usize, end: usize) -> (usize, usize) {
    let start_chars = text[..start].chars().count();
    (start_chars, start_chars + text[start..end].chars().count())
}
