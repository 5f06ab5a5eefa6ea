//! Per-field resolution plans.
//!
//! Each record field has an ordered list of strategies. The parser runs them in
//! order and keeps the first value that converts cleanly; a value that fails
//! conversion is discarded and the next strategy is tried.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::Field;

use super::rules::dates::find_date;
use super::rules::numbers::{parse_number, parse_number_with_unit, to_count};
use super::rules::api::canonicalize_api;

/// A way of locating a raw value in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The field's label rule, scanned over the normalized lines.
    Label,
    /// The field's whole-document inline regex.
    Inline,
    /// The multi-pass well-name resolver.
    WellName,
    /// The coordinate scanner and pairer.
    Coordinates,
    /// Keyword context windows.
    Context,
    /// First date token anywhere in the document.
    DateScan,
}

/// How raw text becomes a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Non-empty trimmed text.
    Text,
    /// Canonical API number.
    Api,
    /// ISO date, or the raw date token when it does not parse.
    Date,
    /// Decimal number.
    Number,
    /// Whole count.
    Count,
    /// Decimal number with an optional unit.
    Measure,
    /// Signed decimal degrees; produced directly by [`Strategy::Coordinates`].
    Degrees,
}

/// A converted field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Count(u32),
    Measure(Decimal, Option<String>),
    Degrees(f64),
}

impl ValueKind {
    /// Convert raw text; `None` means the value is malformed for this kind.
    pub fn convert(&self, raw: &str) -> Option<FieldValue> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match self {
            ValueKind::Text => Some(FieldValue::Text(raw.to_string())),
            ValueKind::Api => canonicalize_api(raw).map(FieldValue::Text),
            ValueKind::Date => find_date(raw).map(FieldValue::Text),
            ValueKind::Number => parse_number(raw).map(FieldValue::Number),
            ValueKind::Count => parse_number(raw).and_then(to_count).map(FieldValue::Count),
            ValueKind::Measure => {
                parse_number_with_unit(raw).map(|(value, unit)| FieldValue::Measure(value, unit))
            }
            ValueKind::Degrees => raw.parse().ok().map(FieldValue::Degrees),
        }
    }
}

/// Ordered strategies for one field.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub field: Field,
    pub kind: ValueKind,
    pub strategies: Vec<Strategy>,
}

impl FieldPlan {
    pub fn new(field: Field, kind: ValueKind, strategies: Vec<Strategy>) -> Self {
        Self { field, kind, strategies }
    }
}

/// Resolution plan for a whole record, in resolution order.
#[derive(Debug, Clone)]
pub struct ResolutionPlan {
    fields: Vec<FieldPlan>,
}

impl ResolutionPlan {
    /// The standard plan. Volume units have no entry of their own; they come
    /// with the volume measure. Every date field goes through date
    /// normalization with a document-wide date scan as the last resort.
    pub fn standard() -> Self {
        use Strategy::*;
        use ValueKind::*;

        let mut fields = vec![
            FieldPlan::new(Field::WellNameNumber, Text, vec![WellName]),
            FieldPlan::new(Field::OperatorCompany, Text, vec![Label]),
            FieldPlan::new(Field::Address, Text, vec![Label]),
        ];
        fields.extend(
            Field::ALL
                .into_iter()
                .filter(Field::is_date)
                .map(|field| FieldPlan::new(field, Date, vec![Label, Inline, DateScan])),
        );
        fields.extend([
            FieldPlan::new(Field::StimulatedFormation, Text, vec![Label]),
            FieldPlan::new(Field::JobType, Text, vec![Label]),
            FieldPlan::new(Field::TreatmentType, Text, vec![Label]),
            FieldPlan::new(Field::TopFt, Number, vec![Label]),
            FieldPlan::new(Field::BottomFt, Number, vec![Label]),
            FieldPlan::new(Field::StimulationStages, Count, vec![Label, Inline]),
            FieldPlan::new(Field::AcidPercent, Number, vec![Label, Inline]),
            FieldPlan::new(Field::LbsProppant, Number, vec![Label]),
            FieldPlan::new(Field::Latitude, Degrees, vec![Coordinates]),
            FieldPlan::new(Field::Longitude, Degrees, vec![Coordinates]),
            FieldPlan::new(Field::ApiNumber, Api, vec![Label]),
            FieldPlan::new(Field::VolumeValue, Measure, vec![Label, Inline]),
            FieldPlan::new(Field::MaxTreatmentPressurePsi, Number, vec![Label, Inline]),
            FieldPlan::new(Field::MaxTreatmentRateBblsPerMin, Number, vec![Label, Inline]),
            FieldPlan::new(Field::Details, Text, vec![Context]),
        ]);

        Self { fields }
    }

    /// An empty plan, to be filled with [`ResolutionPlan::with_field`].
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Replace the plan for `plan.field`, or append it.
    pub fn with_field(mut self, plan: FieldPlan) -> Self {
        match self.fields.iter_mut().find(|p| p.field == plan.field) {
            Some(existing) => *existing = plan,
            None => self.fields.push(plan),
        }
        self
    }

    /// Drop a field from the plan; it will always be absent.
    pub fn without(mut self, field: Field) -> Self {
        self.fields.retain(|p| p.field != field);
        self
    }

    pub fn fields(&self) -> &[FieldPlan] {
        &self.fields
    }

    pub fn get(&self, field: Field) -> Option<&FieldPlan> {
        self.fields.iter().find(|p| p.field == field)
    }
}

impl Default for ResolutionPlan {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_record() {
        let plan = ResolutionPlan::standard();
        for field in Field::ALL {
            if field == Field::VolumeUnits {
                assert!(plan.get(field).is_none());
            } else {
                assert!(plan.get(field).is_some(), "{} has no plan", field);
            }
        }
    }

    #[test]
    fn test_date_fields_normalized() {
        let plan = ResolutionPlan::standard();
        for field in Field::ALL {
            let Some(p) = plan.get(field) else { continue };
            assert_eq!(p.kind == ValueKind::Date, field.is_date(), "{}", field);
            if field.is_date() {
                assert_eq!(p.strategies.last(), Some(&Strategy::DateScan));
            }
        }
        assert_eq!(plan.fields()[3].field, Field::DateStimulated);
    }

    #[test]
    fn test_convert() {
        assert_eq!(ValueKind::Text.convert("  ACME "), Some(FieldValue::Text("ACME".into())));
        assert_eq!(ValueKind::Text.convert("   "), None);
        assert_eq!(ValueKind::Number.convert("10,250 ft"), Some(FieldValue::Number(Decimal::new(10250, 0))));
        assert_eq!(ValueKind::Number.convert("n/a"), None);
        assert_eq!(ValueKind::Count.convert("30 stages"), Some(FieldValue::Count(30)));
        assert_eq!(
            ValueKind::Measure.convert("9,000 Gal"),
            Some(FieldValue::Measure(Decimal::new(9000, 0), Some("gal".into())))
        );
        assert_eq!(ValueKind::Api.convert("33 053 12345"), Some(FieldValue::Text("33-053-12345".into())));
        assert_eq!(ValueKind::Api.convert("12"), None);
        assert_eq!(ValueKind::Date.convert("3/4/2021"), Some(FieldValue::Text("2021-03-04".into())));
        assert_eq!(ValueKind::Date.convert("pending"), None);
        assert_eq!(ValueKind::Degrees.convert("-103.25"), Some(FieldValue::Degrees(-103.25)));
    }

    #[test]
    fn test_with_field_and_without() {
        let plan = ResolutionPlan::standard()
            .with_field(FieldPlan::new(Field::TopFt, ValueKind::Number, vec![Strategy::Label, Strategy::Inline]))
            .without(Field::Details);

        assert_eq!(plan.get(Field::TopFt).unwrap().strategies.len(), 2);
        assert!(plan.get(Field::Details).is_none());
        assert!(ResolutionPlan::empty().fields().is_empty());
    }
}
