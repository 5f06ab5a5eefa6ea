//! Immutable rule tables shared by every extraction.

use regex::Regex;

use crate::models::Field;

use super::patterns::*;

/// Characters stripped from both ends of captured values.
pub const VALUE_TRIM: &[char] = &[' ', ':', '.', '-'];

/// Strip [`VALUE_TRIM`] from both ends, keeping a decimal point that leads a
/// number (`.5 bbls`).
pub fn trim_value(value: &str) -> &str {
    let value = value.trim_end_matches(VALUE_TRIM);
    let trimmed = value.trim_start_matches(VALUE_TRIM);
    let lead = value.len() - trimmed.len();

    if value[..lead].ends_with('.') && trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        &value[lead - 1..]
    } else {
        trimmed
    }
}

/// Ordered label patterns for one record field. The first structural match wins.
#[derive(Debug, Clone)]
pub struct LabelRule {
    pub field: Field,
    pub patterns: Vec<Regex>,
}

impl LabelRule {
    pub fn new(field: Field, patterns: Vec<Regex>) -> Self {
        Self { field, patterns }
    }
}

/// Whole-document regex used when a field has no labeled value.
#[derive(Debug, Clone)]
pub struct InlineRule {
    pub field: Field,
    pub pattern: Regex,
}

/// Label, stop and spillover tables used by the extractors.
///
/// Built once with [`RuleSet::standard`] and passed by reference; nothing
/// mutates it during extraction, so it can be shared across worker threads.
#[derive(Debug, Clone)]
pub struct RuleSet {
    labels: Vec<LabelRule>,
    inline: Vec<InlineRule>,
    pub well_name_labels: Vec<Regex>,
    pub well_name_repeat: Regex,
    pub well_name_prefix: Regex,
    pub cross_reference: Regex,
    pub stop_at: Regex,
    pub spillover: Regex,
}

impl RuleSet {
    /// The standard rule tables for completion and stimulation reports.
    pub fn standard() -> Self {
        let labels = vec![
            LabelRule::new(Field::OperatorCompany, vec![OPERATOR_LABEL.clone()]),
            LabelRule::new(Field::ApiNumber, vec![API_LABEL.clone()]),
            LabelRule::new(Field::Address, vec![ADDRESS_LABEL.clone()]),
            LabelRule::new(Field::DateStimulated, vec![DATE_STIMULATED_LABEL.clone()]),
            LabelRule::new(Field::StimulatedFormation, vec![FORMATION_LABEL.clone()]),
            LabelRule::new(Field::JobType, vec![JOB_TYPE_LABEL.clone()]),
            LabelRule::new(Field::TreatmentType, vec![TREATMENT_TYPE_LABEL.clone()]),
            LabelRule::new(Field::TopFt, vec![TOP_LABEL.clone()]),
            LabelRule::new(Field::BottomFt, vec![BOTTOM_LABEL.clone()]),
            LabelRule::new(Field::StimulationStages, vec![STAGES_LABEL.clone()]),
            LabelRule::new(Field::VolumeValue, vec![VOLUME_LABEL.clone()]),
            LabelRule::new(Field::AcidPercent, vec![ACID_LABEL.clone()]),
            LabelRule::new(Field::LbsProppant, vec![PROPPANT_LABEL.clone()]),
            LabelRule::new(Field::MaxTreatmentPressurePsi, vec![MAX_PRESSURE_LABEL.clone()]),
            LabelRule::new(Field::MaxTreatmentRateBblsPerMin, vec![MAX_RATE_LABEL.clone()]),
        ];

        let inline = vec![
            InlineRule { field: Field::DateStimulated, pattern: DATE_NUMERIC.clone() },
            InlineRule { field: Field::AcidPercent, pattern: ACID_INLINE.clone() },
            InlineRule { field: Field::VolumeValue, pattern: VOLUME_INLINE.clone() },
            InlineRule { field: Field::MaxTreatmentRateBblsPerMin, pattern: RATE_INLINE.clone() },
            InlineRule { field: Field::MaxTreatmentPressurePsi, pattern: PRESSURE_INLINE.clone() },
            InlineRule { field: Field::StimulationStages, pattern: STAGES_INLINE.clone() },
        ];

        Self {
            labels,
            inline,
            well_name_labels: WELL_NAME_LABELS.clone(),
            well_name_repeat: WELL_NAME_REPEAT.clone(),
            well_name_prefix: WELL_NAME_PREFIX.clone(),
            cross_reference: CROSS_REFERENCE.clone(),
            stop_at: STOP_AT.clone(),
            spillover: SPILLOVER.clone(),
        }
    }

    /// Replace the label rule for `rule.field`, or add it.
    pub fn with_label(mut self, rule: LabelRule) -> Self {
        match self.labels.iter_mut().find(|r| r.field == rule.field) {
            Some(existing) => *existing = rule,
            None => self.labels.push(rule),
        }
        self
    }

    /// Replace the inline rule for `field`, or add it.
    pub fn with_inline(mut self, field: Field, pattern: Regex) -> Self {
        self.inline.retain(|r| r.field != field);
        self.inline.push(InlineRule { field, pattern });
        self
    }

    pub fn label(&self, field: Field) -> Option<&LabelRule> {
        self.labels.iter().find(|r| r.field == field)
    }

    pub fn inline(&self, field: Field) -> Option<&Regex> {
        self.inline.iter().find(|r| r.field == field).map(|r| &r.pattern)
    }

    pub fn labels(&self) -> &[LabelRule] {
        &self.labels
    }

    /// Whether a line starts another section and must end a lookahead scan.
    pub fn is_stop_line(&self, line: &str) -> bool {
        self.stop_at.is_match(line)
    }

    /// Whether a line repeats a well-name label.
    pub fn is_well_name_label(&self, line: &str) -> bool {
        self.well_name_repeat.is_match(line)
    }

    /// Whether a value points elsewhere ("see attached").
    pub fn is_cross_reference(&self, value: &str) -> bool {
        self.cross_reference.is_match(value)
    }

    /// Cut a value at the first marker of the next field and trim ` .:-`.
    pub fn trim_spillover(&self, value: &str) -> String {
        let kept = match self.spillover.find(value) {
            Some(m) => &value[..m.start()],
            None => value,
        };
        trim_value(kept).to_string()
    }

    /// Remove a leading well-name label from a line.
    pub fn strip_well_name_label<'a>(&self, line: &'a str) -> &'a str {
        match self.well_name_prefix.find(line) {
            Some(m) => line[m.end()..].trim(),
            None => line.trim(),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_labels() {
        let rules = RuleSet::standard();
        assert!(rules.label(Field::OperatorCompany).is_some());
        assert!(rules.label(Field::TreatmentType).is_some());
        assert!(rules.label(Field::WellNameNumber).is_none());
        assert!(rules.inline(Field::AcidPercent).is_some());
        assert!(rules.inline(Field::TopFt).is_none());
    }

    #[test]
    fn test_trim_spillover() {
        let rules = RuleSet::standard();

        assert_eq!(rules.trim_spillover("BAKKEN Field: SANISH"), "BAKKEN");
        assert_eq!(rules.trim_spillover("ACME OIL CO. Qtr-Qtr NWNE"), "ACME OIL CO");
        assert_eq!(rules.trim_spillover("BISON 4-12H T153N R101W"), "BISON 4-12H");
        assert_eq!(rules.trim_spillover(" -: value :. "), "value");
        assert_eq!(rules.trim_spillover("Section 12"), "");
    }

    #[test]
    fn test_trim_value_keeps_leading_point() {
        assert_eq!(trim_value(": .5 bbls."), ".5 bbls");
        assert_eq!(trim_value(" - ACME OIL CO. "), "ACME OIL CO");
        assert_eq!(trim_value("..."), "");
    }

    #[test]
    fn test_stop_lines() {
        let rules = RuleSet::standard();

        assert!(rules.is_stop_line("Township 153 N"));
        assert!(rules.is_stop_line("Latitude"));
        assert!(rules.is_stop_line("API #"));
        assert!(!rules.is_stop_line("ACME OIL COMPANY"));
        assert!(!rules.is_stop_line("Rapid flowback"));
    }

    #[test]
    fn test_with_label_replaces_rule() {
        let custom = Regex::new(r"(?i)\bCompany\b\s*:?\s*").unwrap();
        let rules = RuleSet::standard()
            .with_label(LabelRule::new(Field::OperatorCompany, vec![custom]));

        let rule = rules.label(Field::OperatorCompany).unwrap();
        assert!(rule.patterns[0].is_match("Company: X"));
        assert_eq!(
            rules.labels().iter().filter(|r| r.field == Field::OperatorCompany).count(),
            1
        );
    }

    #[test]
    fn test_strip_well_name_label() {
        let rules = RuleSet::standard();
        assert_eq!(
            rules.strip_well_name_label("Well Name and Number: BISON 4-12H"),
            "BISON 4-12H"
        );
        assert_eq!(rules.strip_well_name_label("  BISON 4-12H "), "BISON 4-12H");
    }

    #[test]
    fn test_cross_reference() {
        let rules = RuleSet::standard();
        assert!(rules.is_cross_reference("see attached"));
        assert!(!rules.is_cross_reference("SEELY 1-2"));
    }
}
