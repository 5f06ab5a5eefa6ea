//! Well-treatment record model.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Keys of the well-treatment record, in output column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    OperatorCompany,
    WellNameNumber,
    ApiNumber,
    JobType,
    Address,
    Longitude,
    Latitude,
    DateStimulated,
    StimulatedFormation,
    TopFt,
    BottomFt,
    StimulationStages,
    VolumeValue,
    VolumeUnits,
    TreatmentType,
    AcidPercent,
    LbsProppant,
    MaxTreatmentPressurePsi,
    MaxTreatmentRateBblsPerMin,
    Details,
}

impl Field {
    /// All fields in column order.
    pub const ALL: [Field; 20] = [
        Field::OperatorCompany,
        Field::WellNameNumber,
        Field::ApiNumber,
        Field::JobType,
        Field::Address,
        Field::Longitude,
        Field::Latitude,
        Field::DateStimulated,
        Field::StimulatedFormation,
        Field::TopFt,
        Field::BottomFt,
        Field::StimulationStages,
        Field::VolumeValue,
        Field::VolumeUnits,
        Field::TreatmentType,
        Field::AcidPercent,
        Field::LbsProppant,
        Field::MaxTreatmentPressurePsi,
        Field::MaxTreatmentRateBblsPerMin,
        Field::Details,
    ];

    /// Canonical column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::OperatorCompany => "operator_company",
            Field::WellNameNumber => "well_name_number",
            Field::ApiNumber => "api_number",
            Field::JobType => "job_type",
            Field::Address => "address",
            Field::Longitude => "longitude",
            Field::Latitude => "latitude",
            Field::DateStimulated => "date_stimulated",
            Field::StimulatedFormation => "stimulated_formation",
            Field::TopFt => "top_ft",
            Field::BottomFt => "bottom_ft",
            Field::StimulationStages => "stimulation_stages",
            Field::VolumeValue => "volume_value",
            Field::VolumeUnits => "volume_units",
            Field::TreatmentType => "treatment_type",
            Field::AcidPercent => "acid_percent",
            Field::LbsProppant => "lbs_proppant",
            Field::MaxTreatmentPressurePsi => "max_treatment_pressure_psi",
            Field::MaxTreatmentRateBblsPerMin => "max_treatment_rate_bbls_per_min",
            Field::Details => "details",
        }
    }

    /// Maximum stored length in characters, for fields that are clipped.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Field::OperatorCompany | Field::WellNameNumber => Some(255),
            Field::ApiNumber | Field::DateStimulated => Some(32),
            Field::JobType | Field::StimulatedFormation | Field::TreatmentType => Some(128),
            Field::VolumeUnits => Some(16),
            Field::Details => Some(1200),
            _ => None,
        }
    }

    /// Whether the field holds a date that goes through date normalization.
    pub fn is_date(&self) -> bool {
        self.as_str().contains("date")
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted well-treatment record.
///
/// Every field is optional; an absent field is serialized as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellRecord {
    pub operator_company: Option<String>,
    pub well_name_number: Option<String>,
    /// Canonical `NN-NNN-NNNNN[-EXT]`.
    pub api_number: Option<String>,
    pub job_type: Option<String>,
    pub address: Option<String>,
    /// Signed decimal degrees, west negative.
    pub longitude: Option<f64>,
    /// Signed decimal degrees, south negative.
    pub latitude: Option<f64>,
    /// ISO `YYYY-MM-DD`, or the raw date token when it could not be parsed.
    pub date_stimulated: Option<String>,
    pub stimulated_formation: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub top_ft: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub bottom_ft: Option<Decimal>,
    pub stimulation_stages: Option<u32>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub volume_value: Option<Decimal>,
    pub volume_units: Option<String>,
    pub treatment_type: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub acid_percent: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub lbs_proppant: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_treatment_pressure_psi: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub max_treatment_rate_bbls_per_min: Option<Decimal>,
    /// Keyword context blocks, at most 1200 characters.
    pub details: Option<String>,
}

impl WellRecord {
    /// Create an empty record with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `field` currently holds a value.
    pub fn has(&self, field: Field) -> bool {
        self.display(field).is_some()
    }

    /// Render a field for tabular output.
    pub fn display(&self, field: Field) -> Option<String> {
        match field {
            Field::OperatorCompany => self.operator_company.clone(),
            Field::WellNameNumber => self.well_name_number.clone(),
            Field::ApiNumber => self.api_number.clone(),
            Field::JobType => self.job_type.clone(),
            Field::Address => self.address.clone(),
            Field::Longitude => self.longitude.map(format_degrees),
            Field::Latitude => self.latitude.map(format_degrees),
            Field::DateStimulated => self.date_stimulated.clone(),
            Field::StimulatedFormation => self.stimulated_formation.clone(),
            Field::TopFt => self.top_ft.map(|d| d.normalize().to_string()),
            Field::BottomFt => self.bottom_ft.map(|d| d.normalize().to_string()),
            Field::StimulationStages => self.stimulation_stages.map(|n| n.to_string()),
            Field::VolumeValue => self.volume_value.map(|d| d.normalize().to_string()),
            Field::VolumeUnits => self.volume_units.clone(),
            Field::TreatmentType => self.treatment_type.clone(),
            Field::AcidPercent => self.acid_percent.map(|d| d.normalize().to_string()),
            Field::LbsProppant => self.lbs_proppant.map(|d| d.normalize().to_string()),
            Field::MaxTreatmentPressurePsi => {
                self.max_treatment_pressure_psi.map(|d| d.normalize().to_string())
            }
            Field::MaxTreatmentRateBblsPerMin => self
                .max_treatment_rate_bbls_per_min
                .map(|d| d.normalize().to_string()),
            Field::Details => self.details.clone(),
        }
    }

    /// Mutable access to the string-valued fields.
    pub fn text_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        match field {
            Field::OperatorCompany => Some(&mut self.operator_company),
            Field::WellNameNumber => Some(&mut self.well_name_number),
            Field::ApiNumber => Some(&mut self.api_number),
            Field::JobType => Some(&mut self.job_type),
            Field::Address => Some(&mut self.address),
            Field::DateStimulated => Some(&mut self.date_stimulated),
            Field::StimulatedFormation => Some(&mut self.stimulated_formation),
            Field::VolumeUnits => Some(&mut self.volume_units),
            Field::TreatmentType => Some(&mut self.treatment_type),
            Field::Details => Some(&mut self.details),
            _ => None,
        }
    }

    /// Mutable access to the decimal-valued fields.
    pub fn decimal_mut(&mut self, field: Field) -> Option<&mut Option<Decimal>> {
        match field {
            Field::TopFt => Some(&mut self.top_ft),
            Field::BottomFt => Some(&mut self.bottom_ft),
            Field::VolumeValue => Some(&mut self.volume_value),
            Field::AcidPercent => Some(&mut self.acid_percent),
            Field::LbsProppant => Some(&mut self.lbs_proppant),
            Field::MaxTreatmentPressurePsi => Some(&mut self.max_treatment_pressure_psi),
            Field::MaxTreatmentRateBblsPerMin => Some(&mut self.max_treatment_rate_bbls_per_min),
            _ => None,
        }
    }

    /// Fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| !self.has(*f)).collect()
    }

    /// Check if no field was extracted at all.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| !self.has(*f))
    }
}

fn format_degrees(value: f64) -> String {
    format!("{:.6}", value)
}
