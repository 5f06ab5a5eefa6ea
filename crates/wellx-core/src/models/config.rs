//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WellxError};

/// Main configuration for the wellx pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WellxConfig {
    /// Label and well-name extraction configuration.
    pub extraction: ExtractionConfig,

    /// Coordinate scanning and pairing configuration.
    pub coordinates: CoordinateConfig,

    /// Free-text details configuration.
    pub details: DetailsConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// External OCR collaborator configuration.
    pub ocr: OcrConfig,
}

/// Label-value and well-name extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines to look ahead when a label has no same-line value.
    pub label_lookahead: usize,

    /// Lines below a well-name label that are searched for the value.
    pub well_name_scan_depth: usize,

    /// Leading lines searched by the last-resort well-name scan.
    pub well_name_fallback_lines: usize,

    /// Minimum plausible well-name length.
    pub well_name_min_len: usize,

    /// Maximum plausible well-name length.
    pub well_name_max_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            label_lookahead: 2,
            well_name_scan_depth: 5,
            well_name_fallback_lines: 80,
            well_name_min_len: 3,
            well_name_max_len: 120,
        }
    }
}

/// Inclusive bounding box of the region where wells are expected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for RegionBox {
    /// North Dakota oil patch.
    fn default() -> Self {
        Self {
            lat_min: 45.0,
            lat_max: 50.0,
            lon_min: -105.5,
            lon_max: -96.0,
        }
    }
}

/// Coordinate pairing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateConfig {
    /// Candidate-list positions examined on each side of a candidate.
    pub neighbor_radius: usize,

    /// Text distance (bytes) beyond which the proximity bonus is zero.
    pub proximity_cap: f64,

    /// Multiplier applied to the notation quality tier of each candidate.
    pub quality_weight: f64,

    /// Bonus per candidate lying inside the expected region.
    pub region_bonus: f64,

    /// Expected region.
    pub expected_region: RegionBox,
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self {
            neighbor_radius: 25,
            proximity_cap: 1200.0,
            quality_weight: 10.0,
            region_bonus: 2.0,
            expected_region: RegionBox::default(),
        }
    }
}

/// Keyword context-window configuration for the details field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailsConfig {
    /// Number of lines captured starting at each keyword line.
    pub window: usize,

    /// Separator placed between blocks.
    pub separator: String,

    /// Maximum length of the joined blocks, in characters.
    pub max_len: usize,
}

impl Default for DetailsConfig {
    fn default() -> Self {
        Self {
            window: 15,
            separator: " | ".to_string(),
            max_len: 1200,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Skip files whose name starts with this prefix (OCR outputs).
    pub skip_prefix: String,

    /// Minimum total text length to consider the PDF text-based and skip OCR.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            skip_prefix: "ocr_".to_string(),
            min_text_length: 50,
        }
    }
}

/// External OCR command configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Run OCR before text extraction.
    pub enabled: bool,

    /// OCR executable.
    pub command: String,

    /// Arguments placed before the input and output paths.
    pub args: Vec<String>,

    /// Seconds before the OCR process is abandoned.
    pub timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "ocrmypdf".to_string(),
            args: vec![
                "--skip-text".to_string(),
                "--fast-web-view".to_string(),
                "1".to_string(),
                "--rotate-pages".to_string(),
                "--deskew".to_string(),
            ],
            timeout_secs: 120,
        }
    }
}

impl WellxConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the extractors cannot work with.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.well_name_min_len > extraction.well_name_max_len {
            return Err(WellxError::Config(format!(
                "well_name_min_len ({}) exceeds well_name_max_len ({})",
                extraction.well_name_min_len, extraction.well_name_max_len
            )));
        }

        let region = &self.coordinates.expected_region;
        if region.lat_min > region.lat_max || region.lon_min > region.lon_max {
            return Err(WellxError::Config("expected_region is inverted".to_string()));
        }

        if self.details.window == 0 {
            return Err(WellxError::Config("details.window must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: WellxConfig =
            serde_json::from_str(r#"{"coordinates": {"neighbor_radius": 10}}"#).unwrap();

        assert_eq!(config.coordinates.neighbor_radius, 10);
        assert_eq!(config.coordinates.proximity_cap, 1200.0);
        assert_eq!(config.extraction.label_lookahead, 2);
        assert_eq!(config.details.max_len, 1200);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = WellxConfig::default();
        config.ocr.enabled = false;
        config.ocr.timeout_secs = 30;
        config.save(&path).unwrap();

        let loaded = WellxConfig::from_file(&path).unwrap();
        assert!(!loaded.ocr.enabled);
        assert_eq!(loaded.ocr.timeout_secs, 30);
        assert_eq!(loaded.coordinates.expected_region, RegionBox::default());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = WellxConfig::default();
        assert!(config.validate().is_ok());

        config.extraction.well_name_min_len = 200;
        assert!(matches!(config.validate(), Err(WellxError::Config(_))));

        let mut config = WellxConfig::default();
        config.details.window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(WellxConfig::from_file(&path), Err(WellxError::Json(_))));
        assert!(matches!(
            WellxConfig::from_file(&dir.path().join("missing.json")),
            Err(WellxError::Io(_))
        ));
    }
}
