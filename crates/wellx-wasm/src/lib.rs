//! WASM bindings for well-treatment record extraction.
//!
//! This crate provides WebAssembly bindings for use in browsers and Node.js.
//! Callers supply page text (from their own PDF or OCR pipeline); records come
//! back as plain objects with every key present and absent fields `null`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use wellx_core::well::rules::{canonicalize_api as canonicalize, find_date, is_plausible_well_name};
use wellx_core::{Document, WellParser, WellRecordParser, WellxConfig};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn pages_from_array(pages: &js_sys::Array) -> Vec<String> {
    pages.iter().map(|page| page.as_string().unwrap_or_default()).collect()
}

/// Extract a record from text; pages may be separated by form feeds.
#[wasm_bindgen]
pub fn extract_record_from_text(text: &str) -> Result<JsValue, JsValue> {
    let result = WellRecordParser::new().parse(&Document::from_text(text));
    to_js(&result.record)
}

/// Extract a record from an array of page texts. Non-string entries count as blank pages.
#[wasm_bindgen]
pub fn extract_record_from_pages(pages: &js_sys::Array) -> Result<JsValue, JsValue> {
    let result = WellRecordParser::new().parse(&Document::new(pages_from_array(pages)));
    to_js(&result.record)
}

/// Canonicalize an API well number (e.g. "33 053 12345" to "33-053-12345").
#[wasm_bindgen]
pub fn canonicalize_api(raw: &str) -> Option<String> {
    canonicalize(raw)
}

/// Normalize the first date found in `raw` to ISO form.
#[wasm_bindgen]
pub fn normalize_date(raw: &str) -> Option<String> {
    find_date(raw)
}

/// Check whether a string could be a well name.
#[wasm_bindgen]
pub fn is_well_name(value: &str) -> bool {
    is_plausible_well_name(value)
}

/// Record extractor class for browser use.
#[wasm_bindgen]
pub struct RecordExtractor {
    parser: WellRecordParser,
}

#[wasm_bindgen]
impl RecordExtractor {
    /// Create a new record extractor with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: WellRecordParser::new(),
        }
    }

    /// Create an extractor from a configuration object; missing sections take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<RecordExtractor, JsValue> {
        let config: WellxConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            parser: WellRecordParser::new().with_config(config),
        })
    }

    /// The active configuration as JSON.
    #[wasm_bindgen]
    pub fn config_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.parser.config()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract a record from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(&Document::from_text(text)).record)
    }

    /// Extract a record from an array of page texts.
    #[wasm_bindgen]
    pub fn extract_pages(&self, pages: &js_sys::Array) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(&Document::new(pages_from_array(pages))).record)
    }

    /// Get the record with provenance, missing fields, warnings and timing.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.parser.parse(&Document::from_text(text)))
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
