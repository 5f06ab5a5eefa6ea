//! Common regex patterns for well-treatment document extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Section/field headers that end a lookahead scan
    pub static ref STOP_AT: Regex = Regex::new(
        r"(?i)\b(?:Qtr(?:-?Qtr)?|Quarter(?:-Quarter)?|Section|Township|Range|County|Operator|Field|Telephone|API\b|Address|Lat|Lon|Longitude|Latitude|Top|Bottom|Stages?)\b"
    ).unwrap();

    // Start of the next field on the same line
    pub static ref SPILLOVER: Regex = Regex::new(
        r"(?i)\bQtr(?:-?Qtr)?\b|\bQuarter(?:-Quarter)?\b|\bSec(?:tion)?\b|\bTownship\b|\bRange\b|\bField\b|\bPool\b|\bCounty\b|\bFootages?\b|\bBefore\b|\bAfter\b|\bT\s*\d{1,3}\s*[NS]\b|\bR\s*\d{1,3}\s*[EW]\b"
    ).unwrap();

    // Field labels
    pub static ref OPERATOR_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Well\s*)?Operator(?:\s*/\s*Company)?\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref API_LABEL: Regex = Regex::new(
        r"(?i)\bAPI\s*(?:No\.?|#)?\s*[:：-]?\s*"
    ).unwrap();

    pub static ref ADDRESS_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Field\s*Address|Address)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref DATE_STIMULATED_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Date\s*(?:Stimulated|of\s*Stimulation)|Treatment\s*Date)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref FORMATION_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Stimulated\s*Formation|Formation)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref JOB_TYPE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Job\s*Type|Treatment\s*Type|Type\s*Treatment)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref TREATMENT_TYPE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Treatment\s*Type|Type\s*(?:of\s*)?Treatment)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref TOP_LABEL: Regex = Regex::new(
        r"(?i)\bTop\b(?:\s*\((?:ft|feet)\))?\s*[:：-]?\s*"
    ).unwrap();

    pub static ref BOTTOM_LABEL: Regex = Regex::new(
        r"(?i)\bBottom\b(?:\s*\((?:ft|feet)\))?\s*[:：-]?\s*"
    ).unwrap();

    pub static ref STAGES_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Stimulation\s*)?Stages?\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref VOLUME_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Total\s*)?(?:Fluid|Volume)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref ACID_LABEL: Regex = Regex::new(
        r"(?i)\bAcid\b\s*%?\s*[:：-]?\s*"
    ).unwrap();

    pub static ref PROPPANT_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Lbs?\.?\s*Proppant|Proppant)\b\s*[:：-]?\s*"
    ).unwrap();

    pub static ref MAX_PRESSURE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Max(?:imum)?\s*)?(?:Treat(?:ment)?\s*)?Pressure\b(?:\s*\(psi\))?\s*[:：-]?\s*"
    ).unwrap();

    pub static ref MAX_RATE_LABEL: Regex = Regex::new(
        r"(?i)\b(?:Max(?:imum)?\s*)?(?:Treat(?:ment)?\s*)?Rate\b(?:\s*\((?:BBLS?/Min|BPM)\))?\s*[:：-]?\s*"
    ).unwrap();

    // Well-name labels, most specific wording first; `val` is the rest of the line
    pub static ref WELL_NAME_LABELS: Vec<Regex> = vec![
        Regex::new(r"(?i)\bWell\s*Name\s*and\s*Number\s*or\s*Facility\s*Name\b\s*[:：-]?\s*(?P<val>.*)$").unwrap(),
        Regex::new(r"(?i)\bWell\s*or\s*Facility\s*Name\b\s*[:：-]?\s*(?P<val>.*)$").unwrap(),
        Regex::new(r"(?i)\bWell\s*Name\s*and\s*Number\b\s*[:：-]?\s*(?P<val>.*)$").unwrap(),
        Regex::new(r"(?i)\bWell\s*(?:Name\s*)?(?:and|&|/)\s*(?:Number|No\.?)\b\s*[:：-]?\s*(?P<val>.*)$").unwrap(),
    ];

    pub static ref WELL_NAME_REPEAT: Regex = Regex::new(
        r"(?i)well\s*(?:name\s*)?(?:and|&|/)?\s*(?:number|no\.?)|facility\s*name"
    ).unwrap();

    pub static ref WELL_NAME_PREFIX: Regex = Regex::new(
        r"(?i)^(?:Well\s*Name\s*and\s*Number\s*or\s*Facility\s*Name|Well\s*or\s*Facility\s*Name|Well\s*Name\s*and\s*Number)\s*[:：-]?\s*"
    ).unwrap();

    pub static ref CROSS_REFERENCE: Regex = Regex::new(r"(?i)\bsee\b").unwrap();

    // Well-name plausibility
    pub static ref ADDRESS_LIKE: Regex = Regex::new(
        r"\b[A-Za-z][A-Za-z .'\-]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?\b"
    ).unwrap();

    pub static ref STREET_HINT: Regex = Regex::new(
        r"(?i)\b(?:P\.?O\.?\s*Box|PO Box|Suite|Ste\.?|Apt\.?|Ave|Avenue|St\.?|Street|Rd\.?|Road|Dr\.?|Drive|Blvd\.?|Boulevard|Ln\.?|Lane|Hwy|Highway)\b"
    ).unwrap();

    pub static ref HEADER_WORDS: Regex = Regex::new(
        r"(?i)\b(?:production|rate|hours?|spacing|description|address|county|city|state|zip|operator|api|field|telephone|section|township|range|qtr|bismarck|otr)\b|\bunit\b\s*(?:[:：]|$)"
    ).unwrap();

    pub static ref LETTER_DIGIT_MIX: Regex = Regex::new(
        r"[A-Za-z].*\d|\d.*[A-Za-z]"
    ).unwrap();

    // Numbers, leading decimal point allowed
    pub static ref NUMBER: Regex = Regex::new(
        r"\d[\d,]*(?:\.\d+)?|\.\d+"
    ).unwrap();

    pub static ref NUMBER_WITH_UNIT: Regex = Regex::new(
        r"(\d[\d,]*(?:\.\d+)?|\.\d+)\s*([A-Za-z/]+)?"
    ).unwrap();

    // API numbers: 2-3-4/5 digit groups with an optional 2-4 digit extension.
    // A space-separated extension only follows space-separated groups.
    pub static ref API_SEGMENTED: Regex = Regex::new(
        r"\b(\d{2}\s+\d{3}\s+\d{4,5}[ \t]+\d{2,4}|\d{2}[\s\-]*\d{3}[\s\-]*\d{4,5}(?:\s*-[\s\-]*\d{2,4}|\d{2,4})?)\b"
    ).unwrap();

    pub static ref API_BARE: Regex = Regex::new(r"\b(\d{10,14})\b").unwrap();

    // Date tokens, tried in order
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2}[/\-]\d{1,2}[/\-]\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_ISO: Regex = Regex::new(
        r"\b(\d{4}[/\-]\d{1,2}[/\-]\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_MONTH_NAME: Regex = Regex::new(
        r"(?i)\b((?:Jan(?:uary)?|Feb(?:ruary)?|Mar(?:ch)?|Apr(?:il)?|May|Jun(?:e)?|Jul(?:y)?|Aug(?:ust)?|Sep(?:t|tember)?|Oct(?:ober)?|Nov(?:ember)?|Dec(?:ember)?)\s+\d{1,2},?\s+\d{2,4})\b"
    ).unwrap();

    // Whole-document inline phrasings
    pub static ref ACID_INLINE: Regex = Regex::new(
        r"(?i)\b(\d{1,3}(?:\.\d+)?)\s*%\s*acid\b"
    ).unwrap();

    pub static ref VOLUME_INLINE: Regex = Regex::new(
        r"(?i)\b(\d[\d,]*(?:\.\d+)?)\s*(bbls?|barrels?|gal(?:lons)?)\b"
    ).unwrap();

    pub static ref RATE_INLINE: Regex = Regex::new(
        r"(?i)\b(\d[\d,]*(?:\.\d+)?)\s*(?:BBLS?/Min|BPM)\b"
    ).unwrap();

    pub static ref PRESSURE_INLINE: Regex = Regex::new(
        r"(?i)\b(\d[\d,]*(?:\.\d+)?)\s*psi\b"
    ).unwrap();

    pub static ref STAGES_INLINE: Regex = Regex::new(
        r"(?i)\bstages?\b\s*[:\-]?\s*(\d{1,3})"
    ).unwrap();

    // Details keywords
    pub static ref DETAIL_KEYWORDS: Regex = Regex::new(
        r"(?i)(?:Stimul|Treat|Acidiz|Frac|Hydraulic|Proppant|Stage|Pressure|Rate|Volume)"
    ).unwrap();

    // Coordinates: degrees, required minutes, optional seconds, hemisphere before or after
    pub static ref DMS: Regex = Regex::new(
        r#"(?i)(?:(?P<h1>[NSEW])\s*)?(?P<deg>\d{1,3})[ \t:/\-]*[°ºo]?[ \t:/\-]*(?P<min>\d{1,2}(?:\.\d+)?)(?:[ \t:/\-]*['’′`]?[ \t:/\-]*(?P<sec>\d{1,2}(?:\.\d+)?)[ \t]*(?:["”“″]|['’′`]{2})?)?[ \t:/\-]*['’′`]?[ \t:/\-]*(?P<h3>[NSEW])?"#
    ).unwrap();

    // Coordinates: decimal degrees, decimal point required
    pub static ref DECIMAL_DEGREES: Regex = Regex::new(
        r"(?i)(?:(?P<h1>[NSEW])\s*)?(?P<num>[-+]?\d{1,3}\.\d+)\s*(?P<h2>[NSEW])?"
    ).unwrap();

    // Township/range grid references such as `153N` or `W 101`
    pub static ref TOWNSHIP_RANGE: Regex = Regex::new(
        r"(?i)^(?:[NSEW]\s*\d{1,4}|\d{1,4}\s*[NSEW])$"
    ).unwrap();

    pub static ref LONE_INTEGER: Regex = Regex::new(r"^\d{1,3}$").unwrap();
}
