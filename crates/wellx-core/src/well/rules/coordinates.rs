//! Coordinate scanning and latitude/longitude pairing.
//!
//! Completion reports print the surface location in whatever notation the
//! operator used: degrees-minutes-seconds with or without symbols, decimal
//! degrees, hemisphere letters before or after the number. Township/range grid
//! references (`153N`, `R101W`) look very similar and must not be mistaken for
//! coordinates. The scanner collects every candidate in the document, then the
//! pairer picks the latitude/longitude pair with the best score.

use regex::{Captures, Regex};
use serde::Serialize;
use tracing::{debug, trace};

use crate::models::config::{CoordinateConfig, RegionBox};

use super::patterns::{DECIMAL_DEGREES, DMS, LONE_INTEGER, TOWNSHIP_RANGE};

/// Geographic axis of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Latitude,
    Longitude,
}

/// Notation a candidate was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notation {
    Dms,
    Decimal,
}

impl Notation {
    /// Quality tier used in pair scoring; DMS outranks decimal.
    pub fn quality(&self) -> u8 {
        match self {
            Notation::Dms => 2,
            Notation::Decimal => 1,
        }
    }
}

/// Hemisphere letters present in a raw token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HemisphereMarks {
    /// Only N/S.
    Latitude,
    /// Only E/W.
    Longitude,
    /// Both N/S and E/W.
    Mixed,
    None,
}

impl HemisphereMarks {
    pub fn of(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        let lat = upper.contains(['N', 'S']);
        let lon = upper.contains(['E', 'W']);

        match (lat, lon) {
            (true, true) => HemisphereMarks::Mixed,
            (true, false) => HemisphereMarks::Latitude,
            (false, true) => HemisphereMarks::Longitude,
            (false, false) => HemisphereMarks::None,
        }
    }

    /// Whether a token with these marks may stand for `axis`.
    fn allows(&self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (HemisphereMarks::None, _)
                | (HemisphereMarks::Latitude, Axis::Latitude)
                | (HemisphereMarks::Longitude, Axis::Longitude)
        )
    }
}

/// One latitude or longitude found in the document text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateCandidate {
    /// Matched text, trimmed.
    pub raw: String,
    /// Signed decimal degrees.
    pub value: f64,
    pub axis: Axis,
    /// Character offset of the match in the document text.
    pub offset: usize,
    pub notation: Notation,
    /// Whether the value lies inside the expected region.
    pub in_region: bool,
}

/// Selected coordinates. `score` is `None` when no pair formed and each axis
/// fell back to its first candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoordinatePair {
    pub latitude: Option<CoordinateCandidate>,
    pub longitude: Option<CoordinateCandidate>,
    pub score: Option<f64>,
}

/// Document-wide coordinate scanner and pairer.
pub struct CoordinateScanner {
    config: CoordinateConfig,
}

impl CoordinateScanner {
    pub fn new() -> Self {
        Self::with_config(CoordinateConfig::default())
    }

    pub fn with_config(config: CoordinateConfig) -> Self {
        Self { config }
    }

    /// Scan `text` and select the best latitude/longitude pair.
    pub fn resolve(&self, text: &str) -> CoordinatePair {
        let candidates = self.candidates(text);
        debug!("Found {} coordinate candidates", candidates.len());
        self.pair(&candidates)
    }

    /// Collect all candidates, ordered by offset (DMS first on equal offsets).
    pub fn candidates(&self, text: &str) -> Vec<CoordinateCandidate> {
        let text = normalize_minus(text);
        let mut items = Vec::new();

        for hit in guarded_captures(&DMS, &text, true, dms_extent) {
            if let Some(candidate) = self.dms_candidate(&text, &hit) {
                items.push(candidate);
            }
        }

        for hit in guarded_captures(&DECIMAL_DEGREES, &text, false, decimal_extent) {
            if let Some(candidate) = self.decimal_candidate(&text, &hit) {
                items.push(candidate);
            }
        }

        items.sort_by_key(|c| c.offset);
        items
    }

    fn dms_candidate(&self, text: &str, hit: &Hit<'_>) -> Option<CoordinateCandidate> {
        let caps = &hit.caps;
        let hemisphere = caps
            .name("h1")
            .or_else(|| caps.name("h3"))
            .map(|h| h.as_str().to_ascii_uppercase())?;

        let raw = text[hit.start..hit.end].trim();
        if is_grid_reference(raw) {
            return None;
        }

        let marks = HemisphereMarks::of(raw);
        if marks == HemisphereMarks::Mixed {
            trace!("Discarding mixed-hemisphere token {:?}", raw);
            return None;
        }

        let degrees: f64 = caps.name("deg")?.as_str().parse().ok()?;
        let minutes: f64 = caps.name("min")?.as_str().parse().ok()?;
        let seconds: f64 = match caps.name("sec") {
            Some(s) => s.as_str().parse().ok()?,
            None => 0.0,
        };
        if !is_sexagesimal(minutes) || !is_sexagesimal(seconds) {
            return None;
        }

        let mut value = degrees + minutes / 60.0 + seconds / 3600.0;
        if hemisphere == "S" || hemisphere == "W" {
            value = -value;
        }

        self.build(raw, value, marks, char_offset(text, hit.start), Notation::Dms)
    }

    fn decimal_candidate(&self, text: &str, hit: &Hit<'_>) -> Option<CoordinateCandidate> {
        let caps = &hit.caps;
        let raw = text[hit.start..hit.end].trim();
        if is_grid_reference(raw) {
            return None;
        }

        let marks = HemisphereMarks::of(raw);
        if marks == HemisphereMarks::Mixed {
            return None;
        }

        let mut value: f64 = caps.name("num")?.as_str().parse().ok()?;
        let hemisphere = caps.name("h1").or_else(|| caps.name("h2")).map(|h| h.as_str());
        if matches!(hemisphere, Some("S" | "s" | "W" | "w")) {
            value = -value.abs();
        }

        self.build(raw, value, marks, char_offset(text, hit.start), Notation::Decimal)
    }

    fn build(
        &self,
        raw: &str,
        value: f64,
        marks: HemisphereMarks,
        offset: usize,
        notation: Notation,
    ) -> Option<CoordinateCandidate> {
        let axis = match marks {
            HemisphereMarks::Latitude => Axis::Latitude,
            HemisphereMarks::Longitude => Axis::Longitude,
            _ => classify_by_magnitude(value)?,
        };

        let in_bounds = match axis {
            Axis::Latitude => (-90.0..=90.0).contains(&value),
            Axis::Longitude => (-180.0..=180.0).contains(&value),
        };
        if !in_bounds {
            return None;
        }

        Some(CoordinateCandidate {
            raw: raw.to_string(),
            value,
            axis,
            offset,
            notation,
            in_region: in_region(&self.config.expected_region, value, axis),
        })
    }

    /// Pick the best opposite-axis pair among nearby candidates.
    pub fn pair(&self, candidates: &[CoordinateCandidate]) -> CoordinatePair {
        let radius = self.config.neighbor_radius;
        let mut best: Option<(usize, usize, f64)> = None;

        for (i, a) in candidates.iter().enumerate() {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius + 1).min(candidates.len());

            for (j, b) in candidates.iter().enumerate().take(hi).skip(lo) {
                if a.axis == b.axis {
                    continue;
                }

                let score = self.score(a, b);
                if best.is_some_and(|(_, _, s)| score <= s) {
                    continue;
                }

                let (lat, lon) = if a.axis == Axis::Latitude { (i, j) } else { (j, i) };
                if !HemisphereMarks::of(&candidates[lat].raw).allows(Axis::Latitude)
                    || !HemisphereMarks::of(&candidates[lon].raw).allows(Axis::Longitude)
                {
                    continue;
                }

                best = Some((lat, lon, score));
            }
        }

        if let Some((lat, lon, score)) = best {
            trace!("Best coordinate pair scored {:.3}", score);
            return CoordinatePair {
                latitude: Some(candidates[lat].clone()),
                longitude: Some(candidates[lon].clone()),
                score: Some(score),
            };
        }

        CoordinatePair {
            latitude: candidates.iter().find(|c| c.axis == Axis::Latitude).cloned(),
            longitude: candidates.iter().find(|c| c.axis == Axis::Longitude).cloned(),
            score: None,
        }
    }

    fn score(&self, a: &CoordinateCandidate, b: &CoordinateCandidate) -> f64 {
        let cfg = &self.config;
        let distance = a.offset.abs_diff(b.offset) as f64;

        let mut score = f64::from(a.notation.quality() + b.notation.quality()) * cfg.quality_weight;
        if a.in_region {
            score += cfg.region_bonus;
        }
        if b.in_region {
            score += cfg.region_bonus;
        }
        if cfg.proximity_cap > 0.0 {
            score += (cfg.proximity_cap - distance).max(0.0) / cfg.proximity_cap;
        }
        score
    }
}

impl Default for CoordinateScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace unicode minus and en-dash with ASCII hyphen.
fn normalize_minus(text: &str) -> String {
    text.replace(['\u{2212}', '\u{2013}'], "-")
}

/// An accepted coordinate match and the byte span it claims.
struct Hit<'t> {
    caps: Captures<'t>,
    start: usize,
    end: usize,
}

/// Verdict of an extent check on a raw regex match.
enum Extent {
    /// Keep the match, claiming text up to this byte offset.
    Until(usize),
    Retry,
}

/// DMS tokens need a hemisphere letter and a break between degree, minute and
/// second digits. With a leading hemisphere, a trailing letter belongs to the
/// next token.
fn dms_extent(caps: &Captures<'_>) -> Extent {
    let (Some(m), Some(deg), Some(min)) = (caps.get(0), caps.name("deg"), caps.name("min")) else {
        return Extent::Retry;
    };
    if deg.end() == min.start() || caps.name("sec").is_some_and(|sec| sec.start() == min.end()) {
        return Extent::Retry;
    }

    match (caps.name("h1"), caps.name("h3")) {
        (None, None) => Extent::Retry,
        (Some(_), Some(next)) => Extent::Until(next.start()),
        _ => Extent::Until(m.end()),
    }
}

fn decimal_extent(caps: &Captures<'_>) -> Extent {
    match (caps.get(0), caps.name("h1"), caps.name("h2")) {
        (None, ..) => Extent::Retry,
        (Some(_), Some(_), Some(next)) => Extent::Until(next.start()),
        (Some(m), ..) => Extent::Until(m.end()),
    }
}

fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

/// Matches of a coordinate pattern with boundary guards applied.
///
/// A leading hemisphere letter may not be the tail of a word (`longitude 103`).
/// With `digit_guard`, a match may also not start right after a digit, nor end
/// on a word character that runs straight into another digit. Matches that
/// fail the guards or `extent` are retried one character later; accepted ones
/// resume the scan where their claimed span ends.
fn guarded_captures<'t>(
    pattern: &Regex,
    text: &'t str,
    digit_guard: bool,
    extent: fn(&Captures<'t>) -> Extent,
) -> Vec<Hit<'t>> {
    let mut out = Vec::new();
    let mut at = 0;

    while at <= text.len() {
        let Some(caps) = pattern.captures_at(text, at) else {
            break;
        };
        let Some(m) = caps.get(0) else {
            break;
        };

        let start = m.start();
        let step = text[start..].chars().next().map_or(1, char::len_utf8);
        let end = match extent(&caps) {
            Extent::Until(end) => end,
            Extent::Retry => {
                at = start + step;
                continue;
            }
        };
        let before = text[..start].chars().next_back();

        let glued_letter = caps.name("h1").is_some() && before.is_some_and(char::is_alphabetic);
        let after_digit = digit_guard && before.is_some_and(|c| c.is_ascii_digit());
        let into_digit = digit_guard
            && text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
            && text[..end].chars().next_back().is_some_and(|c| c.is_alphanumeric() || c == '_');

        if glued_letter || after_digit || into_digit {
            at = start + step;
            continue;
        }

        out.push(Hit { caps, start, end });
        at = if end > start { end } else { start + step };
    }

    out
}

/// Township/range tokens and lone small integers.
fn is_grid_reference(raw: &str) -> bool {
    let raw = raw.trim();
    if TOWNSHIP_RANGE.is_match(raw) && !raw.contains(['.', '°', 'º']) {
        return true;
    }
    LONE_INTEGER.is_match(raw)
}

fn is_sexagesimal(v: f64) -> bool {
    (0.0..60.0).contains(&v)
}

fn classify_by_magnitude(value: f64) -> Option<Axis> {
    let magnitude = value.abs();
    if magnitude <= 90.0 {
        Some(Axis::Latitude)
    } else if magnitude <= 180.0 {
        Some(Axis::Longitude)
    } else {
        None
    }
}

fn in_region(region: &RegionBox, value: f64, axis: Axis) -> bool {
    match axis {
        Axis::Latitude => (region.lat_min..=region.lat_max).contains(&value),
        Axis::Longitude => (region.lon_min..=region.lon_max).contains(&value),
    }
}
