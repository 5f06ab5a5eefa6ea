//! Numeric value extraction.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{NUMBER, NUMBER_WITH_UNIT};

/// Parse the first number in `s`, dropping thousands separators.
pub fn parse_number(s: &str) -> Option<Decimal> {
    NUMBER.find(s).and_then(|m| to_decimal(m.as_str()))
}

/// Parse the first number in `s` together with the unit that follows it.
///
/// The unit is lowercased; `None` when nothing alphabetic follows the number.
pub fn parse_number_with_unit(s: &str) -> Option<(Decimal, Option<String>)> {
    let caps = NUMBER_WITH_UNIT.captures(s)?;
    let value = to_decimal(caps.get(1)?.as_str())?;
    let unit = caps
        .get(2)
        .map(|u| u.as_str().to_lowercase())
        .filter(|u| !u.is_empty());

    Some((value, unit))
}

/// Whole count from a decimal, truncating any fraction.
pub fn to_count(value: Decimal) -> Option<u32> {
    value.trunc().to_u32()
}

fn to_decimal(raw: &str) -> Option<Decimal> {
    let mut cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.starts_with('.') {
        cleaned.insert(0, '0');
    }
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("10,250 ft"), Some(Decimal::new(10250, 0)));
        assert_eq!(parse_number("approx. 15.5 %"), Some(Decimal::new(155, 1)));
        assert_eq!(parse_number("1,234,567.25"), Some(Decimal::new(123456725, 2)));
        assert_eq!(parse_number("none reported"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_leading_decimal_point() {
        assert_eq!(parse_number(".5"), Some(Decimal::new(5, 1)));
        assert_eq!(parse_number("approx .75 in"), Some(Decimal::new(75, 2)));
        assert_eq!(
            parse_number_with_unit(".5 bbls"),
            Some((Decimal::new(5, 1), Some("bbls".to_string())))
        );
    }

    #[test]
    fn test_parse_number_with_unit() {
        assert_eq!(
            parse_number_with_unit("125,000 BBLS"),
            Some((Decimal::new(125000, 0), Some("bbls".to_string())))
        );
        assert_eq!(
            parse_number_with_unit("5000 Bbl/Min"),
            Some((Decimal::new(5000, 0), Some("bbl/min".to_string())))
        );
        assert_eq!(parse_number_with_unit("42"), Some((Decimal::new(42, 0), None)));
        assert_eq!(parse_number_with_unit("n/a"), None);
    }

    #[test]
    fn test_to_count() {
        assert_eq!(to_count(Decimal::new(30, 0)), Some(30));
        assert_eq!(to_count(Decimal::new(305, 1)), Some(30));
        assert_eq!(to_count(Decimal::new(-1, 0)), None);
    }
}
