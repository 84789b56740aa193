//! A measured value and its unit.

use serde::Serialize;
use std::fmt;

use crate::regex::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Quantity {
        Quantity {
            value,
            unit: unit.into(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Parse a decimal number, as written in a document, into a float.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let re = regex!(r"^\s*-?[0-9]+(?:\.[0-9]*)?(?:[eE][-+]?[0-9]+)?\s*$");
    if !re.is_match(input) {
        return None;
    }

    input
        .trim_ascii()
        .parse()
        .ok()
}

/// Parse a whole number. Decimal text is accepted only when it has no
/// fractional part, so `4.0` reads as `4`.
pub fn parse_integer(input: &str) -> Option<i64> {
    let value = parse_decimal(input)?;
    if value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimals() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("0.5"), Some(0.5));
        assert_eq!(parse_decimal("7e-5"), Some(7e-5));
        assert_eq!(parse_decimal("-3.25"), Some(-3.25));
        assert_eq!(parse_decimal("2."), Some(2.0));
        assert_eq!(parse_decimal("2.0e"), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn parse_integers() {
        assert_eq!(parse_integer("4"), Some(4));
        assert_eq!(parse_integer("4.0"), Some(4));
        assert_eq!(parse_integer("4.5"), None);
    }

    #[test]
    fn display_quantity() {
        assert_eq!(Quantity::new(5.0, "hour").to_string(), "5 hour");
        assert_eq!(Quantity::new(0.5, "mM").to_string(), "0.5 mM");
    }
}
