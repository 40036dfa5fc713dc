// src/services/price.rs
use regex::Regex;
use std::num::ParseFloatError;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PriceParseError {
    #[error("no numeric part")]
    NoNumericPart,
    #[error("invalid price: {0}")]
    Invalid(#[from] ParseFloatError),
}

fn numeric_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9,.]+").expect("static regex"))
}

/// Convert a FIPE price string such as "R$ 10.000,00" into a number.
///
/// With both separators present the dot groups thousands and the comma is
/// the decimal mark; a lone comma is a decimal mark; anything else parses
/// as-is.
pub fn parse_fipe_price(s: &str) -> Result<f64, PriceParseError> {
    let m = numeric_run()
        .find(s.trim())
        .ok_or(PriceParseError::NoNumericPart)?
        .as_str();

    let normalized = match (m.contains('.'), m.contains(',')) {
        (true, true) => m.replace('.', "").replace(',', "."),
        (false, true) => m.replace(',', "."),
        _ => m.to_string(),
    };

    Ok(normalized.parse::<f64>()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brazilian_format() {
        assert_eq!(parse_fipe_price("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_fipe_price("R$ 10.000,00").unwrap(), 10000.0);
        assert_eq!(parse_fipe_price("  R$ 1.102.345,10 ").unwrap(), 1102345.10);
    }

    #[test]
    fn plain_and_comma_decimal() {
        assert_eq!(parse_fipe_price("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_fipe_price("1234,56").unwrap(), 1234.56);
        assert_eq!(parse_fipe_price("R$ 900").unwrap(), 900.0);
    }

    #[test]
    fn no_digits() {
        assert_eq!(parse_fipe_price("R$ -"), Err(PriceParseError::NoNumericPart));
        assert_eq!(parse_fipe_price(""), Err(PriceParseError::NoNumericPart));
        assert_eq!(
            parse_fipe_price("abc").unwrap_err().to_string(),
            "no numeric part"
        );
    }

    #[test]
    fn separators_without_digits_are_invalid() {
        assert!(matches!(
            parse_fipe_price("R$ ,"),
            Err(PriceParseError::Invalid(_))
        ));
    }
}
