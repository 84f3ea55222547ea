//! Amount coercion for German statements.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::GERMAN_AMOUNT;
use crate::error::AmountParseError;

/// Parse a German-formatted amount (e.g. "1.234,56 EUR", "-12,30", "25,000 %").
///
/// The sign, integer digits and fraction digits are kept; any trailing text
/// is dropped. The result keeps the scale of the input fraction.
pub fn parse_german_amount(s: &str) -> Result<Decimal, AmountParseError> {
    let err = || AmountParseError {
        value: s.to_string(),
    };

    let caps = GERMAN_AMOUNT.captures(s).ok_or_else(err)?;
    let sign = &caps[1];
    let integer_part = caps[2].replace('.', "");
    let fraction = &caps[3];

    if integer_part.is_empty() && fraction.is_empty() {
        return Err(err());
    }

    let integer_part = if integer_part.is_empty() { "0" } else { integer_part.as_str() };
    let normalized = if fraction.is_empty() {
        format!("{}{}", sign, integer_part)
    } else {
        format!("{}{}.{}", sign, integer_part, fraction)
    };

    Decimal::from_str(&normalized).map_err(|_| err())
}

/// Format amount in German style (1.234,56).
pub fn format_german_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    if amount.is_sign_negative() && !amount.is_zero() {
        formatted.push('-');
    }

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(*c);
    }

    format!("{},{}", formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_german_amount() {
        assert_eq!(parse_german_amount("1.234,56 EUR"), Ok(dec("1234.56")));
        assert_eq!(parse_german_amount("-12,30"), Ok(dec("-12.30")));
        assert_eq!(parse_german_amount("0,00"), Ok(dec("0.00")));
        assert_eq!(parse_german_amount("50,00"), Ok(dec("50.00")));
        assert_eq!(parse_german_amount("12.345.678,90"), Ok(dec("12345678.90")));
    }

    #[test]
    fn test_parse_keeps_exact_scale() {
        let v = parse_german_amount("0,10").unwrap();
        assert_eq!(v.scale(), 2);
        assert_eq!(v.to_string(), "0.10");
    }

    #[test]
    fn test_parse_with_suffix_and_spacing() {
        assert_eq!(parse_german_amount("- 7,89 EUR"), Ok(dec("-7.89")));
        assert_eq!(parse_german_amount("15,000 %"), Ok(dec("15.000")));
        assert_eq!(parse_german_amount("  42,5"), Ok(dec("42.5")));
        assert_eq!(parse_german_amount("100,"), Ok(dec("100")));
        assert_eq!(parse_german_amount(",75"), Ok(dec("0.75")));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["n/a", "", "EUR", "12.30", "Bruttoertrag", ",", "EUR 5,00"] {
            assert_eq!(
                parse_german_amount(input),
                Err(AmountParseError { value: input.to_string() }),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_format_german_amount() {
        assert_eq!(format_german_amount(dec("1234.56")), "1.234,56");
        assert_eq!(format_german_amount(dec("12345678.9")), "12.345.678,90");
        assert_eq!(format_german_amount(dec("-12.3")), "-12,30");
        assert_eq!(format_german_amount(dec("0")), "0,00");
    }
}
