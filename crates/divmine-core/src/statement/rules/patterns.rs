//! Common regex patterns for statement values.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // German amount: optional sign, integer part with optional '.' grouping,
    // ',' decimal separator. Anything after the fraction (currency, '%') is ignored.
    pub static ref GERMAN_AMOUNT: Regex = Regex::new(
        r"^\s*(-?)\s*(\d{1,3}(?:\.\d{3})+|\d*),(\d*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_amount_captures() {
        let caps = GERMAN_AMOUNT.captures("- 1.234,56 EUR").unwrap();
        assert_eq!(&caps[1], "-");
        assert_eq!(&caps[2], "1.234");
        assert_eq!(&caps[3], "56");

        assert!(GERMAN_AMOUNT.is_match("25,000 %"));
        assert!(!GERMAN_AMOUNT.is_match("EUR 12,30"));
        assert!(!GERMAN_AMOUNT.is_match("12.30"));
    }
}
