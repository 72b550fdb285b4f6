//! Free-form price text to canonical amounts.
//!
//! The comma/dot rule is a heuristic, not locale detection: when both
//! separators occur the right-most one is the decimal point, otherwise every
//! comma is a thousands separator. Exports depend on this exact behavior.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use shopbridge_core::Price;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]?[0-9][0-9.,]*").expect("valid number regex"));

/// Extracts the first number from `text`, ignoring currency symbols and
/// surrounding words.
///
/// Returns `None` when no digits are present or the digit run is not a valid
/// number after separator cleanup (e.g. `"1.2.3"`).
#[must_use]
pub fn parse_number(text: &str) -> Option<Decimal> {
    let token = NUMBER_RE.find(text.trim())?.as_str();
    let cleaned = normalize_separators(token);
    let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let cleaned = cleaned.strip_suffix('.').unwrap_or(cleaned);
    Decimal::from_str(cleaned).ok()
}

fn normalize_separators(token: &str) -> String {
    match (token.rfind(','), token.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => token.replace('.', "").replace(',', "."),
        _ => token.replace(',', ""),
    }
}

/// Rounds to cents, halves away from zero.
#[must_use]
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Scales an already-parsed amount by `(1 + pct / 100)` and rounds to cents.
#[must_use]
pub fn mark_up(amount: Decimal, markup_pct: Decimal) -> Price {
    let factor = Decimal::ONE + markup_pct / Decimal::ONE_HUNDRED;
    amount
        .checked_mul(factor)
        .map_or(Price::Empty, |scaled| Price::Amount(round_cents(scaled)))
}

/// Parses `price_text` and applies a percentage markup.
///
/// Never fails: unparseable text yields [`Price::Empty`].
#[must_use]
pub fn apply_markup(price_text: &str, markup_pct: Decimal) -> Price {
    match parse_number(price_text) {
        Some(amount) => mark_up(amount, markup_pct),
        None => Price::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parse_number_comma_decimal_when_comma_is_rightmost() {
        assert_eq!(parse_number("1.234,56"), Some(dec("1234.56")));
    }

    #[test]
    fn parse_number_dot_decimal_when_dot_is_rightmost() {
        assert_eq!(parse_number("1,234.56"), Some(dec("1234.56")));
    }

    #[test]
    fn parse_number_lone_comma_is_thousands_separator() {
        assert_eq!(parse_number("1,234"), Some(dec("1234")));
        assert_eq!(parse_number("12,5"), Some(dec("125")));
    }

    #[test]
    fn parse_number_lone_dot_is_decimal_point() {
        assert_eq!(parse_number("28.99"), Some(dec("28.99")));
    }

    #[test]
    fn parse_number_strips_currency_and_words() {
        assert_eq!(parse_number("US$ 19.99 each"), Some(dec("19.99")));
        assert_eq!(parse_number("€ 1.050,00"), Some(dec("1050.00")));
        assert_eq!(parse_number("250.000₫"), Some(dec("250.000")));
    }

    #[test]
    fn parse_number_keeps_sign() {
        assert_eq!(parse_number("-5.50"), Some(dec("-5.50")));
        assert_eq!(parse_number("+7"), Some(dec("7")));
    }

    #[test]
    fn parse_number_accepts_trailing_dot() {
        assert_eq!(parse_number("12. USD"), Some(dec("12")));
    }

    #[test]
    fn parse_number_rejects_text_without_digits() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("free"), None);
    }

    #[test]
    fn parse_number_rejects_repeated_decimal_points() {
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn parse_number_is_stable_when_reformatted() {
        for input in ["1.234,56", "1,234.56", "$19", "12,5", "0.5", "-3.25", "US$28.99"] {
            let first = parse_number(input).unwrap();
            assert_eq!(parse_number(&first.to_string()), Some(first), "input {input}");
        }
    }

    #[test]
    fn apply_markup_scales_and_rounds() {
        assert_eq!(apply_markup("20", Decimal::from(10)), Price::Amount(dec("22.00")));
        assert_eq!(apply_markup("19.99", dec("12.5")), Price::Amount(dec("22.49")));
    }

    #[test]
    fn apply_markup_zero_equals_rounded_parse() {
        for input in ["19.999", "1.234,565", "7", "$0.125"] {
            let expected = round_cents(parse_number(input).unwrap());
            assert_eq!(apply_markup(input, Decimal::ZERO), Price::Amount(expected));
        }
    }

    #[test]
    fn apply_markup_negative_discount() {
        assert_eq!(apply_markup("50", Decimal::from(-10)), Price::Amount(dec("45")));
    }

    #[test]
    fn apply_markup_unparseable_is_empty() {
        assert_eq!(apply_markup("call us", Decimal::from(10)), Price::Empty);
    }

    #[test]
    fn round_cents_halves_away_from_zero() {
        assert_eq!(round_cents(dec("0.125")), dec("0.13"));
        assert_eq!(round_cents(dec("-0.125")), dec("-0.13"));
    }
}
