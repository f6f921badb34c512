//! Tests for minor-unit currency formatting and parsing.

use super::*;
use rstest::rstest;

#[rstest]
#[case::cents_only(12, "R$ 0,12")]
#[case::zero(0, "R$ 0,00")]
#[case::unit(100, "R$ 1,00")]
#[case::thousands(123_456, "R$ 1.234,56")]
#[case::millions(123_456_789, "R$ 1.234.567,89")]
fn formats_minor_units_with_pt_br_grouping(#[case] minor_units: i64, #[case] expected: &str) {
    assert_eq!(Money::from_minor_units(minor_units).format_brl(), expected);
}

#[test]
fn formats_negative_amounts_with_sign() {
    assert_eq!(Money::from_minor_units(-123_456).format_brl(), "R$ -1.234,56");
}

#[test]
fn display_round_trips_through_parse() {
    let amount = Money::from_minor_units(123_456);
    let parsed = Money::parse_display(&amount.format_brl()).expect("formatted amount parses");
    assert_eq!(parsed, amount);
}

#[rstest]
#[case::masked("R$ 1.234,56", 123_456)]
#[case::bare_digits("123456", 123_456)]
#[case::decimal_comma("30,00", 3_000)]
fn parses_display_strings_by_stripping_punctuation(#[case] input: &str, #[case] expected: i64) {
    assert_eq!(
        Money::parse_display(input),
        Ok(Money::from_minor_units(expected))
    );
}

#[rstest]
#[case::empty("")]
#[case::symbol_only("R$ ")]
#[case::words("abc")]
fn rejects_input_without_digits(#[case] input: &str) {
    assert_eq!(Money::parse_display(input), Err(MoneyParseError::NoDigits));
}

#[test]
fn rejects_input_beyond_digit_limit() {
    let input = "9".repeat(INPUT_DIGIT_LIMIT + 1);
    assert_eq!(Money::parse_display(&input), Err(MoneyParseError::TooLarge));
}

#[rstest]
#[case::empty("", "R$ 0,00")]
#[case::no_digits("abc", "R$ 0,00")]
#[case::one_digit("1", "R$ 0,01")]
#[case::three_digits("123", "R$ 1,23")]
#[case::typing_with_mask("R$ 1.234,5", "R$ 123,45")]
fn masks_keystroke_buffers_progressively(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(Money::mask_input(raw), expected);
}

#[test]
fn serialises_as_a_bare_integer() {
    let json = serde_json::to_string(&Money::from_minor_units(500)).expect("serialise");
    assert_eq!(json, "500");
    let back: Money = serde_json::from_str(&json).expect("deserialise");
    assert_eq!(back, Money::from_minor_units(500));
}
