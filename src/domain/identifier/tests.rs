//! Tests for identifier kinds, display grouping, and input masking.

use super::*;
use rstest::rstest;

#[rstest]
#[case::individual("PF", IdentifierKind::Individual)]
#[case::corporate("PJ", IdentifierKind::Corporate)]
#[case::state_registration("IE", IdentifierKind::Other("IE".to_owned()))]
#[case::passport("PP", IdentifierKind::Other("PP".to_owned()))]
fn resolves_type_codes(#[case] code: &str, #[case] expected: IdentifierKind) {
    let kind = IdentifierKind::from_type_code(code);
    assert_eq!(kind, expected);
    assert_eq!(kind.type_code(), code);
}

#[test]
fn formats_individual_identifiers_with_cpf_grouping() {
    let kind = IdentifierKind::Individual;
    assert_eq!(kind.format("12345678901"), "123.456.789-01");
}

#[test]
fn formats_corporate_identifiers_with_cnpj_grouping() {
    let kind = IdentifierKind::Corporate;
    assert_eq!(kind.format("12345678000195"), "12.345.678/0001-95");
}

#[rstest]
#[case::individual(IdentifierKind::Individual, "123.456.789-01")]
#[case::corporate(IdentifierKind::Corporate, "12.345.678/0001-95")]
fn formatting_is_idempotent_on_formatted_input(
    #[case] kind: IdentifierKind,
    #[case] formatted: &str,
) {
    assert_eq!(kind.format(formatted), formatted);
}

#[rstest]
#[case::too_short(IdentifierKind::Individual, "1234567")]
#[case::too_long(IdentifierKind::Individual, "123456789012")]
#[case::unknown_kind(IdentifierKind::Other("IE".to_owned()), "12345678901")]
fn passes_through_when_no_template_applies(#[case] kind: IdentifierKind, #[case] input: &str) {
    assert_eq!(kind.format(input), input);
}

#[rstest]
#[case::empty("", "")]
#[case::first_group("123", "123")]
#[case::group_boundary("1234", "123.4")]
#[case::two_groups("123456", "123.456")]
#[case::into_suffix("123456789", "123.456.789")]
#[case::partial_suffix("1234567890", "123.456.789-0")]
#[case::complete("12345678901", "123.456.789-01")]
#[case::overflow_truncated("123456789012345", "123.456.789-01")]
fn masks_individual_input_progressively(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(IdentifierKind::Individual.mask_input(raw), expected);
}

#[rstest]
#[case::first_group("12", "12")]
#[case::second_group("12345", "12.345")]
#[case::branch_slash("123456789", "12.345.678/9")]
#[case::complete("12345678000195", "12.345.678/0001-95")]
fn masks_corporate_input_progressively(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(IdentifierKind::Corporate.mask_input(raw), expected);
}

#[test]
fn mask_discards_punctuation_before_grouping() {
    assert_eq!(
        IdentifierKind::Individual.mask_input("123.456.7"),
        "123.456.7"
    );
    assert_eq!(IdentifierKind::Other("IE".to_owned()).mask_input("12-34"), "1234");
}

#[test]
fn normalises_identifiers_to_digits() {
    let identifier = Identifier::normalise("123.456.789-01").expect("valid identifier");
    assert_eq!(identifier.as_ref(), "12345678901");
}

#[rstest]
#[case::empty("", IdentifierValidationError::Empty)]
#[case::blank("   ", IdentifierValidationError::Empty)]
#[case::letters("abc", IdentifierValidationError::NoDigits)]
fn rejects_unusable_identifier_input(
    #[case] raw: &str,
    #[case] expected: IdentifierValidationError,
) {
    assert_eq!(Identifier::normalise(raw), Err(expected));
}

#[test]
fn kind_serialises_as_its_type_code() {
    let json = serde_json::to_string(&IdentifierKind::Corporate).expect("serialise");
    assert_eq!(json, "\"PJ\"");
    let kind: IdentifierKind = serde_json::from_str("\"RG\"").expect("deserialise");
    assert_eq!(kind, IdentifierKind::Other("RG".to_owned()));
}
