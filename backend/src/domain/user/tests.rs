//! Validation coverage for user identity types.

use super::*;
use rstest::rstest;

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn username_rejects_blank_input(#[case] raw: &str) {
    assert_eq!(Username::new(raw), Err(UserValidationError::EmptyUsername));
}

#[rstest]
fn username_keeps_value_verbatim() {
    let username = Username::new(" fcc_test ").expect("valid username");
    assert_eq!(username.as_str(), " fcc_test ");
}

#[rstest]
fn username_rejects_overlong_input() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
fn username_counts_characters_not_bytes() {
    let raw = "é".repeat(USERNAME_MAX);
    assert!(Username::new(raw).is_ok());
}

#[rstest]
#[case("5fb5853f734231456ccb3b05")]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_non_uuid_input(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn user_id_round_trips_through_display() {
    let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.to_string(), raw);
}

#[rstest]
fn username_deserialisation_applies_validation() {
    let result: Result<Username, _> = serde_json::from_str("\"  \"");
    assert!(result.is_err());
}
