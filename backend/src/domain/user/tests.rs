//! Regression coverage for user identity primitives.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("", UserValidationError::EmptyId)]
#[case("not-a-uuid", UserValidationError::InvalidId)]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserValidationError::InvalidId)]
fn user_id_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
}

#[rstest]
fn user_id_preserves_raw_string() {
    let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let id = UserId::new(raw).expect("valid id");
    assert_eq!(id.as_ref(), raw);
    assert_eq!(UserId::from_uuid(*id.as_uuid()), id);
}

#[rstest]
#[case("leo")]
#[case("anna.karenina")]
#[case("user+tag@example.org")]
#[case("under_score-dash")]
#[case("Лев")]
fn username_accepts_allowed_characters(#[case] raw: &str) {
    let name = Username::new(raw).expect("valid username");
    assert_eq!(name.as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("two words", UserValidationError::UsernameInvalidCharacters)]
#[case("slash/name", UserValidationError::UsernameInvalidCharacters)]
#[case("question?", UserValidationError::UsernameInvalidCharacters)]
fn username_rejects_invalid_input(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw).expect_err("invalid username"), expected);
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "a".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw).expect_err("too long"),
        UserValidationError::UsernameTooLong { max: USERNAME_MAX }
    );
    assert!(Username::new("a".repeat(USERNAME_MAX)).is_ok());
}

#[rstest]
fn user_serialises_to_camel_case_json() {
    let user = User::new(
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id"),
        Username::new("leo").expect("valid username"),
    );
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "username": "leo" })
    );
}
