//! Tests for the domain account model.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const VALID_EMAIL: &str = "ada@example.com";
const VALID_PASSWORD: &str = "correct horse battery staple";

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, hour, minute, 0)
        .single()
        .expect("fixture timestamps are unambiguous")
}

#[fixture]
fn account() -> Account {
    Account::new(
        AccountId::new(VALID_ID).expect("fixture id is valid"),
        EmailAddress::new(VALID_EMAIL).expect("fixture email is valid"),
        PasswordCredential::new(VALID_PASSWORD).expect("fixture password is valid"),
        Role::User,
        at(9, 0),
    )
}

#[rstest]
fn account_id_rejects_text_that_is_not_a_uuid() {
    let result = AccountId::new("23452345");
    assert!(matches!(result, Err(AccountValidationError::InvalidId)));
}

#[rstest]
fn account_id_rejects_padded_uuids() {
    let padded = format!(" {VALID_ID} ");
    let result = AccountId::new(padded);
    assert!(matches!(result, Err(AccountValidationError::InvalidId)));
}

#[rstest]
fn account_id_rejects_empty_input() {
    assert!(matches!(
        AccountId::new(""),
        Err(AccountValidationError::EmptyId)
    ));
}

#[rstest]
fn account_id_from_uuid_avoids_round_trip_parse() {
    let uuid = Uuid::parse_str(VALID_ID).expect("valid UUID");
    let id = AccountId::from_uuid(uuid);

    assert_eq!(id.as_uuid(), &uuid);
    assert_eq!(id.as_ref(), VALID_ID);
}

#[rstest]
fn account_id_random_yields_distinct_identifiers() {
    assert_ne!(AccountId::random(), AccountId::random());
}

#[rstest]
#[case::uppercase_mailbox("Ada@Example.COM", "ada@example.com")]
#[case::surrounding_whitespace("  ada@example.com  ", "ada@example.com")]
#[case::plus_addressing("ada+tag@example.com", "ada+tag@example.com")]
fn email_normalises_valid_input(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case::missing_at("ada.example.com")]
#[case::missing_domain_dot("ada@example")]
#[case::bare_mailbox("s")]
#[case::embedded_whitespace("ada lovelace@example.com")]
#[case::double_at("ada@@example.com")]
fn email_rejects_structural_failures(#[case] raw: &str) {
    let result = EmailAddress::new(raw);
    assert!(matches!(result, Err(AccountValidationError::InvalidEmail)));
}

#[rstest]
fn email_rejects_blank_input() {
    assert!(matches!(
        EmailAddress::new("   "),
        Err(AccountValidationError::EmptyEmail)
    ));
}

#[rstest]
fn email_rejects_oversized_input() {
    let mailbox = "a".repeat(EMAIL_MAX);
    let raw = format!("{mailbox}@example.com");
    let result = EmailAddress::new(raw);
    assert!(matches!(
        result,
        Err(AccountValidationError::EmailTooLong { max }) if max == EMAIL_MAX
    ));
}

#[rstest]
fn password_rejects_empty_input() {
    assert!(matches!(
        PasswordCredential::new(""),
        Err(AccountValidationError::EmptyPassword)
    ));
}

#[rstest]
fn password_preserves_whitespace_and_matches_exactly() {
    let credential = PasswordCredential::new("  spaced  ").expect("non-empty password");
    assert!(credential.matches("  spaced  "));
    assert!(!credential.matches("spaced"));
}

#[rstest]
fn password_debug_output_is_redacted() {
    let credential = PasswordCredential::new("hunter2").expect("non-empty password");
    let rendered = format!("{credential:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("redacted"));
}

#[rstest]
fn account_debug_output_is_redacted(account: Account) {
    let rendered = format!("{account:?}");
    assert!(!rendered.contains(VALID_PASSWORD));
}

#[rstest]
#[case(Role::User, "USER")]
#[case(Role::Admin, "ADMIN")]
fn role_serialises_uppercase(#[case] role: Role, #[case] expected: &str) {
    let value = serde_json::to_value(role).expect("roles serialise");
    assert_eq!(value, json!(expected));
    assert_eq!(role.to_string(), expected);
}

#[rstest]
#[case::lowercase("admin")]
#[case::mixed_case("Admin")]
#[case::unknown("SUPERUSER")]
fn role_rejects_names_outside_the_closed_set(#[case] raw: &str) {
    let result: Result<Role, _> = serde_json::from_value(json!(raw));
    assert!(result.is_err());
}

#[rstest]
fn role_defaults_to_user() {
    assert_eq!(Role::default(), Role::User);
    assert!(!Role::default().is_admin());
    assert!(Role::Admin.is_admin());
}

#[rstest]
fn new_accounts_start_with_equal_timestamps(account: Account) {
    assert_eq!(account.created_at(), account.updated_at());
    assert_eq!(account.created_at(), at(9, 0));
}

#[rstest]
fn apply_replaces_the_password_and_refreshes_updated_at(mut account: Account) {
    let replacement = PasswordCredential::new("d").expect("non-empty password");
    account.apply(
        AccountChanges {
            password: Some(replacement),
        },
        at(10, 30),
    );

    assert!(account.credential_matches("d"));
    assert!(!account.credential_matches(VALID_PASSWORD));
    assert_eq!(account.updated_at(), at(10, 30));
    assert_eq!(account.created_at(), at(9, 0));
}

#[rstest]
fn apply_with_no_changes_still_counts_as_a_save(mut account: Account) {
    account.apply(AccountChanges::default(), at(11, 0));

    assert!(account.credential_matches(VALID_PASSWORD));
    assert_eq!(account.updated_at(), at(11, 0));
}

#[rstest]
fn apply_clamps_a_backwards_clock_to_created_at(mut account: Account) {
    account.apply(AccountChanges::default(), at(8, 0));

    assert_eq!(account.updated_at(), account.created_at());
}

#[rstest]
fn assign_role_changes_the_role_and_refreshes_updated_at(mut account: Account) {
    account.assign_role(Role::Admin, at(12, 0));

    assert_eq!(account.role(), Role::Admin);
    assert_eq!(account.updated_at(), at(12, 0));
}

#[rstest]
fn account_id_serde_round_trips_through_strings() {
    let id: AccountId = serde_json::from_value(json!(VALID_ID)).expect("valid id");
    let value = serde_json::to_value(id).expect("ids serialise");
    assert_eq!(value, json!(VALID_ID));
}

#[rstest]
fn email_serde_rejects_invalid_input() {
    let result: Result<EmailAddress, _> = serde_json::from_value(json!("not-an-email"));
    assert!(result.is_err());
}
