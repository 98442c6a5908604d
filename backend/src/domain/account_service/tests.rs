//! Tests for the account application service.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::rstest;

use super::*;
use crate::domain::account::{AccountChanges, EmailAddress, PasswordCredential};
use crate::domain::authorization::{AccountField, FieldSet};
use crate::domain::error::ErrorCode;
use crate::domain::ports::{AccountStoreError, MockAccountRepository};

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn make_service(repository: MockAccountRepository) -> AccountService {
    AccountService::new(
        Arc::new(repository),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        email: EmailAddress::new(email).expect("fixture email is valid"),
        password: PasswordCredential::new("pw").expect("fixture password is valid"),
    }
}

fn stored_account(email: &str) -> Account {
    Account::new(
        AccountId::random(),
        EmailAddress::new(email).expect("fixture email is valid"),
        PasswordCredential::new("pw").expect("fixture password is valid"),
        Role::User,
        fixture_timestamp(),
    )
}

fn owner_of(account: &Account) -> Identity {
    Identity::new(account.id().clone(), Role::User)
}

fn admin() -> Identity {
    Identity::new(AccountId::random(), Role::Admin)
}

#[rstest]
#[tokio::test]
async fn create_mints_id_role_and_timestamps_for_anonymous_callers() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_create()
        .withf(|account| {
            account.role() == Role::User
                && account.created_at() == account.updated_at()
                && account.email().as_ref() == "new@example.com"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let service = make_service(repository);

    let account = service
        .create(None, new_account("new@example.com"))
        .await
        .expect("creation is open");

    assert_eq!(account.created_at(), fixture_timestamp());
    assert!(account.credential_matches("pw"));
}

#[rstest]
#[tokio::test]
async fn create_surfaces_a_duplicate_email_from_the_store() {
    let mut repository = MockAccountRepository::new();
    repository
        .expect_create()
        .times(1)
        .return_once(|_| Err(AccountStoreError::duplicate_email("new@example.com")));
    let service = make_service(repository);

    let error = service
        .create(None, new_account("new@example.com"))
        .await
        .expect_err("email is taken");

    assert_eq!(error.code(), ErrorCode::Duplicate);
    let details = error
        .details()
        .and_then(|value| value.as_object())
        .expect("details present");
    assert_eq!(
        details.get("email").and_then(|value| value.as_str()),
        Some("new@example.com")
    );
}

#[rstest]
#[tokio::test]
async fn list_returns_the_requested_page_for_admins() {
    let window = PageWindow::try_new(10, 5).expect("valid window");
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_page()
        .withf(move |requested| *requested == window)
        .times(1)
        .return_once(|_| Ok(vec![stored_account("a@example.com")]));
    let service = make_service(repository);

    let page = service
        .list(Some(admin()), window)
        .await
        .expect("admins may list");

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.window, window);
}

#[rstest]
#[tokio::test]
async fn list_rejects_plain_users_without_touching_the_store() {
    let mut repository = MockAccountRepository::new();
    repository.expect_find_page().times(0);
    let service = make_service(repository);
    let caller = owner_of(&stored_account("a@example.com"));

    let error = service
        .list(Some(caller), PageWindow::try_new(0, 20).expect("valid window"))
        .await
        .expect_err("plain users may not list");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn count_returns_the_store_cardinality_for_admins() {
    let mut repository = MockAccountRepository::new();
    repository.expect_count().times(1).return_once(|| Ok(26));
    let service = make_service(repository);

    let count = service.count(Some(admin())).await.expect("admins may count");

    assert_eq!(count, 26);
}

#[rstest]
#[tokio::test]
async fn read_returns_the_callers_own_record() {
    let target = stored_account("own@example.com");
    let caller = owner_of(&target);
    let expected = target.clone();
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(target)));
    let service = make_service(repository);
    let raw_id = caller.account_id().to_string();

    let account = service
        .read(Some(caller), raw_id)
        .await
        .expect("self-access is allowed");

    assert_eq!(account, expected);
}

#[rstest]
#[tokio::test]
async fn update_writes_only_the_granted_changes() {
    let target = stored_account("own@example.com");
    let caller = owner_of(&target);
    let mut saved = target.clone();
    saved.apply(
        AccountChanges {
            password: Some(PasswordCredential::new("d").expect("non-empty password")),
        },
        fixture_timestamp(),
    );
    let lookup = target.clone();
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(lookup)));
    repository
        .expect_update()
        .withf(move |id, changes, at| {
            *id == *target.id() && changes.password.is_some() && *at == fixture_timestamp()
        })
        .times(1)
        .return_once(move |_, _, _| Ok(Some(saved)));
    let service = make_service(repository);
    let raw_id = caller.account_id().to_string();
    let request = UpdateRequest {
        password: Some(PasswordCredential::new("d").expect("non-empty password")),
        requested: FieldSet::of(&[
            AccountField::Id,
            AccountField::Email,
            AccountField::Password,
        ]),
    };

    let account = service
        .update(Some(caller), raw_id, request)
        .await
        .expect("owners may update");

    assert!(account.credential_matches("d"));
    assert_eq!(account.email().as_ref(), "own@example.com");
}

#[rstest]
#[tokio::test]
async fn update_reports_not_found_when_the_record_vanishes() {
    let target = stored_account("own@example.com");
    let caller = owner_of(&target);
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(target)));
    repository
        .expect_update()
        .times(1)
        .return_once(|_, _, _| Ok(None));
    let service = make_service(repository);
    let raw_id = caller.account_id().to_string();

    let error = service
        .update(Some(caller), raw_id, UpdateRequest::default())
        .await
        .expect_err("record vanished mid-flight");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_removes_the_callers_own_record() {
    let target = stored_account("own@example.com");
    let caller = owner_of(&target);
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(target)));
    repository
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(true));
    let service = make_service(repository);
    let raw_id = caller.account_id().to_string();

    service
        .delete(Some(caller), raw_id)
        .await
        .expect("owners may delete");
}

#[rstest]
#[tokio::test]
async fn delete_reports_not_found_when_the_record_vanishes() {
    let target = stored_account("own@example.com");
    let caller = owner_of(&target);
    let mut repository = MockAccountRepository::new();
    repository
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(target)));
    repository
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(false));
    let service = make_service(repository);
    let raw_id = caller.account_id().to_string();

    let error = service
        .delete(Some(caller), raw_id)
        .await
        .expect_err("record vanished mid-flight");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn anonymous_callers_cannot_reach_record_operations() {
    let mut repository = MockAccountRepository::new();
    repository.expect_find_by_id().times(0);
    let service = make_service(repository);

    let error = service
        .read(None, AccountId::random().to_string())
        .await
        .expect_err("authentication is required");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
}
