//! Port abstraction for account persistence adapters and their errors.
//!
//! The store owns two pieces of behaviour the domain relies on but does not
//! implement: email uniqueness (checked atomically with the insert) and
//! per-record atomic read-modify-write for updates. Everything else is plain
//! lookup and windowed retrieval in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageWindow;

use crate::domain::account::{Account, AccountChanges, AccountId, EmailAddress, Role};

use super::define_port_error;

define_port_error! {
    /// Storage errors raised by account repository adapters.
    pub enum AccountStoreError {
        /// The store could not be reached or its state is unusable.
        Unavailable { message: String } => "account store unavailable: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "account store query failed: {message}",
        /// An insert collided with an already-registered email address.
        DuplicateEmail { email: String } => "account email already registered: {email}",
    }
}

/// Port for account storage and retrieval.
///
/// Implementations must keep insertion order observable through
/// [`AccountRepository::find_page`] and make each mutation atomic per
/// record: an update either lands entirely (field change plus `updated_at`
/// refresh) or not at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, enforcing email uniqueness atomically.
    async fn create(&self, account: &Account) -> Result<(), AccountStoreError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError>;

    /// Fetch an account by its normalised email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Fetch one window of accounts in insertion order.
    ///
    /// A window starting past the end of the collection yields an empty
    /// vector, not an error.
    async fn find_page(&self, window: PageWindow) -> Result<Vec<Account>, AccountStoreError>;

    /// Total number of stored accounts, ignoring any window.
    async fn count(&self) -> Result<u64, AccountStoreError>;

    /// Apply authorised changes to one account and stamp `updated_at` with
    /// `at`.
    ///
    /// Returns the updated record, or `None` when no account has this id.
    async fn update(
        &self,
        id: &AccountId,
        changes: AccountChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Remove an account. Returns whether a record was deleted.
    async fn delete(&self, id: &AccountId) -> Result<bool, AccountStoreError>;

    /// Administrative role reassignment, outside the client update policy.
    ///
    /// Returns the updated record, or `None` when no account has this id.
    async fn assign_role(
        &self,
        id: &AccountId,
        role: Role,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountStoreError>;
}
