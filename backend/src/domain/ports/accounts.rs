//! Driving ports for the account use-cases.
//!
//! In hexagonal terms these are *driving* ports: inbound adapters call them
//! to run account operations without knowing the backing infrastructure.
//! Every method takes the caller as the adapter resolved it; deciding what
//! that caller may do is the implementation's job, not the adapter's.

use async_trait::async_trait;
use pagination::{Page, PageWindow};

use crate::domain::account::{Account, EmailAddress, PasswordCredential};
use crate::domain::authorization::UpdateRequest;
use crate::domain::error::Error;
use crate::domain::identity::Identity;

/// Validated payload for account creation.
///
/// The role is deliberately absent: new accounts always start as plain
/// users, and promotion happens through the store's administrative path.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login email, unique across the store.
    pub email: EmailAddress,
    /// Initial password.
    pub password: PasswordCredential,
}

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsQuery: Send + Sync {
    /// Return one page of accounts in insertion order.
    ///
    /// Admin-only; other callers never learn the collection size.
    async fn list(
        &self,
        caller: Option<Identity>,
        window: PageWindow,
    ) -> Result<Page<Account>, Error>;

    /// Return the exact number of stored accounts. Admin-only.
    async fn count(&self, caller: Option<Identity>) -> Result<u64, Error>;

    /// Fetch the account named by the raw path `id`.
    async fn read(&self, caller: Option<Identity>, id: String) -> Result<Account, Error>;
}

/// Domain use-case port for mutating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Register a new account. Open to anonymous callers.
    async fn create(&self, caller: Option<Identity>, request: NewAccount)
    -> Result<Account, Error>;

    /// Apply the mutable subset of `request` to the account named by `id`.
    async fn update(
        &self,
        caller: Option<Identity>,
        id: String,
        request: UpdateRequest,
    ) -> Result<Account, Error>;

    /// Remove the account named by `id`.
    async fn delete(&self, caller: Option<Identity>, id: String) -> Result<(), Error>;
}
