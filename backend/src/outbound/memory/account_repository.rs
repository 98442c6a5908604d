//! Mutex-guarded in-memory account store.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageWindow;

use crate::domain::ports::{AccountRepository, AccountStoreError};
use crate::domain::{Account, AccountChanges, AccountId, EmailAddress, Role};

/// In-memory [`AccountRepository`] holding records in insertion order.
///
/// One mutex serialises every operation. That is what makes the
/// check-then-insert in `create` and the read-modify-write in `update`
/// atomic: no interleaving can register an email twice or tear a password
/// change apart from its `updated_at` refresh.
#[derive(Debug, Default)]
pub struct MemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<Account>>, AccountStoreError> {
        self.accounts
            .lock()
            .map_err(|_| AccountStoreError::unavailable("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: &Account) -> Result<(), AccountStoreError> {
        let mut accounts = self.guard()?;
        if accounts
            .iter()
            .any(|stored| stored.email() == account.email())
        {
            return Err(AccountStoreError::duplicate_email(account.email().clone()));
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.guard()?;
        Ok(accounts.iter().find(|stored| stored.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError> {
        let accounts = self.guard()?;
        Ok(accounts
            .iter()
            .find(|stored| stored.email() == email)
            .cloned())
    }

    async fn find_page(&self, window: PageWindow) -> Result<Vec<Account>, AccountStoreError> {
        let accounts = self.guard()?;
        let skip = usize::try_from(window.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        Ok(accounts.iter().skip(skip).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<u64, AccountStoreError> {
        let accounts = self.guard()?;
        Ok(accounts.len() as u64)
    }

    async fn update(
        &self,
        id: &AccountId,
        changes: AccountChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut accounts = self.guard()?;
        let Some(stored) = accounts.iter_mut().find(|stored| stored.id() == id) else {
            return Ok(None);
        };
        stored.apply(changes, at);
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: &AccountId) -> Result<bool, AccountStoreError> {
        let mut accounts = self.guard()?;
        let Some(index) = accounts.iter().position(|stored| stored.id() == id) else {
            return Ok(false);
        };
        accounts.remove(index);
        Ok(true)
    }

    async fn assign_role(
        &self,
        id: &AccountId,
        role: Role,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut accounts = self.guard()?;
        let Some(stored) = accounts.iter_mut().find(|stored| stored.id() == id) else {
            return Ok(None);
        };
        stored.assign_role(role, at);
        Ok(Some(stored.clone()))
    }
}
