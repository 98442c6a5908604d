//! Account application service implementing the driving ports.
//!
//! Every operation funnels through the authorisation engine before the
//! store is read or written, so the policy in
//! [`crate::domain::authorization`] is the single place access is decided.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageWindow};

use crate::domain::account::{Account, AccountId, Role};
use crate::domain::authorization::{
    AuthorizationEngine, Decision, Operation, UpdateRequest, store_error,
};
use crate::domain::error::Error;
use crate::domain::identity::Identity;
use crate::domain::ports::{AccountRepository, AccountsCommand, AccountsQuery, NewAccount};

/// Application service for the account endpoints.
#[derive(Clone)]
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    engine: AuthorizationEngine,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create a service over `repository`, minting timestamps from `clock`.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::AccountService;
    /// use backend::outbound::memory::MemoryAccountRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = AccountService::new(
    ///     Arc::new(MemoryAccountRepository::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// ```
    pub fn new(repository: Arc<dyn AccountRepository>, clock: Arc<dyn Clock>) -> Self {
        let engine = AuthorizationEngine::new(Arc::clone(&repository));
        Self {
            repository,
            engine,
            clock,
        }
    }

    fn resolved_target(decision: Decision) -> Result<Account, Error> {
        // The engine resolves a target for every record operation it allows.
        decision
            .target
            .ok_or_else(|| Error::internal("authorised record operation carried no target"))
    }
}

#[async_trait]
impl AccountsQuery for AccountService {
    async fn list(
        &self,
        caller: Option<Identity>,
        window: PageWindow,
    ) -> Result<Page<Account>, Error> {
        self.engine.decide(caller.as_ref(), Operation::List).await?;
        let items = self
            .repository
            .find_page(window)
            .await
            .map_err(store_error)?;
        Ok(Page { items, window })
    }

    async fn count(&self, caller: Option<Identity>) -> Result<u64, Error> {
        self.engine
            .decide(caller.as_ref(), Operation::Count)
            .await?;
        self.repository.count().await.map_err(store_error)
    }

    async fn read(&self, caller: Option<Identity>, id: String) -> Result<Account, Error> {
        let decision = self
            .engine
            .decide(caller.as_ref(), Operation::Read { id: &id })
            .await?;
        Self::resolved_target(decision)
    }
}

#[async_trait]
impl AccountsCommand for AccountService {
    async fn create(
        &self,
        caller: Option<Identity>,
        request: NewAccount,
    ) -> Result<Account, Error> {
        self.engine
            .decide(caller.as_ref(), Operation::Create)
            .await?;
        let account = Account::new(
            AccountId::random(),
            request.email,
            request.password,
            Role::default(),
            self.clock.utc(),
        );
        self.repository
            .create(&account)
            .await
            .map_err(store_error)?;
        Ok(account)
    }

    async fn update(
        &self,
        caller: Option<Identity>,
        id: String,
        request: UpdateRequest,
    ) -> Result<Account, Error> {
        let decision = self
            .engine
            .decide(caller.as_ref(), Operation::Update { id: &id })
            .await?;
        let grant = decision.grant;
        let target = Self::resolved_target(decision)?;
        let (changes, ignored) = request.granted_changes(grant);
        if !ignored.is_empty() {
            tracing::debug!(
                account_id = %target.id(),
                ignored = %ignored,
                "dropping fields the update policy does not allow"
            );
        }
        let updated = self
            .repository
            .update(target.id(), changes, self.clock.utc())
            .await
            .map_err(store_error)?;
        // The record can vanish between the decision and the write.
        updated.ok_or_else(|| Error::not_found("Account not found"))
    }

    async fn delete(&self, caller: Option<Identity>, id: String) -> Result<(), Error> {
        let decision = self
            .engine
            .decide(caller.as_ref(), Operation::Delete { id: &id })
            .await?;
        let target = Self::resolved_target(decision)?;
        let removed = self
            .repository
            .delete(target.id())
            .await
            .map_err(store_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found("Account not found"))
        }
    }
}

#[cfg(test)]
mod tests;
