//! In-memory token registry issuing and resolving bearer tokens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::authorization::store_error;
use crate::domain::ports::{AccountRepository, IdentityResolver, TokenIssuer};
use crate::domain::{AccountCredentials, AccountId, BearerToken, EmailAddress, Error, Identity};

/// Token registry backed by a process-local map.
///
/// Issuance verifies credentials against the account repository. Resolution
/// re-reads the account on every call, so a role change takes effect on the
/// next request and a deleted account's tokens stop resolving.
pub struct MemoryTokenService {
    tokens: Mutex<HashMap<String, AccountId>>,
    repository: Arc<dyn AccountRepository>,
}

impl MemoryTokenService {
    /// Create an empty registry over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self {
            tokens: Mutex::new(HashMap::new()),
            repository,
        }
    }

    fn guard(&self) -> Result<MutexGuard<'_, HashMap<String, AccountId>>, Error> {
        self.tokens
            .lock()
            .map_err(|_| Error::service_unavailable("token registry lock poisoned"))
    }

    // One message for every issuance failure; the response must not reveal
    // which part of the pair was wrong.
    fn rejected() -> Error {
        Error::unauthorized("Invalid email or password")
    }

    fn unresolvable() -> Error {
        Error::unauthorized("Invalid bearer token")
    }
}

#[async_trait]
impl TokenIssuer for MemoryTokenService {
    async fn issue(&self, credentials: &AccountCredentials) -> Result<BearerToken, Error> {
        // An address that cannot be stored cannot name an account.
        let Ok(email) = EmailAddress::new(credentials.email()) else {
            return Err(Self::rejected());
        };
        let account = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(store_error)?
            .ok_or_else(Self::rejected)?;
        if !account.credential_matches(credentials.password()) {
            return Err(Self::rejected());
        }

        let token = BearerToken::new(Uuid::new_v4().simple().to_string())
            .map_err(|_| Error::internal("minted token text was unusable"))?;
        self.guard()?
            .insert(String::from(token.clone()), account.id().clone());
        Ok(token)
    }
}

#[async_trait]
impl IdentityResolver for MemoryTokenService {
    async fn resolve(&self, token: &BearerToken) -> Result<Identity, Error> {
        let account_id = {
            let tokens = self.guard()?;
            tokens.get(token.as_ref()).cloned()
        };
        let Some(account_id) = account_id else {
            return Err(Self::unresolvable());
        };

        // Re-read so the identity reflects the account's current role.
        let account = self
            .repository
            .find_by_id(&account_id)
            .await
            .map_err(store_error)?;
        let Some(account) = account else {
            // The account is gone; its tokens must stop working.
            self.guard()?.remove(token.as_ref());
            return Err(Self::unresolvable());
        };
        Ok(Identity::new(account.id().clone(), account.role()))
    }
}
