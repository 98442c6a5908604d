//! Driving port for exchanging login credentials for a bearer token.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::identity::{AccountCredentials, BearerToken};

/// Domain use-case port for token issuance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Verify credentials and mint a token for the matching account.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when no account
    /// matches the credentials. The same failure covers unknown email and
    /// wrong password; issuance must not reveal which part was wrong.
    async fn issue(&self, credentials: &AccountCredentials) -> Result<BearerToken, Error>;
}
