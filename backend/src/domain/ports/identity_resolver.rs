//! Driving port for turning a presented bearer token into a caller identity.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate a request without knowing (or importing) the backing token
//! registry. HTTP handler tests stay deterministic by substituting a test
//! double instead of wiring a real token service.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::identity::{BearerToken, Identity};

/// Domain use-case port for request authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve a presented token to the identity that owns it.
    ///
    /// # Errors
    /// Returns [`crate::domain::ErrorCode::Unauthorized`] when the token is
    /// unknown or its account no longer exists.
    async fn resolve(&self, token: &BearerToken) -> Result<Identity, Error>;
}

/// Fixture resolver that accepts every token as one fixed identity.
///
/// Useful in handler tests that exercise authorisation outcomes for a known
/// caller without standing up a token registry.
#[derive(Debug, Clone)]
pub struct FixtureIdentityResolver {
    identity: Identity,
}

impl FixtureIdentityResolver {
    /// Resolve every token to `identity`.
    pub fn resolving(identity: Identity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl IdentityResolver for FixtureIdentityResolver {
    async fn resolve(&self, _token: &BearerToken) -> Result<Identity, Error> {
        Ok(self.identity.clone())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::account::{AccountId, Role};

    #[rstest]
    #[tokio::test]
    async fn fixture_resolver_returns_the_configured_identity() {
        let identity = Identity::new(AccountId::random(), Role::Admin);
        let resolver = FixtureIdentityResolver::resolving(identity.clone());
        let token = BearerToken::new("anything").expect("valid token text");

        let resolved = resolver
            .resolve(&token)
            .await
            .expect("fixture resolution succeeds");
        assert_eq!(resolved, identity);
    }
}
