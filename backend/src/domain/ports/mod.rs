//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod accounts;
mod identity_resolver;
mod token_issuer;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountStoreError};
#[cfg(test)]
pub use accounts::{MockAccountsCommand, MockAccountsQuery};
pub use accounts::{AccountsCommand, AccountsQuery, NewAccount};
#[cfg(test)]
pub use identity_resolver::MockIdentityResolver;
pub use identity_resolver::{FixtureIdentityResolver, IdentityResolver};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::TokenIssuer;
