//! Authentication primitives: login credentials, bearer tokens, and the
//! resolved caller identity.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::account::{AccountId, Role};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated login credentials used when obtaining a token.
///
/// ## Invariants
/// - `email` is trimmed and lowercased so it compares against stored
///   addresses directly; structural email validation is not applied here
///   because an unknown address must fail as a credential mismatch, not a
///   validation error.
/// - `password` must be non-empty but retains caller-provided whitespace to
///   avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl AccountCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// # Errors
    /// Returns a [`CredentialsValidationError`] naming the first blank part.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email string suitable for account lookups.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a presented token is not usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    /// The token text was empty.
    Empty,
    /// The token text contained whitespace.
    EmbeddedWhitespace,
}

impl fmt::Display for TokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "token must not be empty"),
            Self::EmbeddedWhitespace => write!(f, "token must not contain whitespace"),
        }
    }
}

impl std::error::Error for TokenValidationError {}

/// Opaque bearer token exchanged for an identity on every request.
///
/// The text is whatever the issuing service minted; the domain only
/// guarantees it is non-empty and survives an `Authorization` header intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BearerToken(String);

impl BearerToken {
    /// Validate and wrap raw token text.
    ///
    /// # Errors
    /// Rejects empty text and text containing whitespace, which could not
    /// have round-tripped through an `Authorization` header.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenValidationError> {
        let token = token.into();
        if token.is_empty() {
            return Err(TokenValidationError::Empty);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(TokenValidationError::EmbeddedWhitespace);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<BearerToken> for String {
    fn from(value: BearerToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for BearerToken {
    type Error = TokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The authenticated caller as seen by the authorisation rules.
///
/// Produced by the identity resolver from a bearer token; anonymous callers
/// are represented by its absence, never by a sentinel identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    account_id: AccountId,
    role: Role,
}

impl Identity {
    /// Build an identity from resolved components.
    pub fn new(account_id: AccountId, role: Role) -> Self {
        Self { account_id, role }
    }

    /// The account this caller is signed in as.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// The caller's role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the caller carries operator privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether `target` is the caller's own account.
    pub fn owns(&self, target: &AccountId) -> bool {
        &self.account_id == target
    }
}
