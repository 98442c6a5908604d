//! Account data model.
//!
//! Validation lives in the newtypes so a constructed [`Account`] is valid by
//! construction. The credential type deliberately implements neither
//! `Serialize` nor `Display`; a response body cannot carry a password because
//! no serialisation path exists for one.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors returned by the account constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a canonical UUID.
    InvalidId,
    /// The email address was empty once trimmed.
    EmptyEmail,
    /// The email address failed the structural check.
    InvalidEmail,
    /// The email address exceeded the storage bound.
    EmailTooLong {
        /// Maximum accepted length in characters.
        max: usize,
    },
    /// The password was empty.
    EmptyPassword,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "account id must not be empty"),
            Self::InvalidId => write!(f, "account id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must name a mailbox and a domain"),
            Self::EmailTooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid, String);

impl AccountId {
    /// Validate and construct an [`AccountId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an already-parsed UUID without a round trip through text.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`AccountId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, AccountValidationError> {
        if id.is_empty() {
            return Err(AccountValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(AccountValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| AccountValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        let AccountId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Maximum accepted email length, the RFC 5321 path limit.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Structural check only: one @, no whitespace, dotted domain.
        // Deliverability is not the domain's problem.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address used as the account's login name.
///
/// ## Invariants
/// - Stored lowercase, so equality doubles as the uniqueness comparison.
/// - Matches the structural pattern `mailbox@domain.tld`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, trim, and lowercase an email address.
    pub fn new(email: impl Into<String>) -> Result<Self, AccountValidationError> {
        Self::from_owned(email.into())
    }

    fn from_owned(email: String) -> Result<Self, AccountValidationError> {
        let normalized = email.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if normalized.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalized) {
            return Err(AccountValidationError::InvalidEmail);
        }

        Ok(Self(normalized))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account password held for verification.
///
/// Memory is zeroed on drop. There is no `Serialize`, `Display`, or plain
/// accessor on purpose; callers verify candidates through
/// [`PasswordCredential::matches`] instead of reading the value back.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordCredential(Zeroizing<String>);

impl PasswordCredential {
    /// Accept a non-empty password, preserving caller-provided whitespace.
    pub fn new(password: impl Into<String>) -> Result<Self, AccountValidationError> {
        let password = password.into();
        if password.is_empty() {
            return Err(AccountValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password)))
    }

    /// Whether `candidate` is exactly the stored password.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }
}

impl fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordCredential(<redacted>)")
    }
}

/// Authorisation role attached to an account.
///
/// The set is closed: a request naming any other role fails validation at
/// the serde boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Ordinary account holder; may act on their own account only.
    #[default]
    User,
    /// Operator; may act on any account and read the collection.
    Admin,
}

impl Role {
    /// Whether this role carries operator privileges.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("USER"),
            Self::Admin => f.write_str("ADMIN"),
        }
    }
}

/// Mutations an authorised update is allowed to carry into [`Account::apply`].
///
/// Built by the application service after filtering the caller's intent
/// through the authorisation grant; fields the policy rejects never appear
/// here.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    /// Replacement password, when the caller supplied one.
    pub password: Option<PasswordCredential>,
}

/// Stored account record.
///
/// ## Invariants
/// - `updated_at >= created_at` at all times.
/// - `id` and `email` are fixed at creation; no mutation path exists for
///   either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: EmailAddress,
    password: PasswordCredential,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Build a new [`Account`] from validated components.
    ///
    /// Both timestamps start at `created_at`.
    pub fn new(
        id: AccountId,
        email: EmailAddress,
        password: PasswordCredential,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password,
            role,
            created_at,
            updated_at: created_at,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Login email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Authorisation role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// When the account was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the account last changed.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `candidate` matches the stored password.
    pub fn credential_matches(&self, candidate: &str) -> bool {
        self.password.matches(candidate)
    }

    /// Apply an authorised mutation and refresh `updated_at`.
    ///
    /// The refresh happens even for an empty change set: a write that
    /// carried only ignored fields still counts as a save.
    pub fn apply(&mut self, changes: AccountChanges, now: DateTime<Utc>) {
        if let Some(password) = changes.password {
            self.password = password;
        }
        self.touch(now);
    }

    /// Reassign the role outside the update policy.
    ///
    /// Role is not a client-mutable field; this is the administrative path
    /// the stores expose for promotion.
    pub fn assign_role(&mut self, role: Role, now: DateTime<Utc>) {
        self.role = role;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        // Clamp so a skewed clock cannot break the timestamp invariant.
        self.updated_at = now.max(self.created_at);
    }
}

#[cfg(test)]
mod tests;
