//! Domain model for the account service.
//!
//! Purpose: define the strongly typed account aggregate, the identities
//! callers present, and the authorisation policy that decides what each
//! caller may do. Keep types valid by construction and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Account`] and its newtypes — the stored account aggregate.
//! - [`Identity`] and [`BearerToken`] — who is calling.
//! - [`AuthorizationEngine`] — the single place access is decided.
//! - [`AccountService`] — application service behind the HTTP handlers.
//! - [`Error`] / [`ErrorCode`] — API error payload shared by every endpoint.

pub mod account;
pub mod account_service;
pub mod authorization;
pub mod error;
pub mod identity;
pub mod ports;
pub mod trace_id;

pub use self::account::{
    Account, AccountChanges, AccountId, AccountValidationError, EMAIL_MAX, EmailAddress,
    PasswordCredential, Role,
};
pub use self::account_service::AccountService;
pub use self::authorization::{
    AccountField, AuthorizationEngine, Decision, FieldSet, Grant, Operation, UpdateRequest,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    AccountCredentials, BearerToken, CredentialsValidationError, Identity, TokenValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
