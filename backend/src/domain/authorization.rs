//! Role and ownership authorisation rules for account operations.
//!
//! [`AuthorizationEngine::decide`] is the single entry point. Rules apply in
//! a fixed precedence: creation is open to anyone, every other operation
//! demands an authenticated caller before the target is even looked up,
//! collection operations demand the admin role, and targeted operations
//! resolve the record first and then require the admin role or ownership.
//!
//! Deciding authentication before target resolution is what keeps record
//! existence unobservable to anonymous callers: they receive the same
//! `Unauthorized` answer whether or not the id names a record.
//!
//! The engine holds no mutable state and performs no writes; deciding the
//! same request against the same store state yields the same outcome.

use std::fmt;
use std::sync::Arc;

use serde_json::json;

use crate::domain::account::{Account, AccountChanges, AccountId, PasswordCredential};
use crate::domain::error::Error;
use crate::domain::identity::Identity;
use crate::domain::ports::{AccountRepository, AccountStoreError};

/// Fields of the stored account record, as the authorisation policy sees
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    /// Stable identifier; never mutable.
    Id,
    /// Login email; never mutable through the public update path.
    Email,
    /// Password credential; the only client-mutable field.
    Password,
    /// Authorisation role; changes only through the administrative path.
    Role,
    /// Creation timestamp; set once.
    CreatedAt,
    /// Last-change timestamp; refreshed by the store on mutation.
    UpdatedAt,
}

impl AccountField {
    /// Every field, in wire order.
    pub const ALL: [Self; 6] = [
        Self::Id,
        Self::Email,
        Self::Password,
        Self::Role,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    const fn mask(self) -> u8 {
        1 << self as u8
    }

    /// The field's name as it appears in response bodies.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Email => "email",
            Self::Password => "password",
            Self::Role => "role",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

/// Set of [`AccountField`]s, used for the per-operation allow-lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSet(u8);

impl FieldSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Build a set from the listed fields.
    pub const fn of(fields: &[AccountField]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < fields.len() {
            bits |= fields[i].mask();
            i += 1;
        }
        Self(bits)
    }

    /// Whether `field` is in the set.
    pub const fn contains(self, field: AccountField) -> bool {
        self.0 & field.mask() != 0
    }

    /// The set with `field` added.
    pub const fn with(self, field: AccountField) -> Self {
        Self(self.0 | field.mask())
    }

    /// Fields present in `self` but not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Whether the set holds no fields.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Wire names of the member fields, in wire order.
    pub fn names(self) -> Vec<&'static str> {
        AccountField::ALL
            .iter()
            .copied()
            .filter(|field| self.contains(*field))
            .map(AccountField::wire_name)
            .collect()
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}

/// Result-shaping directive attached to an allowed operation.
///
/// `visible` names the record fields a response may carry; `mutable` names
/// the fields an update may change. Both are fixed per operation kind, which
/// makes the field contract checkable by tests instead of being implied by
/// scattered handler logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    visible: FieldSet,
    mutable: FieldSet,
}

/// Record fields responses may expose. The password credential is absent:
/// no read path includes it.
const VIEWABLE: FieldSet = FieldSet::of(&[
    AccountField::Id,
    AccountField::Email,
    AccountField::Role,
    AccountField::CreatedAt,
    AccountField::UpdatedAt,
]);

impl Grant {
    /// Grant for operations that read or remove records.
    pub const fn viewing() -> Self {
        Self {
            visible: VIEWABLE,
            mutable: FieldSet::EMPTY,
        }
    }

    /// Grant for the update operation: password is the whole allow-list.
    pub const fn updating() -> Self {
        Self {
            visible: VIEWABLE,
            mutable: FieldSet::of(&[AccountField::Password]),
        }
    }

    /// Fields a response may carry.
    pub const fn visible(self) -> FieldSet {
        self.visible
    }

    /// Fields an update may change.
    pub const fn mutable(self) -> FieldSet {
        self.mutable
    }
}

/// An account operation as named by an inbound request.
///
/// Targeted operations carry the raw path id text: parsing it is part of
/// target resolution, which must not happen before the caller is
/// authenticated.
#[derive(Debug, Clone, Copy)]
pub enum Operation<'a> {
    /// Page through the whole collection.
    List,
    /// Count the whole collection.
    Count,
    /// Create a new account.
    Create,
    /// Read one account.
    Read {
        /// Raw target id text from the request path.
        id: &'a str,
    },
    /// Update one account.
    Update {
        /// Raw target id text from the request path.
        id: &'a str,
    },
    /// Delete one account.
    Delete {
        /// Raw target id text from the request path.
        id: &'a str,
    },
}

/// Outcome of an allowed operation: the resolved target (for targeted
/// operations) and the result-shaping grant.
#[derive(Debug, Clone)]
pub struct Decision {
    /// The record the operation acts on; `None` for collection operations
    /// and creation.
    pub target: Option<Account>,
    /// Field allow-lists for shaping the result.
    pub grant: Grant,
}

/// The caller's update intent before the policy filters it.
///
/// `requested` records every recognised field the client named, including
/// ones the policy will ignore; the service logs the discarded remainder.
#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    /// Replacement password, when supplied.
    pub password: Option<PasswordCredential>,
    /// All recognised fields the client named in the payload.
    pub requested: FieldSet,
}

impl UpdateRequest {
    /// Filter the intent through a grant's mutable allow-list.
    ///
    /// Returns the applicable changes and the set of requested fields the
    /// policy discarded.
    pub fn granted_changes(self, grant: Grant) -> (AccountChanges, FieldSet) {
        let ignored = self.requested.difference(grant.mutable());
        let password = if grant.mutable().contains(AccountField::Password) {
            self.password
        } else {
            None
        };
        (AccountChanges { password }, ignored)
    }
}

/// Translate a store failure into a transport-agnostic domain error.
pub(crate) fn store_error(error: AccountStoreError) -> Error {
    match error {
        AccountStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("account store unavailable: {message}"))
        }
        AccountStoreError::Query { message } => {
            Error::internal(format!("account store error: {message}"))
        }
        AccountStoreError::DuplicateEmail { email } => {
            Error::duplicate("Email already registered").with_details(json!({ "email": email }))
        }
    }
}

/// Stateless policy deciding whether a caller may perform an operation.
#[derive(Clone)]
pub struct AuthorizationEngine {
    repository: Arc<dyn AccountRepository>,
}

impl AuthorizationEngine {
    /// Build an engine that resolves targets through `repository`.
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    /// Decide one operation for one caller.
    ///
    /// # Errors
    /// - `Unauthorized` when the operation needs a caller and none is
    ///   present, before anything else is examined.
    /// - `Forbidden` when the caller's role or ownership does not cover the
    ///   operation.
    /// - `NotFound` when a targeted operation names no existing record,
    ///   which includes ids that are not well-formed.
    pub async fn decide(
        &self,
        caller: Option<&Identity>,
        operation: Operation<'_>,
    ) -> Result<Decision, Error> {
        match operation {
            Operation::Create => Ok(Decision {
                target: None,
                grant: Grant::viewing(),
            }),
            Operation::List | Operation::Count => {
                let caller = require_identity(caller)?;
                if !caller.is_admin() {
                    return Err(Error::forbidden("Administrator role required"));
                }
                Ok(Decision {
                    target: None,
                    grant: Grant::viewing(),
                })
            }
            Operation::Read { id } | Operation::Delete { id } => {
                let caller = require_identity(caller)?;
                let target = self.resolve_target(caller, id).await?;
                Ok(Decision {
                    target: Some(target),
                    grant: Grant::viewing(),
                })
            }
            Operation::Update { id } => {
                let caller = require_identity(caller)?;
                let target = self.resolve_target(caller, id).await?;
                Ok(Decision {
                    target: Some(target),
                    grant: Grant::updating(),
                })
            }
        }
    }

    /// Resolve a targeted operation's record and check ownership.
    ///
    /// Runs only for authenticated callers; the id text is parsed here so a
    /// malformed id behaves exactly like an absent record.
    async fn resolve_target(&self, caller: &Identity, raw_id: &str) -> Result<Account, Error> {
        let Ok(id) = AccountId::new(raw_id) else {
            return Err(Error::not_found("Account not found"));
        };
        let target = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| Error::not_found("Account not found"))?;

        if caller.is_admin() || caller.owns(target.id()) {
            Ok(target)
        } else {
            Err(Error::forbidden("You may only manage your own account"))
        }
    }
}

fn require_identity(caller: Option<&Identity>) -> Result<&Identity, Error> {
    caller.ok_or_else(|| Error::unauthorized("Authentication required"))
}
