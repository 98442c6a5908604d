//! Account collection and record HTTP handlers.
//!
//! ```text
//! GET    /api/v1/accounts
//! GET    /api/v1/accounts/count
//! POST   /api/v1/accounts
//! GET    /api/v1/accounts/{id}
//! PUT    /api/v1/accounts/{id}
//! DELETE /api/v1/accounts/{id}
//! ```
//!
//! Handlers translate between the wire and the domain ports. The raw path
//! id travels to the domain untouched; whether it names a record is decided
//! after the caller is authenticated, so the routes here never parse it.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pagination::Page;

use crate::domain::ports::NewAccount;
use crate::domain::{
    Account, AccountField, AccountValidationError, EmailAddress, Error, FieldSet,
    PasswordCredential, Role, UpdateRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::BearerAuth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, missing_field_error};

/// Request payload for registering an account.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request payload for updating an account.
///
/// Only the password is mutable. The other recognised fields are accepted
/// so the policy can log what it discarded; their values are never read.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub id: Option<serde_json::Value>,
    pub email: Option<serde_json::Value>,
    pub role: Option<serde_json::Value>,
    pub created_at: Option<serde_json::Value>,
    pub updated_at: Option<serde_json::Value>,
    pub password: Option<String>,
}

/// Response payload describing one account.
///
/// The credential has no field here, so no handler can leak it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id().to_string(),
            email: account.email().to_string(),
            role: account.role(),
            created_at: account.created_at().to_rfc3339(),
            updated_at: account.updated_at().to_rfc3339(),
        }
    }
}

/// One page of accounts plus the window that produced it.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountPageResponse {
    pub accounts: Vec<AccountResponse>,
    pub skip: u64,
    pub limit: u64,
}

impl From<Page<Account>> for AccountPageResponse {
    fn from(page: Page<Account>) -> Self {
        Self {
            accounts: page.items.into_iter().map(AccountResponse::from).collect(),
            skip: page.window.skip(),
            limit: page.window.limit(),
        }
    }
}

/// Collection cardinality as reported by `GET /accounts/count`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountCountResponse {
    pub accounts: u64,
}

/// Pagination hints accepted by the listing route.
///
/// Both values arrive as raw text; the planner degrades unparseable input
/// to defaults instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    let (field, code) = match err {
        AccountValidationError::EmptyId | AccountValidationError::InvalidId => ("id", "invalid_id"),
        AccountValidationError::EmptyEmail => ("email", "empty_email"),
        AccountValidationError::InvalidEmail => ("email", "invalid_email"),
        AccountValidationError::EmailTooLong { .. } => ("email", "email_too_long"),
        AccountValidationError::EmptyPassword => ("password", "empty_password"),
    };
    field_error(field, code, err.to_string())
}

fn parse_create_request(payload: CreateAccountRequest) -> Result<NewAccount, Error> {
    let email = payload
        .email
        .ok_or_else(|| missing_field_error("email"))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error("password"))?;

    Ok(NewAccount {
        email: EmailAddress::new(email).map_err(map_account_validation_error)?,
        password: PasswordCredential::new(password).map_err(map_account_validation_error)?,
    })
}

fn parse_update_request(payload: UpdateAccountRequest) -> Result<UpdateRequest, Error> {
    let mut requested = FieldSet::EMPTY;
    if payload.id.is_some() {
        requested = requested.with(AccountField::Id);
    }
    if payload.email.is_some() {
        requested = requested.with(AccountField::Email);
    }
    if payload.role.is_some() {
        requested = requested.with(AccountField::Role);
    }
    if payload.created_at.is_some() {
        requested = requested.with(AccountField::CreatedAt);
    }
    if payload.updated_at.is_some() {
        requested = requested.with(AccountField::UpdatedAt);
    }

    let password = match payload.password {
        Some(password) => {
            requested = requested.with(AccountField::Password);
            Some(PasswordCredential::new(password).map_err(map_account_validation_error)?)
        }
        None => None,
    };

    Ok(UpdateRequest {
        password,
        requested,
    })
}

/// List accounts in insertion order, one window at a time.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(
        ("skip" = Option<String>, Query, description = "Records to pass over; unparseable values degrade to 0"),
        ("limit" = Option<String>, Query, description = "Page size; unparseable values degrade to the configured default")
    ),
    responses(
        (status = 200, description = "One page of accounts", body = AccountPageResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "listAccounts",
    security(("BearerToken" = []))
)]
#[get("/accounts")]
pub async fn list_accounts(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    query: web::Query<ListAccountsQuery>,
) -> ApiResult<HttpResponse> {
    let caller = auth.resolve(state.identity.as_ref()).await?;
    let query = query.into_inner();
    let window = pagination::plan(
        query.skip.as_deref(),
        query.limit.as_deref(),
        state.default_page_limit,
    );
    let page = state.accounts_query.list(caller, window).await?;
    Ok(HttpResponse::Ok().json(AccountPageResponse::from(page)))
}

/// Report how many accounts the collection holds.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/count",
    responses(
        (status = 200, description = "Collection cardinality", body = AccountCountResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "countAccounts",
    security(("BearerToken" = []))
)]
#[get("/accounts/count")]
pub async fn count_accounts(
    state: web::Data<HttpState>,
    auth: BearerAuth,
) -> ApiResult<HttpResponse> {
    let caller = auth.resolve(state.identity.as_ref()).await?;
    let accounts = state.accounts_query.count(caller).await?;
    Ok(HttpResponse::Ok().json(AccountCountResponse { accounts }))
}

/// Register a new account.
///
/// Registration is open; the Authorization header is deliberately left
/// unread, so a stale or malformed credential never blocks sign-up.
#[utoipa::path(
    post,
    path = "/api/v1/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "createAccount",
    security([])
)]
#[post("/accounts")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let request = parse_create_request(payload.into_inner())?;
    let account = state.accounts.create(None, request).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(account)))
}

/// Fetch one account.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "The account", body = AccountResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such account", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "getAccount",
    security(("BearerToken" = []))
)]
#[get("/accounts/{id}")]
pub async fn get_account(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = auth.resolve(state.identity.as_ref()).await?;
    let account = state.accounts_query.read(caller, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// Update one account's password.
#[utoipa::path(
    put,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "The updated account", body = AccountResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such account", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "updateAccount",
    security(("BearerToken" = []))
)]
#[put("/accounts/{id}")]
pub async fn update_account(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<UpdateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let caller = auth.resolve(state.identity.as_ref()).await?;
    let request = parse_update_request(payload.into_inner())?;
    let account = state
        .accounts
        .update(caller, path.into_inner(), request)
        .await?;
    Ok(HttpResponse::Ok().json(AccountResponse::from(account)))
}

/// Delete one account.
#[utoipa::path(
    delete,
    path = "/api/v1/accounts/{id}",
    params(("id" = String, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such account", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "deleteAccount",
    security(("BearerToken" = []))
)]
#[delete("/accounts/{id}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = auth.resolve(state.identity.as_ref()).await?;
    state.accounts.delete(caller, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
