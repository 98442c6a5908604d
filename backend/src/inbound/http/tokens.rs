//! Token issuance HTTP handlers.
//!
//! ```text
//! POST /api/v1/tokens/obtain
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountCredentials, CredentialsValidationError, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_error, missing_field_error};

/// Request payload for exchanging credentials for a token.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObtainTokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response payload carrying a freshly minted token.
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    let (field, code) = match err {
        CredentialsValidationError::EmptyEmail => ("email", "empty_email"),
        CredentialsValidationError::EmptyPassword => ("password", "empty_password"),
    };
    field_error(field, code, err.to_string())
}

fn parse_obtain_request(payload: ObtainTokenRequest) -> Result<AccountCredentials, Error> {
    let email = payload
        .email
        .ok_or_else(|| missing_field_error("email"))?;
    let password = payload
        .password
        .ok_or_else(|| missing_field_error("password"))?;
    AccountCredentials::try_from_parts(&email, &password).map_err(map_credentials_validation_error)
}

/// Exchange an email/password pair for a bearer token.
///
/// A rejection never states which part of the pair was wrong.
#[utoipa::path(
    post,
    path = "/api/v1/tokens/obtain",
    request_body = ObtainTokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Credentials rejected", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["tokens"],
    operation_id = "obtainToken",
    security([])
)]
#[post("/tokens/obtain")]
pub async fn obtain_token(
    state: web::Data<HttpState>,
    payload: web::Json<ObtainTokenRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_obtain_request(payload.into_inner())?;
    let token = state.tokens.issue(&credentials).await?;
    Ok(HttpResponse::Ok().json(TokenResponse {
        token: String::from(token),
    }))
}
