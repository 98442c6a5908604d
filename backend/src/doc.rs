//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: all HTTP endpoints from the inbound layer (accounts,
//!   tokens, health)
//! - **Schemas**: request and response bodies plus the shared error payload
//! - **Security**: bearer token authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Role};
use crate::inbound::http::accounts::{
    AccountCountResponse, AccountPageResponse, AccountResponse, CreateAccountRequest,
    UpdateAccountRequest,
};
use crate::inbound::http::tokens::{ObtainTokenRequest, TokenResponse};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                Http::builder()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/v1/tokens/obtain."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Roster backend API",
        description = "HTTP interface for account management, token issuance, and health probes.",
        license(name = "MIT", url = "https://opensource.org/license/mit/")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::list_accounts,
        crate::inbound::http::accounts::count_accounts,
        crate::inbound::http::accounts::create_account,
        crate::inbound::http::accounts::get_account,
        crate::inbound::http::accounts::update_account,
        crate::inbound::http::accounts::delete_account,
        crate::inbound::http::tokens::obtain_token,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        AccountResponse,
        AccountPageResponse,
        AccountCountResponse,
        CreateAccountRequest,
        UpdateAccountRequest,
        ObtainTokenRequest,
        TokenResponse,
        Role,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "accounts", description = "Operations on stored accounts"),
        (name = "tokens", description = "Bearer token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
