//! Server construction and wiring.
//!
//! Assembly is split from binding so the full router can be driven from
//! integration tests and the OpenAPI dump binary without opening a socket.

mod config;

pub use config::AppSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::info;

#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::AccountRepository;
use crate::domain::{Account, AccountId, AccountService, EmailAddress, PasswordCredential, Role};
use crate::inbound::http::accounts::{
    count_accounts, create_account, delete_account, get_account, list_accounts, update_account,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::tokens::obtain_token;
use crate::middleware::Trace;
use crate::outbound::memory::{MemoryAccountRepository, MemoryTokenService};

/// Shared data each worker's `App` instance clones.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

/// Wire the in-memory adapters into the HTTP adapter state.
///
/// When the settings carry administrator credentials, that account is
/// seeded and promoted before the state reaches any worker, so the first
/// request already sees it.
///
/// # Errors
/// Returns [`std::io::Error`] when the configured administrator
/// credentials are unusable or the seed write is rejected.
pub async fn build_state(settings: &AppSettings) -> std::io::Result<web::Data<HttpState>> {
    let repository = Arc::new(MemoryAccountRepository::new());
    if let Some((email, password)) = settings.admin_credentials() {
        seed_admin(repository.as_ref(), email, password).await?;
    }

    let service = Arc::new(AccountService::new(
        repository.clone(),
        Arc::new(DefaultClock),
    ));
    let tokens = Arc::new(MemoryTokenService::new(repository.clone()));

    Ok(web::Data::new(HttpState {
        accounts: service.clone(),
        accounts_query: service,
        tokens: tokens.clone(),
        identity: tokens,
        default_page_limit: settings.default_page_limit(),
    }))
}

/// Register the configured administrator through the store's
/// administrative path.
///
/// The account starts with the default role and is promoted afterwards;
/// the public update policy never grants a role change.
async fn seed_admin(
    repository: &MemoryAccountRepository,
    email: &str,
    password: &str,
) -> std::io::Result<()> {
    let email = EmailAddress::new(email)
        .map_err(|err| std::io::Error::other(format!("administrator email rejected: {err}")))?;
    let credential = PasswordCredential::new(password)
        .map_err(|err| std::io::Error::other(format!("administrator password rejected: {err}")))?;

    let clock = DefaultClock;
    let account = Account::new(
        AccountId::random(),
        email,
        credential,
        Role::default(),
        clock.utc(),
    );
    repository
        .create(&account)
        .await
        .map_err(|err| std::io::Error::other(format!("administrator seed rejected: {err}")))?;
    repository
        .assign_role(account.id(), Role::Admin, clock.utc())
        .await
        .map_err(|err| std::io::Error::other(format!("administrator promotion rejected: {err}")))?;
    info!(account_id = %account.id(), "administrator account seeded");
    Ok(())
}

/// Assemble the actix application with every route and middleware layer.
///
/// `/accounts/count` is registered ahead of `/accounts/{id}` so the
/// literal segment is never captured as an identifier.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(obtain_token)
        .service(count_accounts)
        .service(list_accounts)
        .service(create_account)
        .service(get_account)
        .service(update_account)
        .service(delete_account);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from loaded settings.
///
/// Readiness flips only after the socket is bound, so probes cannot pass
/// before the listener can accept connections.
///
/// # Errors
/// Propagates [`std::io::Error`] when the administrator seed fails or
/// binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: AppSettings,
) -> std::io::Result<Server> {
    let http_state = build_state(&settings).await?;

    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state,
    };
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(settings.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
