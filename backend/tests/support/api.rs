//! HTTP-level helpers shared by the API integration suites.
//!
//! Integration tests under `backend/tests/` compile as separate crates, so
//! the app assembly and token bootstrap helpers live here to avoid
//! copy/paste drift.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::web;
use serde_json::{Value, json};

use backend::inbound::http::health::HealthState;
use backend::server::{AppDependencies, AppSettings, build_app, build_state};

/// Email of the administrator account seeded at startup.
pub const ADMIN_EMAIL: &str = "director@example.com";
/// Password of the administrator account seeded at startup.
pub const ADMIN_PASSWORD: &str = "chief-of-staff";

/// Settings with the administrator seed enabled and everything else on
/// defaults.
pub fn seeded_settings() -> AppSettings {
    AppSettings {
        bind_addr: None,
        default_page_limit: None,
        admin_email: Some(ADMIN_EMAIL.to_owned()),
        admin_password: Some(ADMIN_PASSWORD.to_owned()),
    }
}

/// Assemble the full application exactly as the server binary does.
pub async fn init_app(
    settings: AppSettings,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let http_state = build_state(&settings).await.expect("state should build");
    let health_state = web::Data::new(HealthState::new());
    test::init_service(build_app(AppDependencies {
        health_state,
        http_state,
    }))
    .await
}

/// Register an account through the public endpoint and return its body.
pub async fn register_account<S>(app: &S, email: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let resp = test::call_service(
        app,
        TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED, "registering {email}");
    test::read_body_json(resp).await
}

/// Obtain a bearer token for the credential pair.
pub async fn obtain_token<S>(app: &S, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let resp = test::call_service(
        app,
        TestRequest::post()
            .uri("/api/v1/tokens/obtain")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK, "obtaining a token for {email}");
    let body: Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("token should be a string")
        .to_owned()
}

/// Authorization header pair carrying `token` as a bearer credential.
pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Assert that no object in `value`, however nested, has a `password` key.
pub fn assert_no_password_key(value: &Value) {
    match value {
        Value::Object(map) => {
            assert!(
                !map.contains_key("password"),
                "response exposes a password field: {value}"
            );
            for nested in map.values() {
                assert_no_password_key(nested);
            }
        }
        Value::Array(items) => {
            for item in items {
                assert_no_password_key(item);
            }
        }
        _ => {}
    }
}
