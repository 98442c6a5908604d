//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Trace correlation surface shared by the middleware and handlers.
pub use domain::{TRACE_ID_HEADER, TraceId};
/// Middleware attaching a trace identifier to every request.
pub use middleware::Trace;
