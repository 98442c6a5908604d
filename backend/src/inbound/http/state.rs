//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountsCommand, AccountsQuery, IdentityResolver, TokenIssuer};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountsCommand>,
    pub accounts_query: Arc<dyn AccountsQuery>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub identity: Arc<dyn IdentityResolver>,
    /// Page size applied when a listing request names no usable limit.
    pub default_page_limit: u64,
}
