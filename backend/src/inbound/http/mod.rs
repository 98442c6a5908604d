//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod bearer;
pub mod error;
pub mod health;
pub mod state;
pub mod tokens;
pub mod validation;

pub use error::ApiResult;
