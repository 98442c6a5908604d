//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators that convert between domain types and the
//! backing store's representation. They contain no business logic.
//!
//! - **memory**: mutex-guarded process-local storage backing the account
//!   repository and the token registry.

pub mod memory;
