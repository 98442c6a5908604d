//! Process-local adapters backing the domain ports.
//!
//! Both adapters guard their state with a [`std::sync::Mutex`]; nothing
//! survives a restart. They exist so the service runs complete without
//! external infrastructure, and so tests exercise real port semantics
//! without doubles.

mod account_repository;
mod token_service;

pub use account_repository::MemoryAccountRepository;
pub use token_service::MemoryTokenService;
