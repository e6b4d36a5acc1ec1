//! Repository implementations.
//!
//! Concrete implementations of the domain repository traits. The PostgreSQL ones
//! use SQLx runtime queries mapped through `FromRow`; the in-memory ones back the
//! `memory` storage backend and the HTTP tests.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgVisitRepository`] - Visit logging and analytics queries
//! - [`InMemoryLinkRepository`] / [`InMemoryVisitRepository`] - Process-local stores

pub mod memory;
pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use memory::{InMemoryLinkRepository, InMemoryVisitRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
