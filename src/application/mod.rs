//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers and the background visit worker.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation, lookup, update and deletion
//! - [`services::visit_service::VisitService`] - Visit derivation, recording and analytics

pub mod services;
