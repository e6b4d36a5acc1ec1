//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, IP geolocation and metrics export.
//!
//! # Modules
//!
//! - [`geo`] - Country lookup (HTTP API and disabled implementations)
//! - [`metrics`] - Prometheus recorder
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod geo;
pub mod metrics;
pub mod persistence;
