//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are read through [`crate::api::extractors::AppJson`]; field rules
//! live in the services.

pub mod health;
pub mod link;
pub mod shorten;
pub mod update_link;
pub mod visit;
