//! Utility functions for code generation, input validation, and request handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation and custom code validation
//! - [`url_validator`] - Destination URL validation
//! - [`user_agent`] - Browser and device classification
//! - [`client_ip`] - Client address extraction from HTTP headers

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;
pub mod user_agent;
