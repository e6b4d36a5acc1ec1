//! Short code generation and validation utilities.
//!
//! Provides random code generation behind the [`CodeGenerator`] trait and validation
//! for custom user-provided codes.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of generated short codes.
pub const GENERATED_CODE_LENGTH: usize = 6;

/// Reserved codes that cannot be used as short links.
///
/// These are the first path segments of the API routes.
pub const RESERVED_CODES: &[&str] = &[
    "all",
    "shorten",
    "update",
    "delete",
    "analytics",
    "health",
    "metrics",
];

/// Allowed shape of a custom code.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,32}$").expect("valid custom code regex"));

/// Source of candidate short codes.
///
/// Candidates carry no uniqueness guarantee; the link store decides.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Draws 6 characters uniformly from `[A-Za-z0-9]` using the thread-local,
/// OS-seeded RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code()
    }
}

/// Generates a random short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_CODE_LENGTH)
        .map(char::from)
        .collect()
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-32 characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any validation rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("promo_2025").is_ok());
/// assert!(validate_custom_code("ab").is_err());        // Too short
/// assert!(validate_custom_code("my code").is_err());   // Space
/// assert!(validate_custom_code("health").is_err());    // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "Custom code must be 3-32 characters of letters, digits, '_' or '-'",
            json!({ "code": code }),
        ));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(AppError::bad_request(
            "This code is reserved",
            json!({ "code": code }),
        ));
    }

    Ok(())
}
