//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Implementations must enforce uniqueness of `code` themselves: [`Self::create`] is
/// the only place where a code is claimed, and it must fail with a distinguishable
/// conflict when the code is taken.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a link with the same code already exists.
    /// Nothing is written in that case.
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn create(&self, link: &Link) -> Result<(), AppError>;

    /// Returns every stored link, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_all(&self) -> Result<Vec<Link>, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Overwrites the stored link with `code` and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches `code`.
    /// Returns [`AppError::Storage`] on database errors.
    async fn update(&self, code: &str, link: &Link) -> Result<Link, AppError>;

    /// Permanently removes a link.
    ///
    /// Returns `Ok(true)` if a link was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
