//! Repository trait for visit analytics.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and reading visits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryVisitRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit.
    ///
    /// The referenced code is not checked; visits may outlive their link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn log_visit(&self, visit: NewVisit) -> Result<Visit, AppError>;

    /// Returns all visits recorded for `code`, oldest first.
    ///
    /// No expiry filtering or pagination is applied. Unknown codes yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn get_analytics(&self, code: &str) -> Result<Vec<Visit>, AppError>;
}
