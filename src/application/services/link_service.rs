//! Link creation, lookup, update and deletion service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkUpdate, NewLink, Visibility};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator, validate_custom_code};
use crate::utils::url_validator::validate_long_url;

/// Number of generated candidates tried before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service for managing shortened links.
///
/// Code uniqueness is decided by the repository's insert, never by a prior lookup,
/// so two concurrent requests for the same code cannot both succeed.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Arc<dyn CodeGenerator>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service with the random code generator.
    pub fn new(repository: Arc<L>) -> Self {
        Self::with_generator(repository, Arc::new(RandomCodeGenerator))
    }

    /// Creates a link service with a specific code generator.
    pub fn with_generator(repository: Arc<L>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Creates a short link.
    ///
    /// # Code selection
    ///
    /// - A non-empty `custom_code` is validated and inserted as-is; if taken, the
    ///   request fails with a conflict and nothing is written.
    /// - Otherwise up to [`MAX_GENERATION_ATTEMPTS`] random codes are tried, each
    ///   collision consuming one attempt.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for an empty or non-HTTP(S) `long_url`, or a
    ///   malformed/reserved custom code
    /// - [`AppError::Conflict`] if the custom code already exists
    /// - [`AppError::ExhaustedRetries`] if every generated code collided
    /// - [`AppError::Storage`] on store failures
    pub async fn shorten(&self, request: NewLink) -> Result<Link, AppError> {
        validate_long_url(&request.long_url)?;

        let custom_code = request.custom_code.filter(|c| !c.is_empty());
        if let Some(code) = &custom_code {
            validate_custom_code(code)?;
        }

        let visibility = Visibility::normalize(request.visibility.as_deref());
        let build = |code: String| {
            Link::new(
                code,
                request.long_url.clone(),
                Utc::now(),
                visibility,
                request.expires_at,
            )
        };

        let link = match custom_code {
            Some(code) => {
                let link = build(code);
                self.repository.create(&link).await.map_err(|e| {
                    if e.is_conflict() {
                        AppError::conflict(
                            "Custom code already exists",
                            json!({ "code": link.code }),
                        )
                    } else {
                        e
                    }
                })?;
                link
            }
            None => self.insert_generated(build).await?,
        };

        metrics::counter!("links_created_total").increment(1);
        info!(code = %link.code, visibility = %link.visibility, "Short link created");

        Ok(link)
    }

    async fn insert_generated<F>(&self, build: F) -> Result<Link, AppError>
    where
        F: Fn(String) -> Link,
    {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let link = build(self.generator.generate());

            match self.repository.create(&link).await {
                Ok(()) => return Ok(link),
                Err(e) if e.is_conflict() => {
                    debug!(attempt, code = %link.code, "Generated code collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = MAX_GENERATION_ATTEMPTS,
            "Could not find a free short code"
        );
        Err(AppError::exhausted(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Returns all links that have not expired, newest first.
    ///
    /// Links whose expiry is strictly in the past are left out; they stay stored.
    pub async fn get_all(&self) -> Result<Vec<Link>, AppError> {
        let now = Utc::now();
        let links = self.repository.get_all().await?;

        Ok(links.into_iter().filter(|l| l.is_listed_at(now)).collect())
    }

    /// Retrieves a link by its short code, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn get_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Resolves a code to a link that may be redirected to.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link matches the code
    /// - [`AppError::Expired`] if the link's expiry is at or before now
    pub async fn resolve_redirect(&self, code: &str) -> Result<Link, AppError> {
        let link = self.get_by_code(code).await?;

        if link.is_expired_at(Utc::now()) {
            return Err(AppError::expired(
                "Short link has expired",
                json!({ "code": code, "expires_at": link.expires_at }),
            ));
        }

        Ok(link)
    }

    /// Replaces a link's destination and visibility.
    ///
    /// `created_at` is refreshed; `expires_at` is kept.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link matches the code
    /// - [`AppError::Validation`] for an invalid `long_url`
    pub async fn update(&self, code: &str, update: LinkUpdate) -> Result<Link, AppError> {
        let mut link = self.get_by_code(code).await?;

        validate_long_url(&update.long_url)?;

        link.long_url = update.long_url;
        link.visibility = Visibility::normalize(update.visibility.as_deref());
        link.created_at = Utc::now();

        let updated = self.repository.update(code, &link).await?;
        info!(code = %code, "Short link updated");

        Ok(updated)
    }

    /// Permanently deletes a link. Its visits are kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn delete(&self, code: &str) -> Result<(), AppError> {
        if !self.repository.delete(code).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        }

        info!(code = %code, "Short link deleted");
        Ok(())
    }

    /// Checks that the link store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
