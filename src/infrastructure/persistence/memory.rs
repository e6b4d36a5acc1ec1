//! In-process repositories backed by `DashMap`.
//!
//! Used with `STORAGE_BACKEND=memory` and by the HTTP integration tests. Data lives
//! only as long as the process.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// In-memory link store.
///
/// DashMap shards its locks, so concurrent reads and writes on different codes do
/// not block each other. [`LinkRepository::create`] goes through the entry API,
/// which holds the shard lock across the check and the insert.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, link: &Link) -> Result<(), AppError> {
        match self.links.entry(link.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": link.code }),
            )),
            Entry::Vacant(slot) => {
                slot.insert(link.clone());
                Ok(())
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self.links.iter().map(|e| e.value().clone()).collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(code).map(|e| e.value().clone()))
    }

    async fn update(&self, code: &str, link: &Link) -> Result<Link, AppError> {
        let Some(mut stored) = self.links.get_mut(code) else {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            ));
        };

        stored.long_url = link.long_url.clone();
        stored.visibility = link.visibility;
        stored.created_at = link.created_at;
        stored.expires_at = link.expires_at;

        Ok(stored.clone())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// In-memory visit log, keyed by short code.
#[derive(Debug)]
pub struct InMemoryVisitRepository {
    visits: DashMap<String, Vec<Visit>>,
    next_id: AtomicI64,
}

impl InMemoryVisitRepository {
    pub fn new() -> Self {
        Self {
            visits: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Total number of visits stored across all codes.
    pub fn len(&self) -> usize {
        self.visits.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryVisitRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn log_visit(&self, visit: NewVisit) -> Result<Visit, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let visit = visit.into_visit(id);

        self.visits
            .entry(visit.code.clone())
            .or_default()
            .push(visit.clone());

        Ok(visit)
    }

    async fn get_analytics(&self, code: &str) -> Result<Vec<Visit>, AppError> {
        let mut visits = self
            .visits
            .get(code)
            .map(|e| e.value().clone())
            .unwrap_or_default();

        visits.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(visits)
    }
}
