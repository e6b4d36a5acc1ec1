//! Domain layer containing business entities and the visit pipeline.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`visit_event`] - Raw redirect data queued for recording
//! - [`visit_worker`] - Background worker that records queued visits
//!
//! # Visit Processing Flow
//!
//! 1. The redirect handler resolves a live link
//! 2. A [`visit_event::VisitEvent`] is pushed to a bounded channel (never awaited)
//! 3. [`visit_worker::run_visit_worker`] derives country, browser and device
//! 4. The visit is persisted via [`repositories::VisitRepository`] with retry

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
