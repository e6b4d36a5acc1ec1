//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a long URL
//! - [`Visit`] - One recorded redirect of a link
//!
//! Creation and mutation inputs use separate structs: [`NewLink`], [`LinkUpdate`]
//! and [`NewVisit`].

pub mod link;
pub mod visit;

pub use link::{Link, LinkUpdate, NewLink, Visibility};
pub use visit::{NewVisit, Visit};
