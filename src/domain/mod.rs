//! Domain layer containing the library data model and its integrity rules.
//!
//! # Architecture
//!
//! - [`entities`] - Authors, books, members, profiles and borrowing records
//! - [`repositories`] - Data access trait definitions
//! - [`validation`] - Field-level rules, including foreign-key existence checks
//! - [`clock`] - Current-year source for date-bounded rules
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Referential rules that span aggregates (cascading deletes, orphan removal)
//!   are part of the repository contracts and documented there

pub mod clock;
pub mod entities;
pub mod repositories;
pub mod validation;
