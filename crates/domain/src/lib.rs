//! # alumnos-domain
//!
//! Pure domain model for the alumnos student registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifier, error conventions, timestamps
//! - Define the **Student** record and its partial-update form
//! - Define the per-field **validation rules** (required, string, min length,
//!   email syntax) and the messages reported when they fail
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod student;
pub mod validation;
