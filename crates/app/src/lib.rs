//! # alumnos-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters implement:
//!   `StudentRepository`: CRUD plus the email lookup used for uniqueness
//! - Define the **use-case service** `StudentService`: list, create, get,
//!   replace, merge, delete
//! - Run validation before any mutation reaches the store
//!
//! ## Dependency rule
//! Depends on `alumnos-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
