//! # alumnos-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `StudentRepository` port defined in `alumnos-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations), including the unique
//!   index that backs email uniqueness
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `alumnos-app` (for port traits) and `alumnos-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod pool;
mod student_repo;

pub use error::StorageError;
pub use pool::{Config, Database};
pub use student_repo::SqliteStudentRepository;
