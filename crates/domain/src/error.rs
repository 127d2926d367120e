//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AlumnosError`]
//! via `From`, so the HTTP boundary has a single enum to map onto responses.

use crate::validation::ValidationErrors;

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum AlumnosError {
    /// One or more attributes failed their rules.
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The backing store failed. The source is kept for logging only.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A lookup by identifier matched no record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} with id {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
