//! Shared application state for axum handlers.

use std::sync::Arc;

use alumnos_app::ports::StudentRepository;
use alumnos_app::services::student_service::StudentService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not need to
/// be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<SR> {
    /// Student CRUD service.
    pub student_service: Arc<StudentService<SR>>,
    /// Public origin used to build `self` links, without a trailing slash.
    pub base_url: Arc<str>,
}

impl<SR> Clone for AppState<SR> {
    fn clone(&self) -> Self {
        Self {
            student_service: Arc::clone(&self.student_service),
            base_url: Arc::clone(&self.base_url),
        }
    }
}

impl<SR> AppState<SR>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    /// Create a new application state.
    ///
    /// Trailing slashes are stripped from `base_url` so links never contain
    /// a double slash.
    pub fn new(student_service: StudentService<SR>, base_url: &str) -> Self {
        Self {
            student_service: Arc::new(student_service),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        }
    }
}
