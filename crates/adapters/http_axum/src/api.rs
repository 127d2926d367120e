//! JSON:API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod students;

use axum::Router;
use axum::routing::get;

use alumnos_app::ports::StudentRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<SR>() -> Router<AppState<SR>>
where
    SR: StudentRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/alumnos",
            get(students::list::<SR>).post(students::create::<SR>),
        )
        .route(
            "/alumnos/{id}",
            get(students::get::<SR>)
                .put(students::replace::<SR>)
                .patch(students::merge::<SR>)
                .delete(students::delete::<SR>),
        )
}
