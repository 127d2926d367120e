//! Axum router assembly.

use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use alumnos_app::ports::StudentRepository;

use crate::negotiation::require_json_api;
use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Student routes live under `/api` behind the JSON:API `Accept` check;
/// `/health` sits outside that check.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<SR>(state: AppState<SR>) -> Router
where
    SR: StudentRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api",
            crate::api::routes::<SR>().layer(middleware::from_fn(require_json_api)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
