//! Content negotiation middleware.

use axum::Json;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::document::MEDIA_TYPE;

#[derive(Serialize)]
struct NotAcceptableBody {
    error: &'static str,
    status: u16,
    details: &'static str,
}

/// Reject any request whose `Accept` header is not exactly the JSON:API media
/// type. Runs before routing, so no handler or storage access happens.
pub async fn require_json_api(request: Request, next: Next) -> Response {
    let accepted = request
        .headers()
        .get(header::ACCEPT)
        .is_some_and(|value| value.as_bytes() == MEDIA_TYPE.as_bytes());

    if !accepted {
        tracing::debug!(
            accept = ?request.headers().get(header::ACCEPT),
            path = %request.uri().path(),
            "rejecting request without JSON:API accept header"
        );
        return not_acceptable();
    }

    next.run(request).await
}

fn not_acceptable() -> Response {
    (
        StatusCode::NOT_ACCEPTABLE,
        Json(NotAcceptableBody {
            error: "Not acceptable",
            status: StatusCode::NOT_ACCEPTABLE.as_u16(),
            details: "Content file not specified",
        }),
    )
        .into_response()
}
