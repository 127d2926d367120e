//! HTTP error response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use alumnos_domain::error::AlumnosError;
use alumnos_domain::validation::ValidationErrors;

use crate::document::{ErrorDocument, ErrorObject, ErrorSource, JsonApi};

const STORAGE_FAILURE_DETAIL: &str = "Error processing the request. Please try again later.";
const MALFORMED_DETAIL: &str = "The request body is not a valid JSON document.";

/// Maps service failures to JSON:API error documents.
#[derive(Debug)]
pub enum ApiError {
    /// A failure reported by the application layer.
    Service(AlumnosError),
    /// The request body could not be parsed as JSON.
    MalformedDocument(serde_json::Error),
}

impl From<AlumnosError> for ApiError {
    fn from(err: AlumnosError) -> Self {
        Self::Service(err)
    }
}

fn validation_errors(errors: &ValidationErrors) -> Vec<ErrorObject> {
    errors
        .iter()
        .map(|err| ErrorObject {
            details: Some(err.message()),
            source: Some(ErrorSource {
                pointer: format!("/data/attributes/{}", err.field.attribute()),
            }),
            ..ErrorObject::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error")
        })
        .collect()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            Self::Service(AlumnosError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                validation_errors(&errors),
            ),
            Self::Service(AlumnosError::NotFound(err)) => {
                tracing::debug!(error = %err, "resource not found");
                (
                    StatusCode::NOT_FOUND,
                    vec![ErrorObject::new(StatusCode::NOT_FOUND, "Resource not found")],
                )
            }
            Self::Service(AlumnosError::Storage(source)) => {
                tracing::error!(error = ?source, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec![ErrorObject {
                        detail: Some(STORAGE_FAILURE_DETAIL.to_string()),
                        ..ErrorObject::new(StatusCode::INTERNAL_SERVER_ERROR, "Database Error")
                    }],
                )
            }
            Self::MalformedDocument(err) => {
                tracing::debug!(error = %err, "malformed request document");
                (
                    StatusCode::BAD_REQUEST,
                    vec![ErrorObject {
                        detail: Some(MALFORMED_DETAIL.to_string()),
                        ..ErrorObject::new(StatusCode::BAD_REQUEST, "Malformed Document")
                    }],
                )
            }
        };

        (status, JsonApi(ErrorDocument { errors })).into_response()
    }
}
