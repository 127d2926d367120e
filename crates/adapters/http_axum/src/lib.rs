//! # alumnos-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON:API** student endpoints under `/api/alumnos`
//! - Reject requests that do not ask for `application/vnd.api+json` before
//!   any handler runs
//! - Map HTTP requests into application service calls (driving adapter)
//! - Render students and errors as JSON:API documents
//!
//! ## Request pipeline
//! tracing → content negotiation → route dispatch → service call →
//! document rendering, with [`error::ApiError`] turning every expected
//! failure into an error document on the way out.
//!
//! ## Dependency rule
//! Depends on `alumnos-app` (for port traits and services) and `alumnos-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod document;
pub mod error;
pub mod negotiation;
pub mod router;
pub mod state;
