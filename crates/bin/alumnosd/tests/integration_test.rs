//! End-to-end tests for the full alumnosd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repo,
//! real service, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`: no TCP port is bound.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use alumnos_adapter_http_axum::document::MEDIA_TYPE;
use alumnos_adapter_http_axum::router;
use alumnos_adapter_http_axum::state::AppState;
use alumnos_adapter_storage_sqlite_sqlx::{Config, SqliteStudentRepository};
use alumnos_app::services::student_service::StudentService;

const BASE_URL: &str = "http://localhost:3000";

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let service = StudentService::new(SqliteStudentRepository::new(db.pool().clone()));
    router::build(AppState::new(service, BASE_URL))
}

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::ACCEPT, MEDIA_TYPE)
        .header(header::CONTENT_TYPE, MEDIA_TYPE)
        .body(body.map_or_else(Body::empty, |value| Body::from(value.to_string())))
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();

    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        headers,
        body,
    }
}

fn student(nombre: &str, direccion: &str, email: &str) -> Value {
    json!({
        "data": {
            "type": "Alumnos",
            "attributes": { "nombre": nombre, "direccion": direccion, "email": email }
        }
    })
}

fn not_found() -> Value {
    json!({ "errors": [{ "status": "404", "title": "Resource not found" }] })
}

fn pointers(body: &Value) -> Vec<&str> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|err| err["source"]["pointer"].as_str().unwrap())
        .collect()
}

async fn count(app: &axum::Router) -> usize {
    let reply = send(app, Method::GET, "/api/alumnos", None).await;
    reply.body["data"].as_array().unwrap().len()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Content negotiation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_reject_every_api_route_without_accept_header() {
    let app = app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    for (method, uri) in [
        (Method::GET, "/api/alumnos"),
        (Method::POST, "/api/alumnos"),
        (Method::GET, "/api/alumnos/1"),
        (Method::PUT, "/api/alumnos/1"),
        (Method::PATCH, "/api/alumnos/1"),
        (Method::DELETE, "/api/alumnos/1"),
    ] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri(uri)
                    .header(header::ACCEPT, "application/json")
                    .body(Body::from(student("Bo", "", "nope").to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_ACCEPTABLE, "{method} {uri}");
        let body: Value =
            serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap();
        assert_eq!(
            body,
            json!({
                "error": "Not acceptable",
                "status": 406,
                "details": "Content file not specified"
            })
        );
    }

    // Nothing was deleted or modified by the rejected requests.
    let ana = send(&app, Method::GET, "/api/alumnos/1", None).await;
    assert_eq!(ana.status, StatusCode::OK);
    assert_eq!(ana.body["data"]["attributes"]["nombre"], "Ana María");
    assert_eq!(count(&app).await, 1);
}

// ---------------------------------------------------------------------------
// Student CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_student_crud_cycle() {
    let app = app().await;

    // Empty collection
    let list = send(&app, Method::GET, "/api/alumnos", None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.headers[header::CONTENT_TYPE], MEDIA_TYPE);
    assert_eq!(list.body, json!({ "data": [], "jsonapi": { "version": "1.0" } }));

    // Create
    let created = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    let self_link = format!("{BASE_URL}/api/alumnos/{id}");
    assert_eq!(created.headers[header::LOCATION], self_link.as_str());
    assert_eq!(
        created.body,
        json!({
            "data": {
                "id": id,
                "type": "Alumnos",
                "attributes": {
                    "nombre": "Ana María",
                    "direccion": "Calle 1",
                    "email": "ana@example.com"
                },
                "links": { "self": self_link }
            },
            "jsonapi": { "version": "1.0" }
        })
    );

    // Read back
    let read = send(&app, Method::GET, &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body, created.body);

    // Replace
    let replaced = send(
        &app,
        Method::PUT,
        &format!("/api/alumnos/{id}"),
        Some(student("Ana María López", "Calle 2", "ana.lopez@example.com")),
    )
    .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(
        replaced.body["data"]["attributes"],
        json!({
            "nombre": "Ana María López",
            "direccion": "Calle 2",
            "email": "ana.lopez@example.com"
        })
    );

    // Listed
    let list = send(&app, Method::GET, "/api/alumnos", None).await;
    assert_eq!(list.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(list.body["data"][0]["id"], id.as_str());

    // Delete
    let deleted = send(&app, Method::DELETE, &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(deleted.body, Value::Null);

    // Gone
    let read = send(&app, Method::GET, &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(read.status, StatusCode::NOT_FOUND);
    assert_eq!(read.body, not_found());

    let again = send(&app, Method::DELETE, &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.body, not_found());
}

#[tokio::test]
async fn should_assign_increasing_ids() {
    let app = app().await;

    let first = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    let second = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Bruno Díaz", "Calle 2", "bruno@example.com")),
    )
    .await;

    let first_id: i64 = first.body["data"]["id"].as_str().unwrap().parse().unwrap();
    let second_id: i64 = second.body["data"]["id"].as_str().unwrap().parse().unwrap();
    assert!(second_id > first_id);

    let list = send(&app, Method::GET, "/api/alumnos", None).await;
    let ids: Vec<&str> = list.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first_id.to_string(), second_id.to_string()]);
}

#[tokio::test]
async fn should_patch_only_supplied_attributes() {
    let app = app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let patched = send(
        &app,
        Method::PATCH,
        &format!("/api/alumnos/{id}"),
        Some(json!({ "data": { "attributes": { "direccion": "Avenida 9" } } })),
    )
    .await;

    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(
        patched.body["data"]["attributes"],
        json!({
            "nombre": "Ana María",
            "direccion": "Avenida 9",
            "email": "ana@example.com"
        })
    );
}

#[tokio::test]
async fn should_allow_keeping_own_email_on_update() {
    let app = app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let replaced = send(
        &app,
        Method::PUT,
        &format!("/api/alumnos/{id}"),
        Some(student("Ana María", "Calle 5", "ana@example.com")),
    )
    .await;
    assert_eq!(replaced.status, StatusCode::OK);
    assert_eq!(replaced.body["data"]["attributes"]["direccion"], "Calle 5");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_single_error_for_short_name() {
    let app = app().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana", "Calle 1", "ana@example.com")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        reply.body,
        json!({
            "errors": [{
                "status": "422",
                "title": "Validation Error",
                "details": "The nombre field must be at least 5 characters.",
                "source": { "pointer": "/data/attributes/nombre" }
            }]
        })
    );
    assert_eq!(count(&app).await, 0);
}

#[tokio::test]
async fn should_reject_duplicate_email_without_inserting() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;

    let reply = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Otra Persona", "Calle 2", "ana@example.com")),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(pointers(&reply.body), vec!["/data/attributes/email"]);
    assert_eq!(
        reply.body["errors"][0]["details"],
        "The email has already been taken."
    );
    assert_eq!(count(&app).await, 1);
}

#[tokio::test]
async fn should_reject_duplicate_email_on_update_of_other_record() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;
    let bruno = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Bruno Díaz", "Calle 2", "bruno@example.com")),
    )
    .await;
    let id = bruno.body["data"]["id"].as_str().unwrap().to_string();

    let reply = send(
        &app,
        Method::PATCH,
        &format!("/api/alumnos/{id}"),
        Some(json!({ "data": { "attributes": { "email": "ana@example.com" } } })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(pointers(&reply.body), vec!["/data/attributes/email"]);

    let read = send(&app, Method::GET, &format!("/api/alumnos/{id}"), None).await;
    assert_eq!(read.body["data"]["attributes"]["email"], "bruno@example.com");
}

#[tokio::test]
async fn should_report_every_missing_field_on_create() {
    let app = app().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(json!({ "data": { "type": "Alumnos", "attributes": {} } })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        pointers(&reply.body),
        vec![
            "/data/attributes/nombre",
            "/data/attributes/direccion",
            "/data/attributes/email"
        ]
    );
    assert_eq!(
        reply.body["errors"][1]["details"],
        "The direccion field is required."
    );
}

#[tokio::test]
async fn should_reject_invalid_email_and_non_string_values() {
    let app = app().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(json!({
            "data": { "attributes": { "nombre": "Ana María", "direccion": 12, "email": "not-an-email" } }
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        pointers(&reply.body),
        vec!["/data/attributes/direccion", "/data/attributes/email"]
    );
    assert_eq!(
        reply.body["errors"][0]["details"],
        "The direccion field must be a string."
    );
    assert_eq!(
        reply.body["errors"][1]["details"],
        "The email field must be a valid email address."
    );
}

#[tokio::test]
async fn should_reject_malformed_json() {
    let app = app().await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/alumnos")
                .header(header::ACCEPT, MEDIA_TYPE)
                .body(Body::from("{\"data\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(count(&app).await, 0);
}

// ---------------------------------------------------------------------------
// Missing ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_not_found_for_missing_id_on_every_route() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;

    for (method, body) in [
        (Method::GET, None),
        (
            Method::PUT,
            Some(student("Bruno Díaz", "Calle 2", "bruno@example.com")),
        ),
        (
            Method::PATCH,
            Some(json!({ "data": { "attributes": { "direccion": "Calle 3" } } })),
        ),
        (Method::DELETE, None),
    ] {
        let reply = send(&app, method.clone(), "/api/alumnos/999", body).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(reply.body, not_found(), "{method}");
    }

    let reply = send(&app, Method::GET, "/api/alumnos/abc", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, not_found());

    assert_eq!(count(&app).await, 1);
}

#[tokio::test]
async fn should_prefer_not_found_over_validation_on_update() {
    let app = app().await;

    let reply = send(
        &app,
        Method::PUT,
        "/api/alumnos/42",
        Some(json!({ "data": { "attributes": { "nombre": "Bo" } } })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, not_found());
}

#[tokio::test]
async fn should_prefer_not_found_over_malformed_body_on_update() {
    let app = app().await;
    send(
        &app,
        Method::POST,
        "/api/alumnos",
        Some(student("Ana María", "Calle 1", "ana@example.com")),
    )
    .await;

    for (method, uri, expected) in [
        (Method::PUT, "/api/alumnos/999", StatusCode::NOT_FOUND),
        (Method::PATCH, "/api/alumnos/999", StatusCode::NOT_FOUND),
        (Method::PUT, "/api/alumnos/1", StatusCode::BAD_REQUEST),
        (Method::PATCH, "/api/alumnos/1", StatusCode::BAD_REQUEST),
    ] {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri(uri)
                    .header(header::ACCEPT, MEDIA_TYPE)
                    .body(Body::from("{\"data\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), expected, "{method} {uri}");
        let body: Value =
            serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap();
        if expected == StatusCode::NOT_FOUND {
            assert_eq!(body, not_found(), "{method} {uri}");
        } else {
            assert_eq!(body["errors"][0]["title"], "Malformed Document");
        }
    }

    let ana = send(&app, Method::GET, "/api/alumnos/1", None).await;
    assert_eq!(ana.body["data"]["attributes"]["direccion"], "Calle 1");
}
