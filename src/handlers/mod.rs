pub mod rest;
pub mod web;

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::Utc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::{any::Any, sync::Arc};

use crate::{
    dto::{ErrorResponse, HealthResponse},
    service::NoteService,
};

pub fn router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/", get(web::index).fallback(not_found))
        .route("/health", get(health).fallback(not_found))
        .route(
            "/notes",
            get(rest::list_notes)
                .post(rest::create_note)
                .fallback(not_found),
        )
        .route("/notes/{id}", delete(rest::delete_note).fallback(not_found))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-doc/openapi.json", rest::ApiDoc::openapi()),
        )
        .fallback(not_found)
        .with_state(service)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "notes"
)]
pub async fn health() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }),
    )
        .into_response()
}

async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("Cannot {method} {}", uri.path()))),
    )
        .into_response()
}

/// Generic 500 body. Internal details only go to the log.
pub fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error.")),
    )
        .into_response()
}

#[allow(clippy::needless_pass_by_value)]
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!("request handler panicked: {detail}");

    internal_error()
}
