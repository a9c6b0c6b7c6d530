
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Redirect, Response},
};
use axum_macros::debug_handler;
use serde::Serialize;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, DeleteNoteResponse, ErrorResponse, HealthResponse},
    models::Note,
    service::{NoteError, NoteService},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const NOTE_ADDED: &str = "Note added.";
const MALFORMED_BODY: &str = "Request body must be a JSON object with a \"text\" field.";

#[derive(OpenApi)]
#[openapi(
    paths(list_notes, create_note, delete_note, super::health),
    components(schemas(
        Note,
        CreateNoteRequest,
        DeleteNoteResponse,
        ErrorResponse,
        HealthResponse
    )),
    tags(
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

/// Which client sent the request, decided once from the declared content
/// type. Browser forms get redirects with a flash message, everything else
/// gets JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Form,
    Json,
}

impl RequestKind {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let is_form = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE));

        if is_form { Self::Form } else { Self::Json }
    }

    /// Pulls the raw `text` field out of the body. `Ok(None)` means the field
    /// is absent or null.
    fn read_text(self, body: &[u8]) -> Result<Option<String>, Response> {
        match self {
            Self::Form => Ok(url::form_urlencoded::parse(body)
                .find(|(key, _)| key == "text")
                .map(|(_, value)| value.into_owned())),
            Self::Json => read_json_text(body).map_err(|e| {
                tracing::debug!("rejected malformed note body: {e}");
                let body = Json(ErrorResponse::new(MALFORMED_BODY));
                (StatusCode::BAD_REQUEST, body).into_response()
            }),
        }
    }

    /// Maps a service outcome to the response shape this client expects.
    fn respond<T: Serialize>(
        self,
        outcome: Result<T, NoteError>,
        status: StatusCode,
        flash: &str,
    ) -> Response {
        match (self, outcome) {
            (Self::Form, Ok(_)) => flash_redirect("success", flash),
            (Self::Form, Err(e)) => {
                log_failure(&e);
                flash_redirect("error", &e.to_string())
            }
            (Self::Json, Ok(value)) => (status, Json(value)).into_response(),
            (Self::Json, Err(e)) => e.into_response(),
        }
    }
}

/// An empty body carries no `text`. Anything else must be a JSON object;
/// arrays and scalars are rejected.
fn read_json_text(body: &[u8]) -> Result<Option<String>, serde_json::Error> {
    if body.trim_ascii().is_empty() {
        return Ok(None);
    }

    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("expected a JSON object"));
    }

    serde_json::from_value::<CreateNoteRequest>(value).map(|request| request.text)
}

/// Redirects back to the index page with a one-shot flash message.
fn flash_redirect(kind: &str, message: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("type", kind)
        .append_pair("message", message)
        .finish();

    Redirect::to(&format!("/?{query}")).into_response()
}

fn log_failure(e: &NoteError) {
    match e {
        NoteError::Store(cause) => tracing::error!("note storage failure: {cause}"),
        NoteError::Validation(_) | NoteError::NotFound(_) => tracing::debug!("{e}"),
    }
}

impl IntoResponse for NoteError {
    fn into_response(self) -> Response {
        log_failure(&self);

        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes in creation order", body = Vec<Note>),
        (status = 500, description = "Notes could not be read", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn list_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.list_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/notes",
    request_body(
        content = CreateNoteRequest,
        description = "JSON object or url-encoded form with a `text` field"
    ),
    responses(
        (status = 201, description = "Note created successfully", body = Note),
        (status = 303, description = "Form submission handled, redirect to the index page"),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
        (status = 422, description = "Note text is missing, empty or too long", body = ErrorResponse),
        (status = 500, description = "Notes could not be read or saved", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let kind = RequestKind::from_headers(&headers);

    let text = match kind.read_text(&body) {
        Ok(text) => text,
        Err(response) => return response,
    };

    kind.respond(
        service.create_note(text).await,
        StatusCode::CREATED,
        NOTE_ADDED,
    )
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse),
        (status = 500, description = "Notes could not be read or saved", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<String>,
) -> Response {
    match service.delete_note(&id).await {
        Ok(deleted) => (StatusCode::OK, Json(DeleteNoteResponse { deleted })).into_response(),
        Err(e) => e.into_response(),
    }
}
