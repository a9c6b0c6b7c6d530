use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use axum_macros::debug_handler;
use minijinja::{Environment, context};
use serde::Serialize;

use std::sync::Arc;

use crate::{dto::FlashQuery, models::Note, service::NoteService};

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Notes</title>
</head>
<body>
    <main>
        <h1>Notes</h1>
        {% if flash %}
        <p class="flash flash-{{ flash.kind }}">{{ flash.message }}</p>
        {% endif %}
        {% if storage_error %}
        <p class="flash flash-error">{{ storage_error }}</p>
        {% endif %}
        <form method="post" action="/notes">
            <textarea name="text" maxlength="{{ max_len }}" required></textarea>
            <button type="submit">Add note</button>
        </form>
        {% if notes %}
        <ul class="notes">
            {% for note in notes %}
            <li>
                <p>{{ note.text }}</p>
                <time datetime="{{ note.created_iso }}">{{ note.created }}</time>
                <button type="button" class="delete" data-id="{{ note.id }}">Delete</button>
            </li>
            {% endfor %}
        </ul>
        {% else %}
        <p class="empty">No notes yet.</p>
        {% endif %}
    </main>
    <script>
        document.querySelectorAll("button.delete").forEach((button) => {
            button.addEventListener("click", async () => {
                await fetch("/notes/" + encodeURIComponent(button.dataset.id), { method: "DELETE" });
                window.location.assign("/");
            });
        });
    </script>
</body>
</html>"##;

#[derive(Debug, Serialize)]
struct NoteView<'a> {
    id: &'a str,
    text: &'a str,
    created: String,
    created_iso: String,
}

impl<'a> From<&'a Note> for NoteView<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            id: &note.id,
            text: &note.text,
            created: note.created_at.format("%Y-%m-%d %H:%M").to_string(),
            created_iso: note.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FlashView<'a> {
    kind: &'static str,
    message: &'a str,
}

impl<'a> FlashView<'a> {
    fn from_query(query: &'a FlashQuery) -> Option<Self> {
        let message = query.message.as_deref().filter(|m| !m.trim().is_empty())?;
        let kind = match query.kind.as_deref() {
            Some("error") => "error",
            _ => "success",
        };

        Some(Self { kind, message })
    }
}

fn render_index(
    notes: &[Note],
    storage_error: Option<&str>,
    flash: &FlashQuery,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;

    let notes: Vec<NoteView> = notes.iter().map(NoteView::from).collect();

    let template = env.get_template("index.html")?;
    template.render(context! {
        notes => notes,
        storage_error => storage_error,
        flash => FlashView::from_query(flash),
        max_len => crate::service::MAX_TEXT_LEN,
    })
}

#[debug_handler]
pub async fn index(
    State(service): State<Arc<NoteService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let flash = FlashQuery::from_pairs(&pairs);

    let (notes, storage_error) = match service.list_notes().await {
        Ok(notes) => (notes, None),
        Err(e) => {
            tracing::error!("failed to load notes for index page: {e}");
            (Vec::new(), Some(e.to_string()))
        }
    };

    match render_index(&notes, storage_error.as_deref(), &flash) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("failed to render index page: {e}");
            super::internal_error()
        }
    }
}
