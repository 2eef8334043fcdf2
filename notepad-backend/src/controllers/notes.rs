//! Notes REST API — list, create and delete notes

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use super::{notebook_error_response, simulate_latency};
use crate::models::NewNote;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct ListNotesQuery {
    /// Folder name; `folderId` is accepted for older clients
    #[serde(alias = "folderId")]
    folder: Option<String>,
}

/// List notes, newest first
async fn list_notes(
    data: web::Data<AppState>,
    query: web::Query<ListNotesQuery>,
) -> impl Responder {
    simulate_latency(&data).await;

    match data.notebook.list_notes(query.folder.as_deref()) {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => notebook_error_response(e, "list notes"),
    }
}

async fn create_note(data: web::Data<AppState>, body: web::Json<NewNote>) -> impl Responder {
    simulate_latency(&data).await;

    match data.notebook.create_note(body.into_inner()) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => notebook_error_response(e, "create note"),
    }
}

/// Delete a note by id. Unknown ids still answer 204.
async fn delete_note(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id: i64 = match path.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "message": "Invalid ID"
            }));
        }
    };

    simulate_latency(&data).await;

    match data.notebook.delete_note(id) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => notebook_error_response(e, "delete note"),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::get().to(list_notes))
            .route("", web::post().to(create_note))
            .route("/{id}", web::delete().to(delete_note)),
    );
}
