//! Folders REST API — folders are addressed by name

use actix_web::{web, HttpResponse, Responder};

use super::{notebook_error_response, simulate_latency};
use crate::models::NewFolder;
use crate::AppState;

async fn list_folders(data: web::Data<AppState>) -> impl Responder {
    simulate_latency(&data).await;

    match data.notebook.list_folders() {
        Ok(folders) => HttpResponse::Ok().json(folders),
        Err(e) => notebook_error_response(e, "list folders"),
    }
}

async fn create_folder(data: web::Data<AppState>, body: web::Json<NewFolder>) -> impl Responder {
    simulate_latency(&data).await;

    match data.notebook.create_folder(body.into_inner()) {
        Ok(folder) => HttpResponse::Created().json(folder),
        Err(e) => notebook_error_response(e, "create folder"),
    }
}

/// Delete a folder and every note inside it
async fn delete_folder(data: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    simulate_latency(&data).await;

    match data.notebook.delete_folder(&path) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(e) => notebook_error_response(e, "delete folder"),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/folders")
            .route("", web::get().to(list_folders))
            .route("", web::post().to(create_folder))
            .route("/{name}", web::delete().to(delete_folder)),
    );
}
