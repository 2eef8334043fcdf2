use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use super::simulate_latency;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Check the submitted pair. No session is created; the client decides what to do on success.
async fn login(data: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    simulate_latency(&data).await;

    match data.credentials.verify(&body.username, &body.password) {
        Ok(()) => {
            log::info!("[AUTH] Login succeeded for '{}'", body.username);
            HttpResponse::Ok().json(serde_json::json!({ "success": true }))
        }
        Err(e) => {
            log::warn!("[AUTH] Rejected login attempt");
            HttpResponse::Unauthorized().json(serde_json::json!({
                "message": e.to_string()
            }))
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/login").route(web::post().to(login)));
}
