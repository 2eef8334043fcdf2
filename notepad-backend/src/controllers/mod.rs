pub mod auth;
pub mod folders;
pub mod health;
pub mod notes;

use actix_web::{error, web, HttpResponse};
use std::time::Duration;

use crate::config::{defaults, Config};
use crate::notebook::NotebookError;
use crate::AppState;

/// Register every API controller
pub fn configure(cfg: &mut web::ServiceConfig) {
    health::config_routes(cfg);
    auth::config(cfg);
    notes::config(cfg);
    folders::config(cfg);
}

/// JSON extractor settings: malformed bodies become `400 {message}`. With an attachment
/// cap the body limit leaves room for several base64-inflated attachments.
pub fn json_config(config: &Config) -> web::JsonConfig {
    let limit = match config.max_attachment_bytes {
        Some(max) => max.saturating_mul(8).max(64 * 1024),
        None => defaults::JSON_BODY_LIMIT,
    };
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::debug!("Rejected request body: {}", err);
            let response = HttpResponse::BadRequest().json(serde_json::json!({
                "message": format!("Invalid request body: {}", err)
            }));
            error::InternalError::from_response(err, response).into()
        })
}

/// Artificial delay before touching the notebook. Always completes.
pub(crate) async fn simulate_latency(state: &AppState) {
    let ms = state.config.simulated_latency_ms;
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

/// Map a notebook failure onto the API error bodies
pub(crate) fn notebook_error_response(err: NotebookError, action: &str) -> HttpResponse {
    match err {
        NotebookError::Validation(v) => HttpResponse::BadRequest().json(serde_json::json!({
            "message": v.message,
            "field": v.field
        })),
        protected @ NotebookError::ProtectedFolder(_) => HttpResponse::BadRequest().json(serde_json::json!({
            "message": protected.to_string(),
            "field": "name"
        })),
        other => {
            log::error!("Failed to {}: {}", action, other);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "message": "Internal server error"
            }))
        }
    }
}
