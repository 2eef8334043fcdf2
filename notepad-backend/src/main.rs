use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod auth;
mod config;
mod controllers;
mod models;
mod notebook;
mod store;

use auth::Credentials;
use config::Config;
use notebook::Notebook;

pub struct AppState {
    pub notebook: Arc<Notebook>,
    pub credentials: Credentials,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

impl AppState {
    pub fn new(notebook: Arc<Notebook>, config: Config) -> Self {
        Self {
            notebook,
            credentials: Credentials::from_config(&config),
            config,
            started_at: std::time::Instant::now(),
        }
    }
}

/// Serve index.html for client-side routes the static files don't cover
async fn spa_fallback(data: web::Data<AppState>) -> actix_web::Result<NamedFile> {
    let dir = data.config.frontend_dir.clone().unwrap_or_default();
    Ok(NamedFile::open(dir.join("index.html"))?)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Notepad backend v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::from_env();

    match &config.storage {
        config::StorageBackend::Memory => {
            log::info!("[STORE] Using in-memory storage (notes are lost on restart)")
        }
        config::StorageBackend::Sqlite { path } => {
            log::info!("[STORE] Using SQLite storage at {}", path)
        }
    }
    let store = store::open(&config.storage).map_err(|e| {
        log::error!("[STORE] Failed to open storage: {}", e);
        std::io::Error::other(e)
    })?;

    let notebook = Arc::new(Notebook::new(store).with_attachment_limit(config.max_attachment_bytes));

    if config.seed_welcome {
        match notebook.seed_welcome_notes() {
            Ok(0) => log::debug!("[NOTES] General already has notes, skipping welcome seed"),
            Ok(_) => {}
            Err(e) => log::error!("[NOTES] Failed to seed welcome notes: {}", e),
        }
    }

    // Serve static files only if the frontend directory actually has an index
    if let Some(dir) = config.frontend_dir.take() {
        if dir.join("index.html").exists() {
            log::info!("Serving frontend from: {}", dir.display());
            config.frontend_dir = Some(dir);
        } else {
            log::warn!("Frontend directory {} has no index.html, not serving it", dir.display());
        }
    }

    if let Some(max) = config.max_attachment_bytes {
        log::info!("Capping data: attachments at {} bytes", max);
    }

    if config.simulated_latency_ms > 0 {
        log::info!("Simulating {}ms latency on API handlers", config.simulated_latency_ms);
    }

    let bind_address = (config.bind_address.clone(), config.port);
    log::info!("Listening on http://{}:{}", bind_address.0, bind_address.1);

    let state = web::Data::new(AppState::new(notebook, config));

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config(&state.config))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::configure);

        if let Some(dir) = &state.config.frontend_dir {
            app = app.service(
                Files::new("/", dir.clone())
                    .index_file("index.html")
                    .default_handler(web::to(spa_fallback)),
            );
        }

        app
    })
    .bind(bind_address)?
    .run()
    .await
}
