use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "NOTEPAD_BIND_ADDRESS";
    /// Storage medium: "memory" (default) or "sqlite"
    pub const STORAGE: &str = "NOTEPAD_STORAGE";
    /// SQLite file path, only read when NOTEPAD_STORAGE=sqlite
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const USERNAME: &str = "NOTEPAD_USERNAME";
    pub const PASSWORD: &str = "NOTEPAD_PASSWORD";
    /// Set to "false" or "0" to skip the welcome notes on boot.
    pub const SEED_WELCOME: &str = "NOTEPAD_SEED_WELCOME";
    /// Artificial delay applied by handlers before touching the notebook.
    pub const SIMULATED_LATENCY_MS: &str = "NOTEPAD_SIMULATED_LATENCY_MS";
    /// Optional cap on decoded `data:` attachment size. Unset or 0 means no cap.
    pub const MAX_ATTACHMENT_BYTES: &str = "NOTEPAD_MAX_ATTACHMENT_BYTES";
    /// Directory holding a built frontend (index.html + assets)
    pub const FRONTEND_DIR: &str = "NOTEPAD_FRONTEND_DIR";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATABASE_URL: &str = "./.db/notepad.db";
    pub const USERNAME: &str = "admin";
    pub const PASSWORD: &str = "admin";
    pub const SEED_WELCOME: bool = true;
    pub const SIMULATED_LATENCY_MS: u64 = 0;
    /// Largest JSON request body accepted when no attachment cap is configured
    pub const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;
}

/// Which [`crate::store::SlotStore`] implementation backs the notebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite { path: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub storage: StorageBackend,
    pub username: String,
    pub password: String,
    pub seed_welcome: bool,
    pub simulated_latency_ms: u64,
    pub max_attachment_bytes: Option<usize>,
    pub frontend_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: defaults::PORT,
            bind_address: defaults::BIND_ADDRESS.to_string(),
            storage: StorageBackend::Memory,
            username: defaults::USERNAME.to_string(),
            password: defaults::PASSWORD.to_string(),
            seed_welcome: defaults::SEED_WELCOME,
            simulated_latency_ms: defaults::SIMULATED_LATENCY_MS,
            max_attachment_bytes: None,
            frontend_dir: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in production).
    /// Unparseable values fall back to their default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match lookup(env_vars::STORAGE).as_deref().map(str::trim) {
            None | Some("") | Some("memory") => StorageBackend::Memory,
            Some("sqlite") => StorageBackend::Sqlite {
                path: lookup(env_vars::DATABASE_URL)
                    .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            },
            Some(other) => {
                log::warn!(
                    "Unknown {} value '{}', falling back to in-memory storage",
                    env_vars::STORAGE,
                    other
                );
                StorageBackend::Memory
            }
        };

        Self {
            port: parse_or(&lookup, env_vars::PORT, defaults::PORT),
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            storage,
            username: lookup(env_vars::USERNAME).unwrap_or_else(|| defaults::USERNAME.to_string()),
            password: lookup(env_vars::PASSWORD).unwrap_or_else(|| defaults::PASSWORD.to_string()),
            seed_welcome: lookup(env_vars::SEED_WELCOME)
                .map(|v| parse_flag(&v, defaults::SEED_WELCOME))
                .unwrap_or(defaults::SEED_WELCOME),
            simulated_latency_ms: parse_or(
                &lookup,
                env_vars::SIMULATED_LATENCY_MS,
                defaults::SIMULATED_LATENCY_MS,
            ),
            max_attachment_bytes: parse_limit(&lookup, env_vars::MAX_ATTACHMENT_BYTES),
            frontend_dir: lookup(env_vars::FRONTEND_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {} value '{}', using default {}", key, raw, default);
            default
        }),
        None => default,
    }
}

/// A byte limit that stays off unless set to a positive number
fn parse_limit<F>(lookup: &F, key: &str) -> Option<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<usize>() {
        Ok(0) => None,
        Ok(limit) => Some(limit),
        Err(_) => {
            log::warn!("Invalid {} value '{}', leaving it unlimited", key, raw);
            None
        }
    }
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}
