use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::analysis::classifier::ClassifierBackend;

const DEFAULT_ALLOWED_ORIGINS: &str = "https://pro-front-final.vercel.app,http://localhost:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub allowed_origins: Vec<String>,
    /// Replacement role catalog; the built-in table is used when unset.
    pub role_catalog_path: Option<PathBuf>,
    pub classifier_backend: ClassifierBackend,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            role_catalog_path: std::env::var("ROLE_CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            classifier_backend: env_or("CLASSIFIER_BACKEND", "softmax")
                .parse()
                .map_err(|e: String| anyhow!(e))
                .context("CLASSIFIER_BACKEND is invalid")?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
            role_catalog_path: None,
            classifier_backend: ClassifierBackend::default(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Comma-separated origin list; blanks and trailing slashes are dropped.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
