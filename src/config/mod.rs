//! Configuration module for the OctoFit backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::AppError;

const DEFAULT_DB_PATH: &str = "./data/octofit.sqlite";
const DEFAULT_INDEX_PATH: &str = "./data/index";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Path to Tantivy search index directory
    pub index_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured when present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("OCTOFIT_DB_PATH")
            .unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
            .into();

        let index_path = env::var("OCTOFIT_INDEX_PATH")
            .unwrap_or_else(|_| DEFAULT_INDEX_PATH.to_string())
            .into();

        let raw_bind_addr =
            env::var("OCTOFIT_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_bind_addr.parse().map_err(|e| {
            AppError::Internal(format!(
                "Invalid OCTOFIT_BIND_ADDR '{}': {}",
                raw_bind_addr, e
            ))
        })?;

        let log_level =
            env::var("OCTOFIT_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            db_path,
            index_path,
            bind_addr,
            log_level,
        })
    }
}
