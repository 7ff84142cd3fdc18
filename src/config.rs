use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use reqwest::Url;
use crate::error::{AppError, Result};

pub const DEFAULT_PREDICTION_SERVER: &str = "http://localhost:8000";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Directory holding the bundled CSV assets, served at `/`.
    pub public_dir: PathBuf,
    pub prediction_server: Url,
    pub prediction_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());
        let prediction_server = env::var("PREDICTION_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_PREDICTION_SERVER.to_string());
        let timeout = env::var("PREDICTION_TIMEOUT_SECS").unwrap_or_else(|_| "120".to_string());

        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;
        let timeout = timeout
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("Invalid prediction timeout: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            public_dir: PathBuf::from(public_dir),
            prediction_server: parse_base_url(&prediction_server)?,
            prediction_timeout: Duration::from_secs(timeout),
        })
    }
}

/// Parses the prediction server address, which must be an absolute http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::ConfigError(format!("Invalid prediction server URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::ConfigError(format!("Unsupported prediction server scheme: {}", other))),
    }
}
