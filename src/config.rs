use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const WEBHOOK_URL_KEY: &str = "GOOGLE_SHEETS_WEBAPP_URL";

#[derive(Debug, Clone)]
pub struct Config {
    /// Empty means forwarding is disabled and submissions go to `data_path`.
    pub webhook_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
    pub static_dir: PathBuf,
    pub forward_timeout: Duration,
    pub max_body_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let config_path = PathBuf::from(env_or("IMEI_CONFIG_PATH", "config.json"));
        let webhook_url = resolve_webhook_url(
            std::env::var(WEBHOOK_URL_KEY).ok(),
            read_config_file(&config_path).as_ref(),
        );

        let host: IpAddr = env_or("HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid HOST: {e}"))?;

        let port: u16 = env_or("PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid PORT: {e}"))?;

        let forward_timeout_secs: u64 = env_or("IMEI_FORWARD_TIMEOUT_SECS", "20")
            .parse()
            .map_err(|e| format!("Invalid IMEI_FORWARD_TIMEOUT_SECS: {e}"))?;

        let max_body_size: usize = env_or("IMEI_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid IMEI_MAX_BODY_SIZE: {e}"))?;

        Ok(Config {
            webhook_url,
            host,
            port,
            data_path: PathBuf::from(env_or("IMEI_DATA_PATH", "data.csv")),
            static_dir: PathBuf::from(env_or("IMEI_STATIC_DIR", "static")),
            forward_timeout: Duration::from_secs(forward_timeout_secs),
            max_body_size,
        })
    }

    pub fn forwarding_enabled(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}

/// Environment wins over the config file, which wins over "disabled".
/// An empty value at either level falls through; anything else, even whitespace, is taken as set.
pub fn resolve_webhook_url(env_value: Option<String>, file: Option<&serde_json::Value>) -> String {
    env_value
        .filter(|v| !v.is_empty())
        .or_else(|| {
            file.and_then(|f| f.get(WEBHOOK_URL_KEY))
                .and_then(|v| v.as_str())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        })
        .unwrap_or_default()
}

/// A missing or unreadable config file behaves like an empty one.
pub fn read_config_file(path: &Path) -> Option<serde_json::Value> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Ignoring config file {}: {e}", path.display());
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed config file {}: {e}", path.display());
            None
        }
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
