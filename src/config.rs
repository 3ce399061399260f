use std::path::PathBuf;
use std::time::Duration;

use crate::errors::DashboardError;

const DEFAULT_API_URL: &str = "http://localhost:5005/ui";
const DEFAULT_STORAGE_PATH: &str = ".convoy-dashboard.json";
const DEFAULT_SCREEN_WIDTH: u32 = 1280;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL every API path is appended to, without a trailing slash.
    pub api_url: String,
    /// File backing the persistent client storage.
    pub storage_path: PathBuf,
    /// Per-request timeout. `None` leaves requests unbounded.
    /// Set via CONVOY_REQUEST_TIMEOUT_SECS.
    pub request_timeout: Option<Duration>,
    /// Viewport width used for layout flags when running headless.
    pub screen_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            request_timeout: None,
            screen_width: DEFAULT_SCREEN_WIDTH,
        }
    }
}

impl Config {
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, DashboardError> {
        Ok(Self {
            api_url: normalize_api_url(&api_url.into())?,
            ..Self::default()
        })
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let api_url = std::env::var("CONVOY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

    Ok(Config {
        api_url: normalize_api_url(&api_url)?,
        storage_path: std::env::var("CONVOY_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH)),
        request_timeout: std::env::var("CONVOY_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        screen_width: std::env::var("CONVOY_SCREEN_WIDTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_SCREEN_WIDTH),
    })
}

fn normalize_api_url(raw: &str) -> Result<String, DashboardError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| DashboardError::Config(format!("CONVOY_API_URL '{}': {}", raw, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DashboardError::Config(format!(
            "CONVOY_API_URL must be http(s), got '{}'",
            parsed.scheme()
        )));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
