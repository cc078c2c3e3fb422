//! Front-end configuration
//!
//! Configuration is loaded from environment variables. Unset or unparsable
//! values keep their defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Main front-end configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,

    /// Backend base URLs
    pub backend: BackendConfig,

    /// Session storage configuration
    pub session: SessionConfig,

    /// Static asset configuration
    pub static_files: StaticFilesConfig,
}

/// Base URL of each backend resource group
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Login and registration
    pub auth_url: String,
    /// Promos, photos, videos, about us
    pub content_url: String,
    /// Contact form and inbox
    pub communication_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

/// Where the credential is persisted
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// JSON file for durable storage; `None` keeps the session in memory
    pub store_path: Option<PathBuf>,
}

/// Static file serving configuration
#[derive(Debug, Clone, Default)]
pub struct StaticFilesConfig {
    /// Directory containing built front-end assets
    pub dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            auth_url: "http://localhost:5001".to_string(),
            content_url: "http://localhost:5002".to_string(),
            communication_url: "http://localhost:5003".to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        // Server config
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT")
            && let Ok(p) = port.parse()
        {
            config.port = p;
        }

        // Backend config
        if let Some(url) = lookup("AUTH_API_URL")
            && !url.is_empty()
        {
            config.backend.auth_url = url;
        }
        if let Some(url) = lookup("CONTENT_API_URL")
            && !url.is_empty()
        {
            config.backend.content_url = url;
        }
        if let Some(url) = lookup("COMMUNICATION_API_URL")
            && !url.is_empty()
        {
            config.backend.communication_url = url;
        }
        if let Some(val) = lookup("HTTP_TIMEOUT_SECS")
            && let Ok(secs) = val.parse::<u64>()
        {
            config.backend.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        // Session config
        if let Some(path) = lookup("SESSION_STORE_PATH")
            && !path.is_empty()
        {
            config.session.store_path = Some(PathBuf::from(path));
        }

        // Static files config
        if let Some(dir) = lookup("STATIC_FILES_DIR")
            && !dir.is_empty()
        {
            config.static_files.dir = Some(PathBuf::from(dir));
        }

        config
    }
}
