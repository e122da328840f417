use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Service configuration.
///
/// Defaults reproduce the fixed deployment: port 8080 on all interfaces,
/// uploads stored under `audio/`, no body size limit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Upload storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: String,
    /// Create `dir` at startup instead of failing uploads while it is missing.
    pub auto_create_dir: bool,
    /// Upper bound on a request body. `None` buffers whatever arrives.
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: "audio/".to_string(),
            auto_create_dir: false,
            max_body_bytes: None,
        }
    }
}

/// Names a TOML config file.
pub const CONFIG_PATH_ENV: &str = "AUDIO_INGEST_CONFIG";
pub const HOST_ENV: &str = "AUDIO_INGEST_HOST";
pub const PORT_ENV: &str = "AUDIO_INGEST_PORT";
pub const STORAGE_DIR_ENV: &str = "AUDIO_INGEST_STORAGE_DIR";

const DEFAULT_CONFIG_PATH: &str = "config.toml";

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the configuration the binary runs with.
    ///
    /// Reads the file named by `AUDIO_INGEST_CONFIG` (or `config.toml` when
    /// present), then applies the `AUDIO_INGEST_*` overrides. The caller loads
    /// `.env` beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AUDIO_INGEST_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::EnvError {
                key: PORT_ENV,
                value: port,
            })?;
        }
        if let Some(dir) = lookup(STORAGE_DIR_ENV) {
            self.storage.dir = dir;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("Server host must not be empty".to_string()));
        }

        if self.storage.dir.trim().is_empty() {
            return Err(ConfigError::ValidationError("Storage directory must not be empty".to_string()));
        }

        if self.storage.max_body_bytes == Some(0) {
            return Err(ConfigError::ValidationError("max_body_bytes must be positive when set".to_string()));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let host = self.server.host.trim();
        // accept bracketed IPv6 as written in URLs
        let host = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')).unwrap_or(host);
        let ip: IpAddr = host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("Invalid bind host: {}", self.server.host))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.dir)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid value for {key}: {value:?}")]
    EnvError { key: &'static str, value: String },
}
