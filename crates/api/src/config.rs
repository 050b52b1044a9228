//! Application configuration loaded from environment variables.

use model_gateway::{ArtifactPaths, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3000`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `MODEL_PATH`: exported classifier (default: `"risk_model.json"`)
/// - `SCALER_PATH`: exported feature scaler (default: `"scaler.json"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub model_path: String,
    pub scaler_path: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            model_path: lookup("MODEL_PATH").unwrap_or(defaults.model_path),
            scaler_path: lookup("SCALER_PATH").unwrap_or(defaults.scaler_path),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the locations the model gateway loads from.
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.model_path, &self.scaler_path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            model_path: DEFAULT_MODEL_FILE.to_string(),
            scaler_path: DEFAULT_SCALER_FILE.to_string(),
        }
    }
}
