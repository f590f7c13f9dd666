use super::{
    WindowUnit, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_LIMIT, DEFAULT_STORAGE_PATH,
    DEFAULT_WINDOW_LENGTH, MAX_WINDOW,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{
    validate_max_duration, validate_non_empty_string, validate_path, validate_positive_number,
    Validate,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// File based configuration for the `toml_ingest` binary.
///
/// Every section is optional; missing values fall back to the same defaults
/// as the command line flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdmissionConfig {
    pub request_limit: Option<usize>,
    pub window_unit: Option<WindowUnit>,
    pub window_length: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
    pub stats: Option<bool>,
}

fn env_placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is a valid regex")
    })
}

impl TomlConfig {
    /// Loads a configuration file, substituting `${VAR}` placeholders first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| IngestError::ConfigError {
            message: format!("Cannot read config file {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IngestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${NAME}` with the environment value; unknown names are kept verbatim.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("server.host", self.host())?;
        validate_path("storage.path", self.storage_path())?;
        validate_positive_number(
            "admission.request_limit",
            self.request_limit() as u64,
            1,
        )?;
        validate_positive_number("admission.window_length", self.window_length(), 1)?;
        validate_max_duration("admission.window_length", self.window(), MAX_WINDOW)?;
        Ok(())
    }

    // Accessors below resolve optional fields against the defaults.

    pub fn host(&self) -> &str {
        self.server.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.server.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn window_unit(&self) -> WindowUnit {
        self.admission.window_unit.unwrap_or_default()
    }

    pub fn window_length(&self) -> u64 {
        self.admission.window_length.unwrap_or(DEFAULT_WINDOW_LENGTH)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn stats_enabled(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.stats).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host(), self.port())
    }

    fn storage_path(&self) -> &str {
        self.storage.path.as_deref().unwrap_or(DEFAULT_STORAGE_PATH)
    }

    fn request_limit(&self) -> usize {
        self.admission.request_limit.unwrap_or(DEFAULT_REQUEST_LIMIT)
    }

    fn window(&self) -> Duration {
        self.window_unit().duration(self.window_length())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
