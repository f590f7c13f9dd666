use super::{
    WindowUnit, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REQUEST_LIMIT, DEFAULT_STORAGE_PATH,
    DEFAULT_WINDOW_LENGTH, MAX_WINDOW,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_max_duration, validate_non_empty_string, validate_path, validate_positive_number,
    Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Command line configuration for the `doc-ingest` binary.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "doc-ingest")]
#[command(about = "Rate-limited document ingestion service")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, default_value = DEFAULT_STORAGE_PATH)]
    pub storage_path: String,

    #[arg(long, default_value_t = DEFAULT_REQUEST_LIMIT, help = "Documents admitted per window")]
    pub request_limit: usize,

    #[arg(long, value_enum, default_value_t = WindowUnit::Minutes)]
    pub window_unit: WindowUnit,

    #[arg(long, default_value_t = DEFAULT_WINDOW_LENGTH, help = "Window length in window units")]
    pub window_length: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log ingestion statistics on shutdown")]
    pub stats: bool,
}

impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn request_limit(&self) -> usize {
        self.request_limit
    }

    fn window(&self) -> Duration {
        self.window_unit.duration(self.window_length)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_path("storage_path", &self.storage_path)?;
        validate_positive_number("request_limit", self.request_limit as u64, 1)?;
        validate_positive_number("window_length", self.window_length, 1)?;
        // WindowUnit::duration saturates, so an oversized length still lands above the cap.
        validate_max_duration("window_length", self.window(), MAX_WINDOW)?;
        Ok(())
    }
}
