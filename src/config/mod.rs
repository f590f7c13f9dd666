#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

pub use crate::domain::ports::ConfigProvider;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_STORAGE_PATH: &str = "./data/documents.json";
pub const DEFAULT_REQUEST_LIMIT: usize = 5;
pub const DEFAULT_WINDOW_LENGTH: u64 = 1;
/// Longest admission window accepted by configuration validation.
pub const MAX_WINDOW: Duration = Duration::from_secs(366 * 86_400);

/// Unit of the admission window; the window spans `window_length` of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WindowUnit {
    Milliseconds,
    Seconds,
    #[default]
    Minutes,
    Hours,
    Days,
}

impl WindowUnit {
    pub fn duration(self, length: u64) -> Duration {
        match self {
            WindowUnit::Milliseconds => Duration::from_millis(length),
            WindowUnit::Seconds => Duration::from_secs(length),
            WindowUnit::Minutes => Duration::from_secs(length.saturating_mul(60)),
            WindowUnit::Hours => Duration::from_secs(length.saturating_mul(3_600)),
            WindowUnit::Days => Duration::from_secs(length.saturating_mul(86_400)),
        }
    }
}
