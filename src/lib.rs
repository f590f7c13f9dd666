pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{TomlConfig, WindowUnit};

pub use adapters::JsonFileStore;
pub use app::{build_router, AppState, IngestApp};
pub use crate::core::{
    admission::AdmissionController, ingest::IngestService, ticker::WindowTicker,
};
pub use domain::model::{DocType, Document, DocumentList};
pub use utils::error::{IngestError, Result};
