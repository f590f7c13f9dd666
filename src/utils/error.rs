use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode document: {0}")]
    DecodeError(#[source] serde_json::Error),

    #[error("Failed to read document store {path}: {source}")]
    StorageReadError {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to write document store {path}: {source}")]
    StorageWriteError {
        path: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Request,
    Storage,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IngestError {
    pub fn storage_read(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::StorageReadError {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn storage_write(path: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::StorageWriteError {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DecodeError(_) => ErrorCategory::Request,
            Self::StorageReadError { .. } | Self::StorageWriteError { .. } => {
                ErrorCategory::Storage
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Request
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::DecodeError(_) => {
                "Check the request body against the document schema (dates as yyyy-MM-dd)"
            }
            Self::StorageReadError { .. } => {
                "Make sure the storage file exists and contains a valid {\"documents\": [...]} object"
            }
            Self::StorageWriteError { .. } => {
                "Check free disk space and write permissions of the storage directory"
            }
            Self::ConfigError { .. } => "Check that the configuration file exists and is readable",
            Self::ConfigValidationError { .. } => {
                "Review the configuration file or command line flags"
            }
            Self::InvalidConfigValueError { .. } => "Correct the value and restart the service",
            Self::IoError(_) => "Check that the port is free and the process has the required permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Request => format!("Request rejected: {}", self),
            ErrorCategory::Storage => format!("Document storage is unavailable: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
