use crate::utils::error::{IngestError, Result};
use std::time::Duration;

/// Configuration sources check themselves before the service starts.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Storage paths must name a file; directories and empty values are rejected.
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    if path.ends_with('/') || path.ends_with('\\') {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path must name a file, not a directory".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Rejects durations above `max`, such as a window length that would overflow the clock.
pub fn validate_max_duration(field_name: &str, value: Duration, max: Duration) -> Result<()> {
    if value > max {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", value),
            reason: format!("Value must not exceed {:?}", max),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IngestError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("storage.path", "./data/documents.json").is_ok());
        assert!(validate_path("storage.path", "").is_err());
        assert!(validate_path("storage.path", "   ").is_err());
        assert!(validate_path("storage.path", "./data/").is_err());
        assert!(validate_path("storage.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("admission.request_limit", 5, 1).is_ok());
        assert!(validate_positive_number("admission.request_limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_max_duration() {
        let max = Duration::from_secs(60);
        assert!(validate_max_duration("window", Duration::from_secs(60), max).is_ok());
        assert!(validate_max_duration("window", Duration::from_secs(61), max).is_err());
        assert!(validate_max_duration("window", Duration::MAX, max).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("server.host", "127.0.0.1").is_ok());
        assert!(validate_non_empty_string("server.host", "").is_err());
        assert!(validate_non_empty_string("server.host", "  ").is_err());
    }
}
