use thiserror::Error;

/// Core error types for pipgym
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data alignment error
    #[error("Data error: {0}")]
    Data(String),

    /// Integer outside the discrete action space
    #[error("Invalid action: {0} (expected 0..=3)")]
    InvalidAction(i64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::Config("Invalid parameter".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid parameter");
        assert_eq!(
            CoreError::InvalidAction(9).to_string(),
            "Invalid action: 9 (expected 0..=3)"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
