//! Error types for mirrorcp

use thiserror::Error;

/// Error types for mirrorcp operations
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ignore pattern did not compile as a regular expression
    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Job store could not be parsed or written
    #[error("Job store error: {0}")]
    JobStore(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MirrorError {
    /// Check if this error is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, MirrorError::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_automatic_conversion() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let mirror_error: MirrorError = io_error.into();

        assert!(matches!(mirror_error, MirrorError::Io(_)));
        assert!(mirror_error.to_string().contains("IO error"));
    }

    #[test]
    fn test_pattern_error_conversion() {
        let result = regex::Regex::new("^((unclosed$");
        let mirror_error: MirrorError = result.unwrap_err().into();

        assert!(matches!(mirror_error, MirrorError::Pattern(_)));
        assert!(mirror_error.to_string().contains("Invalid ignore pattern"));
    }

    #[test]
    fn test_job_store_error_conversion() {
        let result: Result<Vec<u32>, _> = serde_json::from_str("not json");
        let mirror_error: MirrorError = result.unwrap_err().into();

        assert!(matches!(mirror_error, MirrorError::JobStore(_)));
        assert!(mirror_error.to_string().contains("Job store error"));
    }

    #[test]
    fn test_config_error() {
        let error = MirrorError::Config("'SourceDir' is invalid or missing.".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.is_config_error());
        assert!(!MirrorError::Io(IoError::new(ErrorKind::NotFound, "x")).is_config_error());
    }

    #[test]
    fn test_result_propagation() {
        fn inner_function() -> Result<(), MirrorError> {
            Err(MirrorError::Config("test error".to_string()))
        }

        fn outer_function() -> Result<(), MirrorError> {
            inner_function()?;
            Ok(())
        }

        let result = outer_function();
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), MirrorError::Config(_)));
    }
}
