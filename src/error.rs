//! Error types for the star guard

use thiserror::Error;

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Main error type for guard operations
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("unable to read file, file cannot be linted ({reason})")]
    FileUnreadable { file: String, reason: String },

    #[error("invalid syntax, file cannot be linted ({reason})")]
    SyntaxInvalid { file: String, reason: String },

    #[error("Error on Querying Github for {url} - {reason}")]
    QueryFailed { url: String, reason: String },

    #[error("Error on Parsing Stars for {url} - {reason}")]
    MetricUnavailable { url: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl GuardError {
    /// Create a file-unreadable error
    pub fn file_unreadable(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FileUnreadable {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a syntax error
    pub fn syntax_invalid(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SyntaxInvalid {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Create a query error
    pub fn query_failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QueryFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a metric error
    pub fn metric_unavailable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetricUnavailable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether the error is confined to a single file and never aborts the run
    pub fn is_file_scoped(&self) -> bool {
        matches!(self, Self::FileUnreadable { .. } | Self::SyntaxInvalid { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages_carry_url() {
        let err = GuardError::query_failed("https://github.com/a/b", "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "Error on Querying Github for https://github.com/a/b - HTTP 404 Not Found"
        );

        let err = GuardError::metric_unavailable("https://github.com/a/b", "empty star count");
        assert!(err.to_string().starts_with("Error on Parsing Stars for https://github.com/a/b"));
    }

    #[test]
    fn test_file_scoped() {
        assert!(GuardError::syntax_invalid("main.go", "x").is_file_scoped());
        assert!(GuardError::file_unreadable("main.go", "x").is_file_scoped());
        assert!(!GuardError::query_failed("u", "x").is_file_scoped());
    }
}
