//! Configuration for star thresholds and network behavior

use crate::error::{GuardError, Result};
use crate::types::CanonicalRepo;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for a guard run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Repositories with fewer stars than this produce a warning
    pub warn: u32,
    /// Repositories with fewer stars than this produce an error
    pub error: u32,
    /// Repositories that are known to be low-popularity, with the reason they are accepted
    pub exceptions: Vec<Exception>,
    /// Network configuration
    pub network: NetworkConfig,
}

/// An accepted repository and the reason it is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exception {
    /// Canonical repository, e.g. `github.com/owner/repo`
    pub repository: String,
    pub reason: String,
}

/// Network configuration for page fetches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Override for the User-Agent header
    pub user_agent: Option<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            warn: 100,
            error: 10,
            exceptions: Vec::new(),
            network: NetworkConfig::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl GuardConfig {
    /// Create a new builder for GuardConfig
    pub fn builder() -> GuardConfigBuilder {
        GuardConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read, parse and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GuardError::config(format!("could not read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations where the warn threshold can never fire
    pub fn validate(&self) -> Result<()> {
        if self.error > self.warn {
            return Err(GuardError::config(format!(
                "error threshold ({}) must not exceed warn threshold ({})",
                self.error, self.warn
            )));
        }
        if self.network.timeout_secs == 0 {
            return Err(GuardError::config("network timeout must be at least one second"));
        }
        Ok(())
    }

    /// Find the exception entry for a repository, if any
    pub fn exception_for(&self, repo: &CanonicalRepo) -> Option<&Exception> {
        let key = repo.to_string();
        self.exceptions
            .iter()
            .find(|e| e.repository.trim_end_matches('/') == key)
    }
}

/// Builder for GuardConfig
#[derive(Default)]
pub struct GuardConfigBuilder {
    warn: Option<u32>,
    error: Option<u32>,
    exceptions: Vec<Exception>,
    network: Option<NetworkConfig>,
}

impl GuardConfigBuilder {
    pub fn warn(mut self, threshold: u32) -> Self {
        self.warn = Some(threshold);
        self
    }

    pub fn error(mut self, threshold: u32) -> Self {
        self.error = Some(threshold);
        self
    }

    pub fn exception(mut self, repository: impl Into<String>, reason: impl Into<String>) -> Self {
        self.exceptions.push(Exception {
            repository: repository.into(),
            reason: reason.into(),
        });
        self
    }

    pub fn network(mut self, network: NetworkConfig) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> GuardConfig {
        let defaults = GuardConfig::default();
        GuardConfig {
            warn: self.warn.unwrap_or(defaults.warn),
            error: self.error.unwrap_or(defaults.error),
            exceptions: self.exceptions,
            network: self.network.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = GuardConfig::from_toml(
            r#"
warn = 500
error = 50

[[exceptions]]
repository = "github.com/acme/tiny"
reason = "internal fork"

[network]
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.warn, 500);
        assert_eq!(config.error, 50);
        assert_eq!(config.exceptions.len(), 1);
        assert_eq!(config.network.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = GuardConfig::from_toml("warn = 20").unwrap();
        assert_eq!(config.warn, 20);
        assert_eq!(config.error, 10);
        assert_eq!(config.network.timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let config = GuardConfig::builder().warn(10).error(100).build();
        assert!(matches!(config.validate(), Err(GuardError::ConfigError(_))));

        let config = GuardConfig::builder().warn(10).error(10).build();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_exception_for() {
        let config = GuardConfig::builder()
            .exception("github.com/acme/tiny/", "vendored")
            .build();

        let repo = CanonicalRepo::new("github.com", "acme", "tiny");
        assert_eq!(config.exception_for(&repo).map(|e| e.reason.as_str()), Some("vendored"));

        let other = CanonicalRepo::new("github.com", "acme", "other");
        assert!(config.exception_for(&other).is_none());
    }
}
