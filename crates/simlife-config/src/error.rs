//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::tree::FieldKind;

/// Errors that can occur while building, loading or querying settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error.
    #[error("failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The key does not resolve to a declared field.
    #[error("unknown configuration path: {path}")]
    UnknownPath {
        /// The offending path, as supplied.
        path: String,
    },

    /// The value cannot be coerced to the field's declared kind.
    #[error("type mismatch for {path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared path of the field.
        path: String,
        /// Declared kind of the field.
        expected: FieldKind,
        /// Description of the rejected value.
        found: String,
    },

    /// Missing required field.
    #[error("missing required configuration field: {field}")]
    MissingField {
        /// The missing field path.
        field: String,
    },

    /// Environment variable parsing error.
    #[error("failed to parse environment variable {var}: {reason}")]
    EnvParseError {
        /// The environment variable name.
        var: String,
        /// Explanation of the parsing error.
        reason: String,
    },

    /// Validation error after loading.
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Create a new file not found error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a new read error.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a new unknown path error.
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownPath { path: path.into() }
    }

    /// Create a new type mismatch error.
    pub fn type_mismatch(
        path: impl Into<String>,
        expected: FieldKind,
        found: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            path: path.into(),
            expected,
            found: found.into(),
        }
    }

    /// Create a new missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create a new environment variable parse error.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }

    /// Create a new validation error.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// Returns true for errors raised by path lookup.
    pub fn is_unknown_path(&self) -> bool {
        matches!(self, Self::UnknownPath { .. })
    }

    /// Returns true for errors raised by value coercion.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error() {
        let err = ConfigError::file_not_found("/path/to/application.yml");
        assert!(err.to_string().contains("/path/to/application.yml"));
    }

    #[test]
    fn test_unknown_path_error() {
        let err = ConfigError::unknown_path("cache.redis.enabled");
        assert!(err.is_unknown_path());
        assert!(err.to_string().contains("cache.redis.enabled"));
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = ConfigError::type_mismatch("async.corePoolSize", FieldKind::Int, "bool `true`");
        assert!(err.is_type_mismatch());
        let message = err.to_string();
        assert!(message.contains("async.corePoolSize"));
        assert!(message.contains("int"));
        assert!(message.contains("bool `true`"));
    }

    #[test]
    fn test_missing_field_error() {
        let err = ConfigError::missing_field("security.rememberMe.key");
        assert!(err.to_string().contains("security.rememberMe.key"));
    }

    #[test]
    fn test_env_parse_error() {
        let err = ConfigError::env_parse_error("SIMLIFE__ASYNC", "path too short");
        assert!(err.to_string().contains("SIMLIFE__ASYNC"));
        assert!(err.to_string().contains("path too short"));
    }
}
