//! Startup wiring errors.

use simlife_config::ConfigError;
use simlife_telemetry::TelemetryError;
use thiserror::Error;

/// Errors raised while wiring integrations at startup.
///
/// Errors from the underlying crates are wrapped as-is.
#[derive(Error, Debug)]
pub enum WiringError {
    /// Settings could not be loaded or read.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Logging or metrics could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// `rustls` rejected the TLS configuration.
    #[cfg(feature = "tls")]
    #[error(transparent)]
    Tls(#[from] rustls::Error),

    /// A cipher suite name is not supported.
    #[cfg(feature = "tls")]
    #[error("unsupported cipher suite: {0}")]
    UnknownCipherSuite(String),

    /// A setting holds a value the integration cannot use.
    #[error("invalid value for {path}: {reason}")]
    InvalidSetting {
        /// Path of the setting.
        path: &'static str,
        /// Why the value is unusable.
        reason: String,
    },
}

impl WiringError {
    /// Create a new invalid setting error.
    pub fn invalid_setting(path: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            path,
            reason: reason.into(),
        }
    }
}
