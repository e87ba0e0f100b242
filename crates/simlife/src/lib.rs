//! # Simlife
//!
//! **Typed settings and startup wiring for Simlife applications**
//!
//! Simlife bundles the framework-level pieces every generated application
//! shares:
//!
//! - **Settings** – a typed, path-addressable tree with defaults for every
//!   field, loaded from documents and environment variables
//! - **Metrics** – Prometheus scrape endpoint and Graphite reporting
//! - **TLS** – server-preferred cipher suite order for the embedded server
//! - **Info** – active profiles, mail status and build metadata
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use simlife::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let environment = ConfigLoader::new()
//!         .with_root_key("simlife")
//!         .with_optional_file("config/application.yml")?
//!         .with_env_prefix("SIMLIFE")
//!         .load_environment()?;
//!
//!     init_logging(&LogConfig::for_profiles(&environment.active_profiles))?;
//!
//!     let wired = StartupWiring::new(environment).run().await?;
//!     println!("{}", wired.info());
//!     Ok(())
//! }
//! ```
//!
//! ## Startup
//!
//! ```text
//! defaults → documents → properties → env ──► SimlifeProperties (Arc, read-only)
//!                                                     │
//!                    TLS cipher order → Graphite → Prometheus → Info contributors
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod info;
#[cfg(feature = "tls")]
pub mod tls;
pub mod wiring;

// Re-export settings types
pub use simlife_config as config;

// Re-export telemetry types
pub use simlife_telemetry as telemetry;

pub use error::WiringError;
pub use wiring::{StartupWiring, Wired, WiringStep};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust,ignore
/// use simlife::prelude::*;
/// ```
pub mod prelude {
    pub use simlife_config::{
        ConfigError, ConfigLoader, Environment, FieldKind, SimlifeProperties, Value,
    };

    pub use simlife_telemetry::{init_logging, LogConfig, MetricsRegistry, TelemetryError};

    pub use crate::info::{InfoContributor, InfoSettings};
    #[cfg(feature = "tls")]
    pub use crate::tls::{EmbeddedServerFactory, ServerSsl, TlsOptions};
    pub use crate::wiring::{StartupWiring, Wired, WiringStep};
    pub use crate::WiringError;
}
