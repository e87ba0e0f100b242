//! Logging and metrics reporting for Simlife applications.
//!
//! This crate provides the observability pieces wired at startup:
//!
//! - **Logging**: Structured JSON or pretty logging via `tracing-subscriber`
//! - **Metrics**: A Prometheus-backed registry fed by the `metrics` crate
//! - **Prometheus**: A scrape endpoint rendering the registry (`prometheus` feature)
//! - **Graphite**: A background reporter pushing the registry every minute
//!   (`graphite` feature)
//!
//! # Architecture
//!
//! ```text
//!   metrics::counter!() ──► MetricsRegistry ──┬──► PrometheusEndpoint ──► GET /prometheusMetrics
//!                                             │
//!                                             └──► GraphiteReporter ───► host:2003 (plaintext)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use simlife_telemetry::{init_logging, init_metrics, GraphiteConfig, GraphiteReporter, LogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), simlife_telemetry::TelemetryError> {
//!     init_logging(&LogConfig::production())?;
//!     let registry = init_metrics()?;
//!
//!     let config = GraphiteConfig::new("localhost", 2003).with_prefix("simlifeApplication");
//!     let reporter = GraphiteReporter::new(config, registry).start();
//!
//!     // ... serve requests ...
//!
//!     reporter.stop().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
#[cfg(feature = "graphite")]
pub mod graphite;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
#[cfg(feature = "graphite")]
pub use graphite::{GraphiteConfig, GraphiteHandle, GraphiteReporter};
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, MetricsRegistry};
#[cfg(feature = "prometheus")]
pub use metrics::PrometheusEndpoint;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
