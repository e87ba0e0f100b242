//! Prometheus metrics registry and scrape endpoint.
//!
//! The registry is backed by `metrics-exporter-prometheus`: anything recorded
//! through the `metrics` macros ends up in [`MetricsRegistry::render`], which
//! both the scrape endpoint and the Graphite reporter read from.
//!
//! # Example
//!
//! ```rust,ignore
//! use simlife_telemetry::metrics::{init_metrics, PrometheusEndpoint};
//!
//! let registry = init_metrics()?;
//! metrics::counter!("simlife_startup_total").increment(1);
//!
//! let endpoint = PrometheusEndpoint::new("/prometheusMetrics", registry);
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
#[cfg(feature = "prometheus")]
use bytes::Bytes;
#[cfg(feature = "prometheus")]
use http::{header, Method, Request, Response, StatusCode};
#[cfg(feature = "prometheus")]
use http_body_util::Full;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global recorder handle, installed at most once per process.
static METRICS_HANDLE: OnceLock<Result<PrometheusHandle, String>> = OnceLock::new();

/// Content type of the Prometheus text exposition format.
#[cfg(feature = "prometheus")]
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Metrics registry.
///
/// Cheap to clone; every clone renders the same recorder.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    handle: PrometheusHandle,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with the given handle.
    #[must_use]
    pub fn new(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// Renders all metrics in Prometheus text format.
    #[must_use]
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Installs the Prometheus recorder as the global `metrics` recorder.
///
/// Calling this again returns a registry over the same recorder.
///
/// # Errors
///
/// Returns `TelemetryError::MetricsInit` if another global recorder was
/// installed first.
pub fn init_metrics() -> TelemetryResult<MetricsRegistry> {
    let installed = METRICS_HANDLE.get_or_init(|| {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        metrics::set_global_recorder(recorder)
            .map(|()| handle)
            .map_err(|e| e.to_string())
    });

    installed
        .clone()
        .map(MetricsRegistry::new)
        .map_err(TelemetryError::MetricsInit)
}

/// Scrape endpoint serving the registry at a fixed path.
#[cfg(feature = "prometheus")]
#[derive(Debug, Clone)]
pub struct PrometheusEndpoint {
    path: String,
    registry: MetricsRegistry,
}

#[cfg(feature = "prometheus")]
impl PrometheusEndpoint {
    /// Name the endpoint is registered under.
    pub const SERVLET_NAME: &'static str = "prometheusMetrics";

    /// Creates an endpoint mounted at `path`.
    ///
    /// A missing leading `/` is added.
    #[must_use]
    pub fn new(path: &str, registry: MetricsRegistry) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self { path, registry }
    }

    /// Returns the mount path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the registry behind the endpoint.
    #[must_use]
    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }

    /// Answers `request` if it targets this endpoint.
    ///
    /// Returns `None` for other paths so the caller can route the request
    /// elsewhere. `GET` receives the rendered metrics and `HEAD` the same
    /// headers without a body; other methods receive `405 Method Not Allowed`.
    pub fn handle<B>(&self, request: &Request<B>) -> Option<Response<Full<Bytes>>> {
        if request.uri().path() != self.path {
            return None;
        }

        let method = request.method();
        let response = if method == Method::GET {
            Self::scrape(Bytes::from(self.registry.render()))
        } else if method == Method::HEAD {
            Self::scrape(Bytes::new())
        } else {
            Response::builder()
                .status(StatusCode::METHOD_NOT_ALLOWED)
                .header(header::ALLOW, "GET, HEAD")
                .body(Full::new(Bytes::new()))
        };

        Some(response.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to build metrics response");
            let mut fallback = Response::new(Full::new(Bytes::new()));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        }))
    }

    fn scrape(body: Bytes) -> http::Result<Response<Full<Bytes>>> {
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)
            .body(Full::new(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "prometheus")]
    use http_body_util::BodyExt;

    fn local_registry() -> (metrics_exporter_prometheus::PrometheusRecorder, MetricsRegistry) {
        let recorder = PrometheusBuilder::new().build_recorder();
        let registry = MetricsRegistry::new(recorder.handle());
        (recorder, registry)
    }

    #[test]
    fn test_registry_renders_recorded_metrics() {
        let (recorder, registry) = local_registry();
        metrics::with_local_recorder(&recorder, || {
            metrics::counter!("simlife_cache_hits_total", "cache" => "users").increment(3);
        });

        let text = registry.render();
        assert!(text.contains("simlife_cache_hits_total{cache=\"users\"} 3"));
    }

    #[test]
    fn test_init_metrics_is_idempotent() {
        let first = init_metrics();
        let second = init_metrics();
        assert_eq!(first.is_ok(), second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            assert_eq!(first.render(), second.render());
        }
    }

    #[cfg(feature = "prometheus")]
    #[test]
    fn test_endpoint_path_normalized() {
        let (_recorder, registry) = local_registry();
        let endpoint = PrometheusEndpoint::new("prometheusMetrics", registry);
        assert_eq!(endpoint.path(), "/prometheusMetrics");
    }

    #[cfg(feature = "prometheus")]
    #[tokio::test]
    async fn test_endpoint_serves_metrics() {
        let (recorder, registry) = local_registry();
        metrics::with_local_recorder(&recorder, || {
            metrics::gauge!("simlife_async_pool_active").set(2.0);
        });
        let endpoint = PrometheusEndpoint::new("/prometheusMetrics", registry);

        let request = Request::get("/prometheusMetrics").body(()).unwrap();
        let response = endpoint.handle(&request).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROMETHEUS_CONTENT_TYPE
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("simlife_async_pool_active 2"));
    }

    #[cfg(feature = "prometheus")]
    #[tokio::test]
    async fn test_endpoint_head_has_no_body() {
        let (recorder, registry) = local_registry();
        metrics::with_local_recorder(&recorder, || {
            metrics::counter!("simlife_jobs_total").increment(4);
        });
        let endpoint = PrometheusEndpoint::new("/prometheusMetrics", registry);

        let request = Request::head("/prometheusMetrics").body(()).unwrap();
        let response = endpoint.handle(&request).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PROMETHEUS_CONTENT_TYPE
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty());
    }

    #[cfg(feature = "prometheus")]
    #[test]
    fn test_endpoint_ignores_other_paths() {
        let (_recorder, registry) = local_registry();
        let endpoint = PrometheusEndpoint::new("/prometheusMetrics", registry);

        let request = Request::get("/management/health").body(()).unwrap();
        assert!(endpoint.handle(&request).is_none());
    }

    #[cfg(feature = "prometheus")]
    #[test]
    fn test_endpoint_rejects_post() {
        let (_recorder, registry) = local_registry();
        let endpoint = PrometheusEndpoint::new("/prometheusMetrics", registry);

        let request = Request::post("/prometheusMetrics").body(()).unwrap();
        let response = endpoint.handle(&request).unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
