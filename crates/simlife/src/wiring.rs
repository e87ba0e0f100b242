//! Conditional startup wiring.
//!
//! Once the settings are loaded, [`StartupWiring::run`] walks a fixed list of
//! [`WiringStep`]s. Each step has a predicate over the settings and the
//! capabilities compiled in; when it holds, the step's action runs exactly
//! once. Steps run sequentially in [`WiringStep::ORDER`] and the first
//! failing action aborts startup.
//!
//! | Step | Runs when |
//! |------|-----------|
//! | TLS cipher order | `tls` feature, SSL ciphers and key store set, server factory supplied |
//! | Graphite | `graphite` feature and `metrics.graphite.enabled` |
//! | Prometheus | `prometheus` feature and `metrics.prometheus.enabled` |
//! | Info contributors | always; each contributor has its own flag |
//!
//! # Example
//!
//! ```rust,ignore
//! use simlife::config::ConfigLoader;
//! use simlife::wiring::StartupWiring;
//!
//! let environment = ConfigLoader::new()
//!     .with_root_key("simlife")
//!     .with_file("config/application.yml")?
//!     .with_env_prefix("SIMLIFE")
//!     .with_build_metadata("target/classes")?
//!     .load_environment()?;
//!
//! let wired = StartupWiring::new(environment).run().await?;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use simlife_config::{Environment, SimlifeProperties};
#[cfg(feature = "graphite")]
use simlife_telemetry::graphite::{GraphiteConfig, GraphiteHandle, GraphiteReporter};
#[cfg(any(feature = "graphite", feature = "prometheus"))]
use simlife_telemetry::metrics::{init_metrics, MetricsRegistry};
#[cfg(feature = "prometheus")]
use simlife_telemetry::metrics::PrometheusEndpoint;

use crate::error::WiringError;
use crate::info::{
    collect_info, ActiveProfilesInfoContributor, InfoContributor, InfoSettings,
    MailEnabledInfoContributor, MetadataInfoContributor,
};
#[cfg(feature = "tls")]
use crate::tls::{EmbeddedServerFactory, ServerSsl};

/// Logged when Graphite reporting starts.
pub const GRAPHITE_INITIALIZING_MESSAGE: &str = "Initializing Metrics Graphite reporting";

/// Logged when the server TLS setup is customized.
pub const TLS_CONFIGURING_MESSAGE: &str = "Configuring Undertow";

/// A startup wiring step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WiringStep {
    /// Server-preferred cipher suite order.
    TlsCipherOrder,
    /// Periodic Graphite reporting.
    Graphite,
    /// Prometheus scrape endpoint.
    Prometheus,
    /// Info document contributors.
    InfoContributors,
}

impl WiringStep {
    /// Every step, in execution order.
    pub const ORDER: [Self; 4] = [
        Self::TlsCipherOrder,
        Self::Graphite,
        Self::Prometheus,
        Self::InfoContributors,
    ];

    /// Returns the step name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::TlsCipherOrder => "tls-cipher-order",
            Self::Graphite => "graphite",
            Self::Prometheus => "prometheus",
            Self::InfoContributors => "info-contributors",
        }
    }
}

impl fmt::Display for WiringStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inputs of the startup wiring.
///
/// # Example
///
/// ```rust,ignore
/// use simlife::tls::{EmbeddedServerFactory, ServerSsl};
/// use simlife::wiring::StartupWiring;
///
/// let wired = StartupWiring::new(environment)
///     .with_server_ssl(
///         ServerSsl::new()
///             .with_ciphers(["TLS_AES_256_GCM_SHA384"])
///             .with_key_store("config/tls/keystore.p12"),
///     )
///     .with_server_factory(EmbeddedServerFactory::new())
///     .run()
///     .await?;
/// ```
pub struct StartupWiring {
    properties: Arc<SimlifeProperties>,
    active_profiles: Vec<String>,
    build_info: BTreeMap<String, String>,
    git_info: BTreeMap<String, String>,
    #[cfg(feature = "tls")]
    ssl: ServerSsl,
    #[cfg(feature = "tls")]
    server_factory: Option<EmbeddedServerFactory>,
    info: InfoSettings,
    #[cfg(any(feature = "graphite", feature = "prometheus"))]
    registry: Option<MetricsRegistry>,
}

impl fmt::Debug for StartupWiring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("StartupWiring");
        debug.field("active_profiles", &self.active_profiles);
        #[cfg(feature = "tls")]
        debug
            .field("ssl", &self.ssl)
            .field("server_factory", &self.server_factory);
        debug.field("info", &self.info).finish_non_exhaustive()
    }
}

impl StartupWiring {
    /// Creates the wiring for a loaded environment.
    #[must_use]
    pub fn new(environment: Environment) -> Self {
        let build_info = environment.metadata_section("build");
        let git_info = environment.metadata_section("git");

        Self {
            properties: environment.properties.into_shared(),
            active_profiles: environment.active_profiles,
            build_info,
            git_info,
            #[cfg(feature = "tls")]
            ssl: ServerSsl::default(),
            #[cfg(feature = "tls")]
            server_factory: None,
            info: InfoSettings::default(),
            #[cfg(any(feature = "graphite", feature = "prometheus"))]
            registry: None,
        }
    }

    /// Sets the server SSL inputs.
    #[cfg(feature = "tls")]
    #[must_use]
    pub fn with_server_ssl(mut self, ssl: ServerSsl) -> Self {
        self.ssl = ssl;
        self
    }

    /// Supplies the embedded server factory to customize.
    #[cfg(feature = "tls")]
    #[must_use]
    pub fn with_server_factory(mut self, factory: EmbeddedServerFactory) -> Self {
        self.server_factory = Some(factory);
        self
    }

    /// Sets which info contributors are enabled.
    #[must_use]
    pub fn with_info_settings(mut self, info: InfoSettings) -> Self {
        self.info = info;
        self
    }

    /// Uses `registry` instead of installing the global recorder.
    #[cfg(any(feature = "graphite", feature = "prometheus"))]
    #[must_use]
    pub fn with_metrics_registry(mut self, registry: MetricsRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Returns true if `step` should run.
    ///
    /// Steps whose integration is not compiled in never apply.
    pub fn applies(&self, step: WiringStep) -> bool {
        match step {
            WiringStep::TlsCipherOrder => self.tls_configured(),
            WiringStep::Graphite => {
                cfg!(feature = "graphite") && self.properties.metrics.graphite.enabled
            }
            WiringStep::Prometheus => {
                cfg!(feature = "prometheus") && self.properties.metrics.prometheus.enabled
            }
            WiringStep::InfoContributors => true,
        }
    }

    #[cfg(feature = "tls")]
    fn tls_configured(&self) -> bool {
        self.ssl.is_configured() && self.server_factory.is_some()
    }

    #[cfg(not(feature = "tls"))]
    #[allow(clippy::unused_self)]
    const fn tls_configured(&self) -> bool {
        false
    }

    /// Runs every applicable step once, in order.
    ///
    /// Must be called within a tokio runtime when Graphite reporting is
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; later steps do not run.
    pub async fn run(mut self) -> Result<Wired, WiringError> {
        let mut wired = Wired {
            properties: Arc::clone(&self.properties),
            #[cfg(feature = "tls")]
            server_factory: None,
            #[cfg(feature = "graphite")]
            graphite: None,
            #[cfg(feature = "prometheus")]
            prometheus: None,
            info_contributors: Vec::new(),
            applied: Vec::new(),
        };

        for step in WiringStep::ORDER {
            if !self.applies(step) {
                tracing::debug!(step = %step, "Skipping wiring step");
                continue;
            }

            tracing::debug!(step = %step, "Running wiring step");
            match self.apply(step, &mut wired) {
                Ok(()) => {
                    tracing::debug!(step = %step, "Wiring step completed");
                    wired.applied.push(step);
                }
                Err(e) => {
                    tracing::error!(step = %step, error = %e, "Wiring step failed");
                    return Err(e);
                }
            }
        }

        #[cfg(feature = "tls")]
        {
            wired.server_factory = self.server_factory.take();
        }
        Ok(wired)
    }

    // Only reached for steps that `applies`, so disabled integrations fall through
    fn apply(&mut self, step: WiringStep, wired: &mut Wired) -> Result<(), WiringError> {
        match step {
            WiringStep::TlsCipherOrder => {
                #[cfg(feature = "tls")]
                self.configure_cipher_order();
            }
            WiringStep::Graphite => {
                #[cfg(feature = "graphite")]
                {
                    wired.graphite = Some(self.start_graphite()?);
                }
            }
            WiringStep::Prometheus => {
                #[cfg(feature = "prometheus")]
                {
                    wired.prometheus = Some(self.prometheus_endpoint()?);
                }
            }
            WiringStep::InfoContributors => {
                wired.info_contributors = self.info_contributors();
            }
        }
        Ok(())
    }

    #[cfg(feature = "tls")]
    fn configure_cipher_order(&mut self) {
        let Some(factory) = self.server_factory.as_mut() else {
            return;
        };

        tracing::info!("{}", TLS_CONFIGURING_MESSAGE);
        if self.properties.http.use_undertow_user_cipher_suites_order {
            tracing::info!("Setting user cipher suite order to true");
            factory.add_builder_customizer(|options| options.user_cipher_suites_order = true);
        }
    }

    #[cfg(feature = "graphite")]
    fn start_graphite(&mut self) -> Result<GraphiteHandle, WiringError> {
        tracing::info!("{}", GRAPHITE_INITIALIZING_MESSAGE);

        let graphite = &self.properties.metrics.graphite;
        let port = u16::try_from(graphite.port).map_err(|_| {
            WiringError::invalid_setting(
                "metrics.graphite.port",
                format!("not a TCP port: {}", graphite.port),
            )
        })?;
        let config = GraphiteConfig::new(&graphite.host, port).with_prefix(&graphite.prefix);

        Ok(GraphiteReporter::new(config, self.metrics_registry()?).start())
    }

    #[cfg(feature = "prometheus")]
    fn prometheus_endpoint(&mut self) -> Result<PrometheusEndpoint, WiringError> {
        let endpoint = self.properties.metrics.prometheus.endpoint.clone();
        tracing::info!("Initializing Metrics Prometheus endpoint at {}", endpoint);

        Ok(PrometheusEndpoint::new(&endpoint, self.metrics_registry()?))
    }

    fn info_contributors(&self) -> Vec<Box<dyn InfoContributor>> {
        let mut contributors: Vec<Box<dyn InfoContributor>> = Vec::new();

        if self.info.active_profiles {
            contributors.push(Box::new(ActiveProfilesInfoContributor::new(
                self.active_profiles.clone(),
            )));
        }
        if self.info.mail_enabled {
            contributors.push(Box::new(MailEnabledInfoContributor::new(Arc::clone(
                &self.properties,
            ))));
        }
        if self.info.build && !self.build_info.is_empty() {
            contributors.push(Box::new(MetadataInfoContributor::build(
                self.build_info.clone(),
            )));
        }
        if self.info.git && !self.git_info.is_empty() {
            contributors.push(Box::new(MetadataInfoContributor::git(self.git_info.clone())));
        }

        for contributor in &contributors {
            tracing::debug!(contributor = contributor.name(), "Registered info contributor");
        }
        contributors
    }

    #[cfg(any(feature = "graphite", feature = "prometheus"))]
    fn metrics_registry(&mut self) -> Result<MetricsRegistry, WiringError> {
        if let Some(registry) = &self.registry {
            return Ok(registry.clone());
        }
        let registry = init_metrics()?;
        self.registry = Some(registry.clone());
        Ok(registry)
    }
}

/// What the startup wiring produced.
pub struct Wired {
    /// The shared settings.
    pub properties: Arc<SimlifeProperties>,

    /// The server factory, with any customizers registered.
    #[cfg(feature = "tls")]
    pub server_factory: Option<EmbeddedServerFactory>,

    /// Running Graphite reporter.
    #[cfg(feature = "graphite")]
    pub graphite: Option<GraphiteHandle>,

    /// Prometheus scrape endpoint to mount.
    #[cfg(feature = "prometheus")]
    pub prometheus: Option<PrometheusEndpoint>,

    /// Enabled info contributors, in order.
    pub info_contributors: Vec<Box<dyn InfoContributor>>,

    /// Steps that ran, in order.
    pub applied: Vec<WiringStep>,
}

impl fmt::Debug for Wired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Wired");
        #[cfg(feature = "tls")]
        debug.field("server_factory", &self.server_factory);
        #[cfg(feature = "graphite")]
        debug.field("graphite", &self.graphite);
        #[cfg(feature = "prometheus")]
        debug.field("prometheus", &self.prometheus);
        debug
            .field("info_contributors", &self.info_contributors.len())
            .field("applied", &self.applied)
            .finish_non_exhaustive()
    }
}

impl Wired {
    /// Returns the info document built from the enabled contributors.
    #[must_use]
    pub fn info(&self) -> serde_json::Value {
        collect_info(&self.info_contributors)
    }

    /// Stops background activity started during wiring.
    pub async fn shutdown(self) {
        #[cfg(feature = "graphite")]
        if let Some(graphite) = self.graphite {
            graphite.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(any(feature = "graphite", feature = "prometheus"))]
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::json;

    fn environment() -> Environment {
        let mut properties = SimlifeProperties::default();
        properties.security.remember_me.key = "5c37379956bd1242f5636c8cb322c2966ad81277".to_string();
        Environment {
            properties,
            active_profiles: vec!["dev".to_string()],
            ..Environment::default()
        }
    }

    #[cfg(any(feature = "graphite", feature = "prometheus"))]
    fn local_registry() -> MetricsRegistry {
        MetricsRegistry::new(PrometheusBuilder::new().build_recorder().handle())
    }

    #[cfg(feature = "tls")]
    fn ssl() -> ServerSsl {
        ServerSsl::new()
            .with_ciphers(["TLS_AES_256_GCM_SHA384"])
            .with_key_store("config/tls/keystore.p12")
    }

    #[test]
    fn test_step_order() {
        assert_eq!(
            WiringStep::ORDER.map(WiringStep::name),
            ["tls-cipher-order", "graphite", "prometheus", "info-contributors"]
        );
    }

    #[tokio::test]
    async fn test_defaults_only_wire_info() {
        let wired = StartupWiring::new(environment()).run().await.unwrap();

        assert_eq!(wired.applied, vec![WiringStep::InfoContributors]);
        #[cfg(feature = "graphite")]
        assert!(wired.graphite.is_none());
        #[cfg(feature = "prometheus")]
        assert!(wired.prometheus.is_none());
        #[cfg(feature = "tls")]
        assert!(wired.server_factory.is_none());
        assert_eq!(wired.info(), json!({"activeProfiles": ["dev"], "mailEnabled": false}));
    }

    #[cfg(feature = "tls")]
    #[tokio::test]
    async fn test_tls_cipher_order_customizer() {
        let wired = StartupWiring::new(environment())
            .with_server_ssl(ssl())
            .with_server_factory(EmbeddedServerFactory::new())
            .run()
            .await
            .unwrap();

        assert_eq!(wired.applied[0], WiringStep::TlsCipherOrder);
        let factory = wired.server_factory.unwrap();
        assert_eq!(factory.customizer_count(), 1);
        assert!(factory.tls_options().user_cipher_suites_order);
    }

    #[cfg(feature = "tls")]
    #[tokio::test]
    async fn test_tls_without_user_order_adds_no_customizer() {
        let mut environment = environment();
        environment.properties.http.use_undertow_user_cipher_suites_order = false;

        let wired = StartupWiring::new(environment)
            .with_server_ssl(ssl())
            .with_server_factory(EmbeddedServerFactory::new())
            .run()
            .await
            .unwrap();

        assert!(wired.applied.contains(&WiringStep::TlsCipherOrder));
        assert_eq!(wired.server_factory.unwrap().customizer_count(), 0);
    }

    #[cfg(feature = "tls")]
    #[test]
    fn test_tls_predicate_requires_all_inputs() {
        let without_factory = StartupWiring::new(environment()).with_server_ssl(ssl());
        assert!(!without_factory.applies(WiringStep::TlsCipherOrder));

        let without_key_store = StartupWiring::new(environment())
            .with_server_ssl(ServerSsl::new().with_ciphers(["TLS_AES_256_GCM_SHA384"]))
            .with_server_factory(EmbeddedServerFactory::new());
        assert!(!without_key_store.applies(WiringStep::TlsCipherOrder));

        let without_ciphers = StartupWiring::new(environment())
            .with_server_ssl(ServerSsl::new().with_key_store("keystore.p12"))
            .with_server_factory(EmbeddedServerFactory::new());
        assert!(!without_ciphers.applies(WiringStep::TlsCipherOrder));
    }

    #[cfg(feature = "graphite")]
    #[tokio::test]
    async fn test_graphite_reporter_started() {
        let mut environment = environment();
        environment.properties.metrics.graphite.enabled = true;

        let wired = StartupWiring::new(environment)
            .with_metrics_registry(local_registry())
            .run()
            .await
            .unwrap();

        assert!(wired.applied.contains(&WiringStep::Graphite));
        assert!(wired.graphite.is_some());
        wired.shutdown().await;
    }

    #[cfg(feature = "graphite")]
    #[tokio::test]
    async fn test_graphite_invalid_port_aborts_startup() {
        let mut environment = environment();
        environment.properties.metrics.graphite.enabled = true;
        environment.properties.metrics.graphite.port = 70_000;
        environment.properties.metrics.prometheus.enabled = true;

        let err = StartupWiring::new(environment)
            .with_metrics_registry(local_registry())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WiringError::InvalidSetting { path: "metrics.graphite.port", .. }
        ));
    }

    #[cfg(feature = "prometheus")]
    #[tokio::test]
    async fn test_prometheus_endpoint_mounted() {
        let mut environment = environment();
        environment.properties.metrics.prometheus.enabled = true;
        environment.properties.metrics.prometheus.endpoint = "/management/prometheus".to_string();

        let wired = StartupWiring::new(environment)
            .with_metrics_registry(local_registry())
            .run()
            .await
            .unwrap();

        let endpoint = wired.prometheus.as_ref().unwrap();
        assert_eq!(endpoint.path(), "/management/prometheus");

        let request = http::Request::get("/management/prometheus").body(()).unwrap();
        let response = endpoint.handle(&request).unwrap();
        assert_eq!(response.status(), http::StatusCode::OK);
    }

    #[cfg(all(feature = "tls", feature = "graphite", feature = "prometheus"))]
    #[tokio::test]
    async fn test_all_steps_run_in_order() {
        let mut environment = environment();
        environment.properties.metrics.graphite.enabled = true;
        environment.properties.metrics.prometheus.enabled = true;

        let wired = StartupWiring::new(environment)
            .with_server_ssl(ssl())
            .with_server_factory(EmbeddedServerFactory::new())
            .with_metrics_registry(local_registry())
            .run()
            .await
            .unwrap();

        assert_eq!(wired.applied, WiringStep::ORDER.to_vec());
        wired.shutdown().await;
    }

    #[cfg(not(any(feature = "graphite", feature = "prometheus")))]
    #[tokio::test]
    async fn test_metrics_steps_skipped_without_integrations() {
        let mut environment = environment();
        environment.properties.metrics.graphite.enabled = true;
        environment.properties.metrics.prometheus.enabled = true;

        let wiring = StartupWiring::new(environment);
        assert!(!wiring.applies(WiringStep::Graphite));
        assert!(!wiring.applies(WiringStep::Prometheus));

        let wired = wiring.run().await.unwrap();
        assert_eq!(wired.applied, vec![WiringStep::InfoContributors]);
    }

    #[cfg(not(feature = "tls"))]
    #[test]
    fn test_tls_step_never_applies_without_tls() {
        let wiring = StartupWiring::new(environment());
        assert!(!wiring.applies(WiringStep::TlsCipherOrder));
    }

    #[tokio::test]
    async fn test_info_flags_and_metadata() {
        let mut environment = environment();
        environment
            .metadata
            .insert("git.branch".to_string(), "main".to_string());
        environment
            .metadata
            .insert("build.version".to_string(), "0.0.1".to_string());

        let wired = StartupWiring::new(environment)
            .with_info_settings(
                InfoSettings::default()
                    .with_active_profiles(false)
                    .with_build(false),
            )
            .run()
            .await
            .unwrap();

        assert_eq!(
            wired.info(),
            json!({"mailEnabled": false, "git": {"branch": "main"}})
        );
    }
}
