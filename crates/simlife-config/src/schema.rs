//! Settings group types.
//!
//! Every group is a plain record with public fields. Keys are camelCase on
//! the wire (`corePoolSize`), matching the dot paths used by
//! [`SimlifeProperties::get`](crate::SimlifeProperties::get).

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Thread pool sizing for asynchronous task execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AsyncProperties {
    /// Number of threads kept alive in the pool.
    pub core_pool_size: i32,
    /// Upper bound on pool threads.
    pub max_pool_size: i32,
    /// Pending task queue capacity.
    pub queue_capacity: i32,
}

impl Default for AsyncProperties {
    fn default() -> Self {
        Self {
            core_pool_size: defaults::async_pool::CORE_POOL_SIZE,
            max_pool_size: defaults::async_pool::MAX_POOL_SIZE,
            queue_capacity: defaults::async_pool::QUEUE_CAPACITY,
        }
    }
}

/// HTTP protocol version served by the embedded server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum HttpVersion {
    /// HTTP/1.1.
    #[default]
    #[serde(rename = "V_1_1")]
    V1_1,
    /// HTTP/2.
    #[serde(rename = "V_2_0")]
    V2_0,
}

impl HttpVersion {
    /// Variant names as they appear in configuration sources.
    pub const VARIANTS: &'static [&'static str] = &["V_1_1", "V_2_0"];

    /// Returns the configuration name of this version.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_1 => "V_1_1",
            Self::V2_0 => "V_2_0",
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V_1_1" => Ok(Self::V1_1),
            "V_2_0" => Ok(Self::V2_0),
            other => Err(format!("unknown HTTP version `{other}`")),
        }
    }
}

/// HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HttpProperties {
    /// Protocol version.
    pub version: HttpVersion,
    /// Force the server's cipher suite order. Only meaningful with HTTPS and
    /// an explicit cipher list.
    pub use_undertow_user_cipher_suites_order: bool,
    /// Static resource caching.
    pub cache: HttpCacheProperties,
}

impl Default for HttpProperties {
    fn default() -> Self {
        Self {
            version: defaults::http::VERSION,
            use_undertow_user_cipher_suites_order:
                defaults::http::USE_UNDERTOW_USER_CIPHER_SUITES_ORDER,
            cache: HttpCacheProperties::default(),
        }
    }
}

/// HTTP cache headers for static resources.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HttpCacheProperties {
    /// Cache lifetime in days.
    pub time_to_live_in_days: i32,
}

impl Default for HttpCacheProperties {
    fn default() -> Self {
        Self {
            time_to_live_in_days: defaults::http::CACHE_TIME_TO_LIVE_IN_DAYS,
        }
    }
}

/// Cache provider tuning.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CacheProperties {
    /// Hazelcast.
    pub hazelcast: HazelcastProperties,
    /// Ehcache.
    pub ehcache: EhcacheProperties,
    /// Infinispan.
    pub infinispan: InfinispanProperties,
    /// Memcached.
    pub memcached: MemcachedProperties,
}

/// Hazelcast cache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct HazelcastProperties {
    /// Entry lifetime in seconds.
    pub time_to_live_seconds: i32,
    /// Synchronous backup count.
    pub backup_count: i32,
    /// Management center connection.
    pub management_center: ManagementCenterProperties,
}

impl Default for HazelcastProperties {
    fn default() -> Self {
        Self {
            time_to_live_seconds: defaults::cache::hazelcast::TIME_TO_LIVE_SECONDS,
            backup_count: defaults::cache::hazelcast::BACKUP_COUNT,
            management_center: ManagementCenterProperties::default(),
        }
    }
}

/// Hazelcast management center.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ManagementCenterProperties {
    /// Whether the member reports to a management center.
    pub enabled: bool,
    /// Reporting interval in seconds.
    pub update_interval: i32,
    /// Management center URL.
    pub url: String,
}

impl Default for ManagementCenterProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::cache::hazelcast::MANAGEMENT_CENTER_ENABLED,
            update_interval: defaults::cache::hazelcast::MANAGEMENT_CENTER_UPDATE_INTERVAL,
            url: defaults::cache::hazelcast::MANAGEMENT_CENTER_URL.to_string(),
        }
    }
}

/// Ehcache settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct EhcacheProperties {
    /// Entry lifetime in seconds.
    pub time_to_live_seconds: i32,
    /// Heap entry limit.
    pub max_entries: i64,
}

impl Default for EhcacheProperties {
    fn default() -> Self {
        Self {
            time_to_live_seconds: defaults::cache::ehcache::TIME_TO_LIVE_SECONDS,
            max_entries: defaults::cache::ehcache::MAX_ENTRIES,
        }
    }
}

/// Infinispan settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct InfinispanProperties {
    /// JGroups configuration file.
    pub config_file: String,
    /// Whether cache statistics are collected.
    pub stats_enabled: bool,
    /// Local cache mode.
    pub local: InfinispanLocalProperties,
    /// Distributed cache mode.
    pub distributed: InfinispanDistributedProperties,
    /// Replicated cache mode.
    pub replicated: InfinispanReplicatedProperties,
}

impl Default for InfinispanProperties {
    fn default() -> Self {
        Self {
            config_file: defaults::cache::infinispan::CONFIG_FILE.to_string(),
            stats_enabled: defaults::cache::infinispan::STATS_ENABLED,
            local: InfinispanLocalProperties::default(),
            distributed: InfinispanDistributedProperties::default(),
            replicated: InfinispanReplicatedProperties::default(),
        }
    }
}

/// Infinispan local cache mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct InfinispanLocalProperties {
    /// Entry lifetime in seconds.
    pub time_to_live_seconds: i64,
    /// Entry limit.
    pub max_entries: i64,
}

impl Default for InfinispanLocalProperties {
    fn default() -> Self {
        Self {
            time_to_live_seconds: defaults::cache::infinispan::TIME_TO_LIVE_SECONDS,
            max_entries: defaults::cache::infinispan::MAX_ENTRIES,
        }
    }
}

/// Infinispan distributed cache mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct InfinispanDistributedProperties {
    /// Entry lifetime in seconds.
    pub time_to_live_seconds: i64,
    /// Entry limit.
    pub max_entries: i64,
    /// Number of owners per entry.
    pub instance_count: i32,
}

impl Default for InfinispanDistributedProperties {
    fn default() -> Self {
        Self {
            time_to_live_seconds: defaults::cache::infinispan::TIME_TO_LIVE_SECONDS,
            max_entries: defaults::cache::infinispan::MAX_ENTRIES,
            instance_count: defaults::cache::infinispan::INSTANCE_COUNT,
        }
    }
}

/// Infinispan replicated cache mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct InfinispanReplicatedProperties {
    /// Entry lifetime in seconds.
    pub time_to_live_seconds: i64,
    /// Entry limit.
    pub max_entries: i64,
}

impl Default for InfinispanReplicatedProperties {
    fn default() -> Self {
        Self {
            time_to_live_seconds: defaults::cache::infinispan::TIME_TO_LIVE_SECONDS,
            max_entries: defaults::cache::infinispan::MAX_ENTRIES,
        }
    }
}

/// Memcached client settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MemcachedProperties {
    /// Whether the memcached cache is used.
    pub enabled: bool,
    /// Comma or whitespace separated list of server addresses.
    pub servers: String,
    /// Entry expiration in seconds.
    pub expiration: i32,
    /// Use the binary protocol instead of the text one.
    pub use_binary_protocol: bool,
}

impl Default for MemcachedProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::cache::memcached::ENABLED,
            servers: defaults::cache::memcached::SERVERS.to_string(),
            expiration: defaults::cache::memcached::EXPIRATION,
            use_binary_protocol: defaults::cache::memcached::USE_BINARY_PROTOCOL,
        }
    }
}

/// Outgoing mail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MailProperties {
    /// Whether mails are sent at all.
    pub enabled: bool,
    /// Sender address.
    pub from: String,
    /// Base URL used in mail links.
    pub base_url: String,
}

impl Default for MailProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::mail::ENABLED,
            from: defaults::mail::FROM.to_string(),
            base_url: defaults::mail::BASE_URL.to_string(),
        }
    }
}

/// Security settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SecurityProperties {
    /// OAuth2 client credentials.
    pub client_authorization: ClientAuthorizationProperties,
    /// Token authentication.
    pub authentication: AuthenticationProperties,
    /// Remember-me cookie.
    pub remember_me: RememberMeProperties,
}

/// OAuth2 client credentials for service-to-service calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ClientAuthorizationProperties {
    /// Token endpoint.
    pub access_token_uri: String,
    /// Service id of the token issuer.
    pub token_service_id: String,
    /// Client id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
}

/// Token authentication.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct AuthenticationProperties {
    /// JWT signing.
    pub jwt: JwtProperties,
}

/// JWT signing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JwtProperties {
    /// Signing secret.
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_validity_in_seconds: i64,
    /// Token lifetime in seconds when "remember me" is checked.
    pub token_validity_in_seconds_for_remember_me: i64,
}

impl Default for JwtProperties {
    fn default() -> Self {
        Self {
            secret: defaults::security::JWT_SECRET.to_string(),
            token_validity_in_seconds: defaults::security::TOKEN_VALIDITY_IN_SECONDS,
            token_validity_in_seconds_for_remember_me:
                defaults::security::TOKEN_VALIDITY_IN_SECONDS_FOR_REMEMBER_ME,
        }
    }
}

/// Remember-me cookie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RememberMeProperties {
    /// Cookie signing key. Required; checked by
    /// [`SimlifeProperties::validate`](crate::SimlifeProperties::validate).
    pub key: String,
}

impl Default for RememberMeProperties {
    fn default() -> Self {
        Self {
            key: defaults::security::REMEMBER_ME_KEY.to_string(),
        }
    }
}

/// API documentation metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SwaggerProperties {
    /// API title.
    pub title: String,
    /// API description.
    pub description: String,
    /// API version.
    pub version: String,
    /// Terms of service URL.
    pub terms_of_service_url: String,
    /// Contact name.
    pub contact_name: String,
    /// Contact URL.
    pub contact_url: String,
    /// Contact email.
    pub contact_email: String,
    /// License name.
    pub license: String,
    /// License URL.
    pub license_url: String,
    /// Regex selecting documented paths.
    pub default_include_pattern: String,
    /// Host advertised in the documentation.
    pub host: String,
    /// Advertised schemes.
    pub protocols: Vec<String>,
    /// Whether generic response messages are generated.
    pub use_default_response_messages: bool,
}

impl Default for SwaggerProperties {
    fn default() -> Self {
        Self {
            title: defaults::swagger::TITLE.to_string(),
            description: defaults::swagger::DESCRIPTION.to_string(),
            version: defaults::swagger::VERSION.to_string(),
            terms_of_service_url: String::new(),
            contact_name: String::new(),
            contact_url: String::new(),
            contact_email: String::new(),
            license: String::new(),
            license_url: String::new(),
            default_include_pattern: defaults::swagger::DEFAULT_INCLUDE_PATTERN.to_string(),
            host: String::new(),
            protocols: Vec::new(),
            use_default_response_messages: defaults::swagger::USE_DEFAULT_RESPONSE_MESSAGES,
        }
    }
}

/// Metrics exporters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricsProperties {
    /// JMX exposure.
    pub jmx: JmxProperties,
    /// Periodic log reporter.
    pub logs: LogsReporterProperties,
    /// Graphite reporter.
    pub graphite: GraphiteProperties,
    /// Prometheus scrape endpoint.
    pub prometheus: PrometheusProperties,
}

/// JMX exposure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JmxProperties {
    /// Whether metrics are exposed.
    pub enabled: bool,
}

impl Default for JmxProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::metrics::JMX_ENABLED,
        }
    }
}

/// Periodic metrics log reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LogsReporterProperties {
    /// Whether metrics are written to the log.
    pub enabled: bool,
    /// Reporting period in seconds.
    pub report_frequency: i64,
}

impl Default for LogsReporterProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::metrics::LOGS_ENABLED,
            report_frequency: defaults::metrics::LOGS_REPORT_FREQUENCY,
        }
    }
}

/// Graphite reporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GraphiteProperties {
    /// Whether the reporter is started.
    pub enabled: bool,
    /// Carbon host.
    pub host: String,
    /// Carbon plaintext port.
    pub port: i32,
    /// Prefix for every metric path.
    pub prefix: String,
}

impl Default for GraphiteProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::metrics::GRAPHITE_ENABLED,
            host: defaults::metrics::GRAPHITE_HOST.to_string(),
            port: defaults::metrics::GRAPHITE_PORT,
            prefix: defaults::metrics::GRAPHITE_PREFIX.to_string(),
        }
    }
}

/// Prometheus scrape endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct PrometheusProperties {
    /// Whether the endpoint is mounted.
    pub enabled: bool,
    /// Mount path.
    pub endpoint: String,
}

impl Default for PrometheusProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::metrics::PROMETHEUS_ENABLED,
            endpoint: defaults::metrics::PROMETHEUS_ENDPOINT.to_string(),
        }
    }
}

/// Log shipping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LoggingProperties {
    /// Logstash appender.
    pub logstash: LogstashProperties,
}

/// Logstash appender.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct LogstashProperties {
    /// Whether logs are shipped.
    pub enabled: bool,
    /// Logstash host.
    pub host: String,
    /// Logstash TCP port.
    pub port: i32,
    /// Async appender queue size.
    pub queue_size: i32,
}

impl Default for LogstashProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::logging::LOGSTASH_ENABLED,
            host: defaults::logging::LOGSTASH_HOST.to_string(),
            port: defaults::logging::LOGSTASH_PORT,
            queue_size: defaults::logging::LOGSTASH_QUEUE_SIZE,
        }
    }
}

/// Cross-origin resource sharing policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CorsProperties {
    /// Allowed origins; `*` allows any.
    pub allowed_origins: Vec<String>,
    /// Allowed methods.
    pub allowed_methods: Vec<String>,
    /// Allowed request headers.
    pub allowed_headers: Vec<String>,
    /// Response headers exposed to the client.
    pub exposed_headers: Vec<String>,
    /// Whether credentials are supported.
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds.
    pub max_age: i64,
}

impl Default for CorsProperties {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: Vec::new(),
            allowed_headers: Vec::new(),
            exposed_headers: Vec::new(),
            allow_credentials: defaults::cors::ALLOW_CREDENTIALS,
            max_age: defaults::cors::MAX_AGE,
        }
    }
}

impl CorsProperties {
    /// Returns true when any origin is configured.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.allowed_origins.is_empty()
    }
}

/// Social login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SocialProperties {
    /// Client-side route after a successful sign in.
    pub redirect_after_sign_in: String,
}

impl Default for SocialProperties {
    fn default() -> Self {
        Self {
            redirect_after_sign_in: defaults::social::REDIRECT_AFTER_SIGN_IN.to_string(),
        }
    }
}

/// API gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct GatewayProperties {
    /// Rate limiting.
    pub rate_limiting: RateLimitingProperties,
    /// Endpoints reachable per microservice. An absent service is
    /// unrestricted.
    pub authorized_microservices_endpoints: IndexMap<String, Vec<String>>,
}

/// Gateway rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RateLimitingProperties {
    /// Whether requests are rate limited.
    pub enabled: bool,
    /// Calls allowed per window.
    pub limit: i64,
    /// Window length in seconds.
    pub duration_in_seconds: i32,
}

impl Default for RateLimitingProperties {
    fn default() -> Self {
        Self {
            enabled: defaults::gateway::RATE_LIMITING_ENABLED,
            limit: defaults::gateway::RATE_LIMITING_LIMIT,
            duration_in_seconds: defaults::gateway::RATE_LIMITING_DURATION_IN_SECONDS,
        }
    }
}

/// Service registry credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct RegistryProperties {
    /// Registry password.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_async_defaults() {
        let config = AsyncProperties::default();
        assert_eq!(config.core_pool_size, 2);
        assert_eq!(config.max_pool_size, 50);
        assert_eq!(config.queue_capacity, 10_000);
    }

    #[test]
    fn test_async_deserialize_partial() {
        let toml = r#"
            corePoolSize = 8
        "#;
        let config: AsyncProperties = toml::from_str(toml).unwrap();
        assert_eq!(config.core_pool_size, 8);
        // Defaults applied
        assert_eq!(config.max_pool_size, 50);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
            corePoolSize = 8
            poolName = "workers"
        "#;
        let result: Result<AsyncProperties, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_http_version_names() {
        assert_eq!(HttpVersion::default(), HttpVersion::V1_1);
        assert_eq!("V_2_0".parse::<HttpVersion>().unwrap(), HttpVersion::V2_0);
        assert!("HTTP_2".parse::<HttpVersion>().is_err());

        let version: HttpVersion = serde_json::from_str(r#""V_2_0""#).unwrap();
        assert_eq!(version, HttpVersion::V2_0);
        assert_eq!(serde_json::to_string(&HttpVersion::V1_1).unwrap(), r#""V_1_1""#);
    }

    #[test]
    fn test_hazelcast_nested_defaults() {
        let config = HazelcastProperties::default();
        assert_eq!(config.time_to_live_seconds, 3600);
        assert_eq!(config.backup_count, 1);
        assert!(!config.management_center.enabled);
        assert!(config.management_center.url.is_empty());
    }

    #[test]
    fn test_infinispan_defaults() {
        let config = InfinispanProperties::default();
        assert_eq!(config.config_file, "default-configs/default-jgroups-tcp.xml");
        assert_eq!(config.distributed.instance_count, 1);
        assert_eq!(config.replicated.max_entries, 100);
    }

    #[test]
    fn test_gateway_endpoints_keep_order() {
        let json = r#"{"authorizedMicroservicesEndpoints": {"zeta": ["/z"], "alpha": ["/a", "/b"]}}"#;
        let config: GatewayProperties = serde_json::from_str(json).unwrap();
        let services: Vec<&String> = config.authorized_microservices_endpoints.keys().collect();
        assert_eq!(services, vec!["zeta", "alpha"]);
        assert_eq!(config.rate_limiting.limit, 100_000);
    }

    #[test]
    fn test_cors_inactive_by_default() {
        let config = CorsProperties::default();
        assert!(!config.is_active());
        assert_eq!(config.max_age, 1800);
    }
}
