//! Root settings type.
//!
//! This module provides [`SimlifeProperties`], the root of the settings tree.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    AsyncProperties, CacheProperties, ConfigError, CorsProperties, GatewayProperties,
    HttpProperties, LoggingProperties, MailProperties, MetricsProperties, RegistryProperties,
    SecurityProperties, SocialProperties, SwaggerProperties,
};

/// Paths that must hold a non-empty value once loading is complete.
pub const REQUIRED_FIELDS: &[&str] = &["security.rememberMe.key"];

/// Complete Simlife settings.
///
/// Built with every default in place, overridden by
/// [`ConfigLoader`](crate::ConfigLoader) during startup, then shared
/// read-only for the life of the process.
///
/// # Example
///
/// ```
/// use simlife_config::SimlifeProperties;
///
/// let props = SimlifeProperties::default();
/// assert_eq!(props.async_pool.core_pool_size, 2);
/// assert_eq!(props.metrics.prometheus.endpoint, "/prometheusMetrics");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SimlifeProperties {
    /// Asynchronous task pool.
    #[serde(rename = "async")]
    pub async_pool: AsyncProperties,

    /// HTTP server.
    pub http: HttpProperties,

    /// Cache providers.
    pub cache: CacheProperties,

    /// Outgoing mail.
    pub mail: MailProperties,

    /// Security.
    pub security: SecurityProperties,

    /// API documentation.
    pub swagger: SwaggerProperties,

    /// Metrics exporters.
    pub metrics: MetricsProperties,

    /// Log shipping.
    pub logging: LoggingProperties,

    /// Cross-origin policy.
    pub cors: CorsProperties,

    /// Social login.
    pub social: SocialProperties,

    /// API gateway.
    pub gateway: GatewayProperties,

    /// Service registry.
    pub registry: RegistryProperties,
}

impl SimlifeProperties {
    /// Checks required fields.
    ///
    /// Path access never enforces presence; this is the separate binding
    /// validation stage run by [`ConfigLoader::load`](crate::ConfigLoader::load).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` naming the first required path
    /// whose value is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in REQUIRED_FIELDS {
            match self.get(path)? {
                crate::Value::String(value) if value.trim().is_empty() => {
                    return Err(ConfigError::missing_field(*path));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Wraps the settings for read-only sharing across the application.
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_remember_me_key() -> SimlifeProperties {
        let mut props = SimlifeProperties::default();
        props.security.remember_me.key = "5c37379956bd1242f5636c8cb322c2966ad81277".to_string();
        props
    }

    #[test]
    fn test_default_config() {
        let props = SimlifeProperties::default();
        assert_eq!(props.async_pool.core_pool_size, 2);
        assert_eq!(props.http.cache.time_to_live_in_days, 1461);
        assert_eq!(props.social.redirect_after_sign_in, "/#/home");
        assert!(props.gateway.authorized_microservices_endpoints.is_empty());
    }

    #[test]
    fn test_validate_requires_remember_me_key() {
        let err = SimlifeProperties::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { ref field } if field == "security.rememberMe.key"));
    }

    #[test]
    fn test_validate_blank_key_rejected() {
        let mut props = with_remember_me_key();
        props.security.remember_me.key = "   ".to_string();
        assert!(props.validate().is_err());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(with_remember_me_key().validate().is_ok());
    }

    #[test]
    fn test_validate_ignores_semantics() {
        let mut props = with_remember_me_key();
        props.async_pool.core_pool_size = -4;
        props.metrics.graphite.host = "not a host".to_string();
        assert!(props.validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&SimlifeProperties::default()).unwrap();
        assert!(toml_str.contains("[async]"));
        assert!(toml_str.contains("corePoolSize = 2"));
        assert!(toml_str.contains("managementCenter"));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            [async]
            corePoolSize = 4

            [cache.memcached]
            servers = "myserver:1337"
        "#;

        let props: SimlifeProperties = toml::from_str(toml_str).unwrap();
        assert_eq!(props.async_pool.core_pool_size, 4);
        assert_eq!(props.cache.memcached.servers, "myserver:1337");
        assert_eq!(props.async_pool.max_pool_size, 50);
    }

    #[test]
    fn test_unknown_section_rejected() {
        let toml_str = r#"
            [websocket]
            enabled = true
        "#;

        let result: Result<SimlifeProperties, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_shared() {
        let shared = with_remember_me_key().into_shared();
        let reader = Arc::clone(&shared);
        assert_eq!(reader.mail.enabled, shared.mail.enabled);
    }
}
