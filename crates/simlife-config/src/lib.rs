//! Typed settings tree for Simlife applications.
//!
//! This crate holds every framework setting in a strongly-typed tree with
//! support for:
//! - Defaults for every field
//! - Dot-path reads and writes (`cache.hazelcast.backupCount`)
//! - TOML, JSON and YAML configuration documents
//! - Environment variable overrides
//! - Strict validation (fails on unknown paths and mistyped values)
//! - Layered loading (defaults → documents → flat keys → env)
//!
//! # Overview
//!
//! The root is [`SimlifeProperties`], with one group per concern:
//!
//! - [`AsyncProperties`] - Task pool sizing
//! - [`HttpProperties`] - Protocol version, cipher order and static cache
//! - [`CacheProperties`] - Hazelcast, Ehcache, Infinispan and Memcached
//! - [`SecurityProperties`] - Client authorization, JWT and remember-me
//! - [`MetricsProperties`] - JMX, logs, Graphite and Prometheus reporters
//! - [`GatewayProperties`] - Rate limiting and authorized endpoints
//!
//! # Example
//!
//! ```no_run
//! use simlife_config::ConfigLoader;
//!
//! # fn main() -> Result<(), simlife_config::ConfigError> {
//! let props = ConfigLoader::new()
//!     .with_defaults()
//!     .with_root_key("simlife")
//!     .with_file("config/application.yml")?
//!     .with_env_prefix("SIMLIFE")
//!     .load()?;
//!
//! println!("Graphite reporting: {}", props.metrics.graphite.enabled);
//! # Ok(())
//! # }
//! ```
//!
//! # Path Access
//!
//! ```
//! use simlife_config::{SimlifeProperties, Value};
//!
//! let mut props = SimlifeProperties::default();
//! props.set("cache.hazelcast.backupCount", 2).unwrap();
//! assert_eq!(props.get("cache.hazelcast.backupCount").unwrap(), Value::Int(2));
//!
//! assert!(props.set("cache.hazelcast.backupCount", "two").unwrap_err().is_type_mismatch());
//! assert!(props.get("cache.redis.enabled").unwrap_err().is_unknown_path());
//! ```
//!
//! # Configuration File Format
//!
//! ```yaml
//! simlife:
//!   async:
//!     core-pool-size: 4
//!   http:
//!     version: V_2_0
//!   metrics:
//!     graphite:
//!       enabled: true
//!       host: graphite.internal
//!   security:
//!     remember-me:
//!       key: 5c37379956bd1242f5636c8cb322c2966ad81277
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any field can be overridden via environment variables using the format
//! `PREFIX__GROUP__FIELD`. For example:
//!
//! - `SIMLIFE__ASYNC__CORE_POOL_SIZE=8`
//! - `SIMLIFE__METRICS__PROMETHEUS__ENABLED=true`
//! - `SIMLIFE__GATEWAY__AUTHORIZED_MICROSERVICES_ENDPOINTS__billing=/api/invoices`

#![warn(missing_docs)]

mod config;
pub mod defaults;
mod environment;
mod error;
mod loader;
mod schema;
mod tree;

pub use config::*;
pub use environment::{Environment, BUILD_INFO_PROPERTIES, GIT_PROPERTIES};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use tree::{FieldKind, FieldSpec, Value, FIELDS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let props = SimlifeProperties::default();
        assert_eq!(props.http.version, HttpVersion::V1_1);
        assert_eq!(props.cache.infinispan.config_file, "default-configs/default-jgroups-tcp.xml");
    }

    #[test]
    fn test_every_field_readable() {
        let props = SimlifeProperties::default();
        for spec in SimlifeProperties::fields() {
            assert!(props.get(spec.path).is_ok(), "{} not readable", spec.path);
        }
    }
}
