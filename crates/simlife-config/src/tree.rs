//! Dot-path access to the settings tree.
//!
//! The shape of the tree is fixed at compile time by the typed groups in
//! [`schema`](crate::schema). This module adds a dynamic view on top of it:
//! every leaf is reachable through a path such as `cache.hazelcast.backupCount`
//! and carries a declared [`FieldKind`].
//!
//! # Path matching
//!
//! Paths are matched segment by segment, ignoring ASCII case and the `-`/`_`
//! separators, so `cache.hazelcast.backup-count`, `CACHE.HAZELCAST.BACKUP_COUNT`
//! and `cache.hazelcast.backupCount` resolve to the same field.
//!
//! # Example
//!
//! ```
//! use simlife_config::{SimlifeProperties, Value};
//!
//! let mut props = SimlifeProperties::default();
//! assert_eq!(props.get("async.corePoolSize").unwrap(), Value::Int(2));
//!
//! props.set("async.corePoolSize", 3).unwrap();
//! assert_eq!(props.async_pool.core_pool_size, 3);
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{ConfigError, HttpVersion, SimlifeProperties};

/// Declared type of a settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    String,
    /// Ordered list of strings.
    StringList,
    /// One of a closed set of variant names.
    Enum(&'static [&'static str]),
    /// Insertion-ordered map of string to list of strings.
    StringListMap,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::StringList => f.write_str("string[]"),
            Self::Enum(variants) => write!(f, "enum{{{}}}", variants.join(",")),
            Self::StringListMap => f.write_str("map<string, string[]>"),
        }
    }
}

impl FieldKind {
    /// Coerces a textual value (properties file, environment variable) to
    /// this kind.
    ///
    /// Lists are comma separated. Maps have no textual form; their entries
    /// are addressed as `path.<entry>` instead.
    #[must_use]
    pub fn parse_text(self, text: &str) -> Option<Value> {
        match self {
            Self::Int => text.trim().parse().ok().map(Value::Int),
            Self::Long => text.trim().parse().ok().map(Value::Long),
            Self::Bool => parse_bool(text.trim()).map(Value::Bool),
            Self::String => Some(Value::String(text.to_string())),
            Self::StringList => Some(Value::StringList(split_list(text))),
            Self::Enum(variants) => {
                let name = text.trim();
                variants
                    .contains(&name)
                    .then(|| Value::Enum(name.to_string()))
            }
            Self::StringListMap => None,
        }
    }

    /// Coerces a structured document value (TOML, JSON, YAML) to this kind.
    ///
    /// Scalars written as strings are parsed as text, and scalars are
    /// accepted where a string is declared.
    #[must_use]
    pub fn from_json(self, json: &serde_json::Value) -> Option<Value> {
        use serde_json::Value as Json;

        match (self, json) {
            (_, Json::String(text)) if self != Self::StringListMap => self.parse_text(text),
            (Self::Int, Json::Number(n)) => {
                n.as_i64().and_then(|v| i32::try_from(v).ok()).map(Value::Int)
            }
            (Self::Long, Json::Number(n)) => n.as_i64().map(Value::Long),
            (Self::Bool, Json::Bool(b)) => Some(Value::Bool(*b)),
            (Self::String, Json::Number(n)) => Some(Value::String(n.to_string())),
            (Self::String, Json::Bool(b)) => Some(Value::String(b.to_string())),
            (Self::StringList, Json::Array(items)) => {
                json_string_list(items).map(Value::StringList)
            }
            (Self::StringListMap, Json::Object(entries)) => {
                let mut map = IndexMap::with_capacity(entries.len());
                for (key, item) in entries {
                    let list = match item {
                        Json::Array(items) => json_string_list(items)?,
                        Json::String(text) => split_list(text),
                        _ => return None,
                    };
                    map.insert(key.clone(), list);
                }
                Some(Value::StringListMap(map))
            }
            _ => None,
        }
    }
}

/// A dynamically typed settings value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// Boolean.
    Bool(bool),
    /// String.
    String(String),
    /// List of strings.
    StringList(Vec<String>),
    /// Enum variant name.
    Enum(String),
    /// Map of string to list of strings.
    StringListMap(IndexMap<String, Vec<String>>),
}

impl Value {
    /// Short description used in error messages, e.g. ``bool `true` ``.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Int(v) => format!("int `{v}`"),
            Self::Long(v) => format!("long `{v}`"),
            Self::Bool(v) => format!("bool `{v}`"),
            Self::String(v) => format!("string `{v}`"),
            Self::StringList(v) => format!("string[] of {} items", v.len()),
            Self::Enum(v) => format!("enum `{v}`"),
            Self::StringListMap(v) => format!("map of {} entries", v.len()),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Self::StringList(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Self::StringList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<HttpVersion> for Value {
    fn from(v: HttpVersion) -> Self {
        Self::Enum(v.as_str().to_string())
    }
}

impl From<IndexMap<String, Vec<String>>> for Value {
    fn from(v: IndexMap<String, Vec<String>>) -> Self {
        Self::StringListMap(v)
    }
}

/// A declared field: its canonical path and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Canonical dot path.
    pub path: &'static str,
    /// Declared kind.
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Looks up a declared field, tolerating case and `-`/`_` differences.
    #[must_use]
    pub fn resolve(path: &str) -> Option<&'static FieldSpec> {
        FIELDS.iter().find(|spec| spec.path == path).or_else(|| {
            let wanted = canonical_segments(path);
            FIELDS
                .iter()
                .find(|spec| canonical_segments(spec.path) == wanted)
        })
    }

    /// Splits `<map field>.<entry>` into the map field and the entry key.
    ///
    /// The entry key keeps its original spelling.
    fn resolve_map_entry(path: &str) -> Option<(&'static FieldSpec, &str)> {
        FIELDS
            .iter()
            .filter(|spec| spec.kind == FieldKind::StringListMap)
            .find_map(|spec| {
                let depth = spec.path.split('.').count();
                let split_at = path.match_indices('.').nth(depth - 1)?.0;
                let (head, rest) = (&path[..split_at], &path[split_at + 1..]);
                (!rest.is_empty() && canonical_segments(head) == canonical_segments(spec.path))
                    .then_some((spec, rest))
            })
    }
}

/// Conversion between a concrete field type and [`Value`].
pub(crate) trait SettingValue: Sized {
    const KIND: FieldKind;

    fn to_value(&self) -> Value;

    /// Returns the rejected value when it does not fit.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl SettingValue for i32 {
    const KIND: FieldKind = FieldKind::Int;

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(v) => Ok(v),
            Value::Long(v) => i32::try_from(v).map_err(|_| Value::Long(v)),
            other => Err(other),
        }
    }
}

impl SettingValue for i64 {
    const KIND: FieldKind = FieldKind::Long;

    fn to_value(&self) -> Value {
        Value::Long(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Long(v) => Ok(v),
            Value::Int(v) => Ok(i64::from(v)),
            other => Err(other),
        }
    }
}

impl SettingValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl SettingValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl SettingValue for Vec<String> {
    const KIND: FieldKind = FieldKind::StringList;

    fn to_value(&self) -> Value {
        Value::StringList(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::StringList(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl SettingValue for HttpVersion {
    const KIND: FieldKind = FieldKind::Enum(HttpVersion::VARIANTS);

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Enum(name) => name.parse().map_err(|_| Value::Enum(name)),
            other => Err(other),
        }
    }
}

impl SettingValue for IndexMap<String, Vec<String>> {
    const KIND: FieldKind = FieldKind::StringListMap;

    fn to_value(&self) -> Value {
        Value::StringListMap(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::StringListMap(v) => Ok(v),
            other => Err(other),
        }
    }
}

/// Declares every leaf of the tree: path, Rust type and field access.
///
/// Generates [`FIELDS`] and the path dispatch used by `get`/`set`.
macro_rules! settings_table {
    ($( $path:literal => $ty:ty : $($field:ident).+ ;)*) => {
        /// Every declared field, in declaration order.
        pub static FIELDS: &[FieldSpec] = &[
            $( FieldSpec { path: $path, kind: <$ty as SettingValue>::KIND }, )*
        ];

        impl SimlifeProperties {
            fn read_declared(&self, path: &str) -> Option<Value> {
                match path {
                    $( $path => Some(SettingValue::to_value(&self.$($field).+)), )*
                    _ => None,
                }
            }

            fn write_declared(&mut self, path: &'static str, value: Value) -> Result<(), ConfigError> {
                match path {
                    $(
                        $path => {
                            self.$($field).+ = <$ty as SettingValue>::from_value(value).map_err(
                                |rejected| ConfigError::type_mismatch(
                                    path,
                                    <$ty as SettingValue>::KIND,
                                    rejected.describe(),
                                ),
                            )?;
                            Ok(())
                        }
                    )*
                    _ => Err(ConfigError::unknown_path(path)),
                }
            }
        }
    };
}

settings_table! {
    "async.corePoolSize" => i32 : async_pool.core_pool_size;
    "async.maxPoolSize" => i32 : async_pool.max_pool_size;
    "async.queueCapacity" => i32 : async_pool.queue_capacity;

    "http.version" => HttpVersion : http.version;
    "http.useUndertowUserCipherSuitesOrder" => bool : http.use_undertow_user_cipher_suites_order;
    "http.cache.timeToLiveInDays" => i32 : http.cache.time_to_live_in_days;

    "cache.hazelcast.timeToLiveSeconds" => i32 : cache.hazelcast.time_to_live_seconds;
    "cache.hazelcast.backupCount" => i32 : cache.hazelcast.backup_count;
    "cache.hazelcast.managementCenter.enabled" => bool : cache.hazelcast.management_center.enabled;
    "cache.hazelcast.managementCenter.updateInterval" => i32 : cache.hazelcast.management_center.update_interval;
    "cache.hazelcast.managementCenter.url" => String : cache.hazelcast.management_center.url;
    "cache.ehcache.timeToLiveSeconds" => i32 : cache.ehcache.time_to_live_seconds;
    "cache.ehcache.maxEntries" => i64 : cache.ehcache.max_entries;
    "cache.infinispan.configFile" => String : cache.infinispan.config_file;
    "cache.infinispan.statsEnabled" => bool : cache.infinispan.stats_enabled;
    "cache.infinispan.local.timeToLiveSeconds" => i64 : cache.infinispan.local.time_to_live_seconds;
    "cache.infinispan.local.maxEntries" => i64 : cache.infinispan.local.max_entries;
    "cache.infinispan.distributed.timeToLiveSeconds" => i64 : cache.infinispan.distributed.time_to_live_seconds;
    "cache.infinispan.distributed.maxEntries" => i64 : cache.infinispan.distributed.max_entries;
    "cache.infinispan.distributed.instanceCount" => i32 : cache.infinispan.distributed.instance_count;
    "cache.infinispan.replicated.timeToLiveSeconds" => i64 : cache.infinispan.replicated.time_to_live_seconds;
    "cache.infinispan.replicated.maxEntries" => i64 : cache.infinispan.replicated.max_entries;
    "cache.memcached.enabled" => bool : cache.memcached.enabled;
    "cache.memcached.servers" => String : cache.memcached.servers;
    "cache.memcached.expiration" => i32 : cache.memcached.expiration;
    "cache.memcached.useBinaryProtocol" => bool : cache.memcached.use_binary_protocol;

    "mail.enabled" => bool : mail.enabled;
    "mail.from" => String : mail.from;
    "mail.baseUrl" => String : mail.base_url;

    "security.clientAuthorization.accessTokenUri" => String : security.client_authorization.access_token_uri;
    "security.clientAuthorization.tokenServiceId" => String : security.client_authorization.token_service_id;
    "security.clientAuthorization.clientId" => String : security.client_authorization.client_id;
    "security.clientAuthorization.clientSecret" => String : security.client_authorization.client_secret;
    "security.authentication.jwt.secret" => String : security.authentication.jwt.secret;
    "security.authentication.jwt.tokenValidityInSeconds" => i64 : security.authentication.jwt.token_validity_in_seconds;
    "security.authentication.jwt.tokenValidityInSecondsForRememberMe" => i64 : security.authentication.jwt.token_validity_in_seconds_for_remember_me;
    "security.rememberMe.key" => String : security.remember_me.key;

    "swagger.title" => String : swagger.title;
    "swagger.description" => String : swagger.description;
    "swagger.version" => String : swagger.version;
    "swagger.termsOfServiceUrl" => String : swagger.terms_of_service_url;
    "swagger.contactName" => String : swagger.contact_name;
    "swagger.contactUrl" => String : swagger.contact_url;
    "swagger.contactEmail" => String : swagger.contact_email;
    "swagger.license" => String : swagger.license;
    "swagger.licenseUrl" => String : swagger.license_url;
    "swagger.defaultIncludePattern" => String : swagger.default_include_pattern;
    "swagger.host" => String : swagger.host;
    "swagger.protocols" => Vec<String> : swagger.protocols;
    "swagger.useDefaultResponseMessages" => bool : swagger.use_default_response_messages;

    "metrics.jmx.enabled" => bool : metrics.jmx.enabled;
    "metrics.logs.enabled" => bool : metrics.logs.enabled;
    "metrics.logs.reportFrequency" => i64 : metrics.logs.report_frequency;
    "metrics.graphite.enabled" => bool : metrics.graphite.enabled;
    "metrics.graphite.host" => String : metrics.graphite.host;
    "metrics.graphite.port" => i32 : metrics.graphite.port;
    "metrics.graphite.prefix" => String : metrics.graphite.prefix;
    "metrics.prometheus.enabled" => bool : metrics.prometheus.enabled;
    "metrics.prometheus.endpoint" => String : metrics.prometheus.endpoint;

    "logging.logstash.enabled" => bool : logging.logstash.enabled;
    "logging.logstash.host" => String : logging.logstash.host;
    "logging.logstash.port" => i32 : logging.logstash.port;
    "logging.logstash.queueSize" => i32 : logging.logstash.queue_size;

    "cors.allowedOrigins" => Vec<String> : cors.allowed_origins;
    "cors.allowedMethods" => Vec<String> : cors.allowed_methods;
    "cors.allowedHeaders" => Vec<String> : cors.allowed_headers;
    "cors.exposedHeaders" => Vec<String> : cors.exposed_headers;
    "cors.allowCredentials" => bool : cors.allow_credentials;
    "cors.maxAge" => i64 : cors.max_age;

    "social.redirectAfterSignIn" => String : social.redirect_after_sign_in;

    "gateway.authorizedMicroservicesEndpoints" => IndexMap<String, Vec<String>> : gateway.authorized_microservices_endpoints;
    "gateway.rateLimiting.enabled" => bool : gateway.rate_limiting.enabled;
    "gateway.rateLimiting.limit" => i64 : gateway.rate_limiting.limit;
    "gateway.rateLimiting.durationInSeconds" => i32 : gateway.rate_limiting.duration_in_seconds;

    "registry.password" => String : registry.password;
}

impl SimlifeProperties {
    /// Returns every declared field.
    #[must_use]
    pub fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    /// Reads the current value at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPath` if `path` is not a declared field.
    pub fn get(&self, path: &str) -> Result<Value, ConfigError> {
        FieldSpec::resolve(path)
            .and_then(|spec| self.read_declared(spec.path))
            .ok_or_else(|| ConfigError::unknown_path(path))
    }

    /// Replaces the value at `path`.
    ///
    /// The value must match the declared kind; the only coercion is between
    /// `int` and `long` when the number fits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPath` if `path` is not a declared field
    /// and `ConfigError::TypeMismatch` if the value has the wrong type.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        let spec = FieldSpec::resolve(path).ok_or_else(|| ConfigError::unknown_path(path))?;
        self.write_declared(spec.path, value.into())
    }

    /// Replaces the value at `path` from its textual form.
    ///
    /// A map field also accepts `path.<entry>` with a comma separated list,
    /// which inserts or replaces that single entry.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPath` if `path` is not a declared field
    /// and `ConfigError::TypeMismatch` if `text` does not parse.
    pub fn set_text(&mut self, path: &str, text: &str) -> Result<(), ConfigError> {
        if let Some(spec) = FieldSpec::resolve(path) {
            let value = spec
                .kind
                .parse_text(text)
                .ok_or_else(|| ConfigError::type_mismatch(spec.path, spec.kind, format!("text `{text}`")))?;
            return self.write_declared(spec.path, value);
        }

        let (spec, entry) =
            FieldSpec::resolve_map_entry(path).ok_or_else(|| ConfigError::unknown_path(path))?;
        self.insert_map_entry(spec.path, entry, split_list(text))
    }

    /// Replaces the value at `path` from a structured document value.
    pub(crate) fn set_json(&mut self, path: &str, json: &serde_json::Value) -> Result<(), ConfigError> {
        let spec = FieldSpec::resolve(path).ok_or_else(|| ConfigError::unknown_path(path))?;
        let value = spec
            .kind
            .from_json(json)
            .ok_or_else(|| ConfigError::type_mismatch(spec.path, spec.kind, json_description(json)))?;
        self.write_declared(spec.path, value)
    }

    /// Returns true if `path` names a map field, in which case a document
    /// object at that path is its value rather than a nested group.
    pub(crate) fn is_map_field(path: &str) -> bool {
        FieldSpec::resolve(path).is_some_and(|spec| spec.kind == FieldKind::StringListMap)
    }

    fn insert_map_entry(
        &mut self,
        path: &'static str,
        entry: &str,
        list: Vec<String>,
    ) -> Result<(), ConfigError> {
        let mut map = match self.read_declared(path) {
            Some(Value::StringListMap(map)) => map,
            _ => return Err(ConfigError::unknown_path(path)),
        };
        map.insert(entry.to_string(), list);
        self.write_declared(path, Value::StringListMap(map))
    }
}

/// Parse a boolean from a string.
pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_string_list(items: &[serde_json::Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn json_description(json: &serde_json::Value) -> String {
    match json {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => format!("bool `{b}`"),
        serde_json::Value::Number(n) => format!("number `{n}`"),
        serde_json::Value::String(s) => format!("string `{s}`"),
        serde_json::Value::Array(items) => format!("array of {} items", items.len()),
        serde_json::Value::Object(entries) => format!("table of {} entries", entries.len()),
    }
}

fn canonical_segments(path: &str) -> Vec<String> {
    path.split('.')
        .map(|segment| {
            segment
                .chars()
                .filter(|c| *c != '-' && *c != '_')
                .map(|c| c.to_ascii_lowercase())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_are_unique() {
        let mut paths: Vec<&str> = FIELDS.iter().map(|spec| spec.path).collect();
        let total = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }

    #[test]
    fn test_fields_unique_after_relaxation() {
        let mut canonical: Vec<Vec<String>> =
            FIELDS.iter().map(|spec| canonical_segments(spec.path)).collect();
        let total = canonical.len();
        canonical.sort();
        canonical.dedup();
        assert_eq!(canonical.len(), total);
    }

    #[test]
    fn test_resolve_relaxed_names() {
        let exact = FieldSpec::resolve("cache.hazelcast.backupCount").unwrap();
        assert_eq!(FieldSpec::resolve("cache.hazelcast.backup-count"), Some(exact));
        assert_eq!(FieldSpec::resolve("CACHE.HAZELCAST.BACKUP_COUNT"), Some(exact));
        assert!(FieldSpec::resolve("cache.hazelcast").is_none());
        assert!(FieldSpec::resolve("cache.hazelcast.backupCount.extra").is_none());
    }

    #[test]
    fn test_get_default() {
        let props = SimlifeProperties::default();
        assert_eq!(props.get("async.corePoolSize").unwrap(), Value::Int(2));
        assert_eq!(
            props.get("http.version").unwrap(),
            Value::Enum("V_1_1".to_string())
        );
    }

    #[test]
    fn test_get_unknown_path() {
        let props = SimlifeProperties::default();
        assert!(props.get("async").unwrap_err().is_unknown_path());
        assert!(props.get("async.poolName").unwrap_err().is_unknown_path());
        assert!(props.get("").unwrap_err().is_unknown_path());
    }

    #[test]
    fn test_set_int_widening_and_narrowing() {
        let mut props = SimlifeProperties::default();
        props.set("cache.ehcache.maxEntries", 500).unwrap();
        assert_eq!(props.cache.ehcache.max_entries, 500);

        props.set("async.queueCapacity", 20_i64).unwrap();
        assert_eq!(props.async_pool.queue_capacity, 20);

        let err = props
            .set("async.queueCapacity", i64::from(i32::MAX) + 1)
            .unwrap_err();
        assert!(err.is_type_mismatch());
        assert_eq!(props.async_pool.queue_capacity, 20);
    }

    #[test]
    fn test_set_type_mismatch_leaves_value() {
        let mut props = SimlifeProperties::default();
        let err = props.set("mail.enabled", "yes").unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(!props.mail.enabled);
    }

    #[test]
    fn test_set_enum() {
        let mut props = SimlifeProperties::default();
        props.set("http.version", HttpVersion::V2_0).unwrap();
        assert_eq!(props.http.version, HttpVersion::V2_0);

        let err = props
            .set("http.version", Value::Enum("V_3_0".to_string()))
            .unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(props.set("http.version", "V_1_1").unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_set_text_scalars() {
        let mut props = SimlifeProperties::default();
        props.set_text("async.core-pool-size", " 12 ").unwrap();
        props.set_text("cache.memcached.enabled", "on").unwrap();
        props.set_text("http.version", "V_2_0").unwrap();
        assert_eq!(props.async_pool.core_pool_size, 12);
        assert!(props.cache.memcached.enabled);
        assert_eq!(props.http.version, HttpVersion::V2_0);

        assert!(props
            .set_text("async.corePoolSize", "many")
            .unwrap_err()
            .is_type_mismatch());
    }

    #[test]
    fn test_set_text_list() {
        let mut props = SimlifeProperties::default();
        props.set_text("swagger.protocols", "http, https,").unwrap();
        assert_eq!(props.swagger.protocols, vec!["http", "https"]);
    }

    #[test]
    fn test_set_text_map_entry() {
        let mut props = SimlifeProperties::default();
        props
            .set_text("gateway.authorizedMicroservicesEndpoints.svc1", "/a,/b")
            .unwrap();
        props
            .set_text("gateway.authorized-microservices-endpoints.Svc2", "/c")
            .unwrap();

        let endpoints = &props.gateway.authorized_microservices_endpoints;
        assert_eq!(endpoints["svc1"], vec!["/a", "/b"]);
        assert_eq!(endpoints["Svc2"], vec!["/c"]);
    }

    #[test]
    fn test_set_text_map_without_entry_is_mismatch() {
        let mut props = SimlifeProperties::default();
        let err = props
            .set_text("gateway.authorizedMicroservicesEndpoints", "/a")
            .unwrap_err();
        assert!(err.is_type_mismatch());
    }

    #[test]
    fn test_set_json_coercions() {
        let mut props = SimlifeProperties::default();
        props.set_json("metrics.graphite.port", &serde_json::json!("2004")).unwrap();
        props.set_json("swagger.version", &serde_json::json!(1.5)).unwrap();
        props
            .set_json("cors.allowedMethods", &serde_json::json!(["GET", "POST"]))
            .unwrap();
        assert_eq!(props.metrics.graphite.port, 2004);
        assert_eq!(props.swagger.version, "1.5");
        assert_eq!(props.cors.allowed_methods, vec!["GET", "POST"]);

        let err = props
            .set_json("metrics.graphite.port", &serde_json::json!(true))
            .unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(err.to_string().contains("bool `true`"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FieldKind::Enum(HttpVersion::VARIANTS).to_string(), "enum{V_1_1,V_2_0}");
        assert_eq!(FieldKind::StringList.to_string(), "string[]");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }
}
