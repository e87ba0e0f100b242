//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading settings from
//! multiple sources: defaults, documents, flat key/value maps, environment
//! variables and optional build metadata files.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde_json::Value as Json;

use crate::environment::{read_optional_properties, BUILD_INFO_PROPERTIES, GIT_PROPERTIES};
use crate::tree::FieldSpec;
use crate::{ConfigError, Environment, SimlifeProperties};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Documents (TOML, JSON or YAML)
/// 3. Flat key/value maps
/// 4. Environment variables
///
/// Every key is resolved against the declared fields: an undeclared key
/// fails with `ConfigError::UnknownPath`, a value of the wrong type with
/// `ConfigError::TypeMismatch`.
///
/// # Example
///
/// ```no_run
/// use simlife_config::ConfigLoader;
///
/// # fn main() -> Result<(), simlife_config::ConfigError> {
/// let props = ConfigLoader::new()
///     .with_root_key("simlife")
///     .with_file("config/application.yml")?
///     .with_env_prefix("SIMLIFE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: SimlifeProperties,
    env_prefix: Option<String>,
    root_key: Option<String>,
    profiles: Vec<String>,
    metadata: BTreeMap<String, String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader starting from defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use simlife_config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SimlifeProperties::default(),
            env_prefix: None,
            root_key: None,
            profiles: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Reset every setting to its default value.
    ///
    /// This is the state `new()` starts from, but can be chained for clarity.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = SimlifeProperties::default();
        self
    }

    /// Only read documents below this top-level key.
    ///
    /// Application files usually hold the settings under a `simlife:` key
    /// next to unrelated sections. With a root key set, those other
    /// sections are skipped instead of rejected.
    #[must_use]
    pub fn with_root_key(mut self, key: &str) -> Self {
        self.root_key = Some(key.to_string());
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is chosen by extension: `.toml`, `.json`, `.yml` or `.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file does not parse
    /// - The file contains undeclared keys or mistyped values
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| {
                ConfigError::validation_error(format!(
                    "unsupported configuration file format: {}",
                    path.display()
                ))
            })?;

        tracing::debug!(path = %path.display(), "Loading configuration file");
        self.with_string(&content, &extension)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be applied.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string.
    ///
    /// # Arguments
    ///
    /// * `content` - Document text
    /// * `format` - `"toml"`, `"json"`, `"yml"` or `"yaml"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails or a key cannot be applied.
    ///
    /// # Example
    ///
    /// ```
    /// use simlife_config::ConfigLoader;
    ///
    /// let yaml = r#"
    /// cache:
    ///   hazelcast:
    ///     backup-count: 2
    /// "#;
    ///
    /// let props = ConfigLoader::new()
    ///     .with_string(yaml, "yaml")
    ///     .unwrap()
    ///     .load_unvalidated();
    ///
    /// assert_eq!(props.cache.hazelcast.backup_count, 2);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        let document: Json = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            "yml" | "yaml" => serde_yaml::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };

        self.apply_document(&document)?;
        Ok(self)
    }

    /// Apply flat `path = value` overrides.
    ///
    /// Values are text and are coerced to each field's declared kind.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownPath` or `ConfigError::TypeMismatch` for
    /// the first entry that cannot be applied.
    ///
    /// # Example
    ///
    /// ```
    /// use simlife_config::ConfigLoader;
    ///
    /// let props = ConfigLoader::new()
    ///     .with_properties([("async.corePoolSize", "3"), ("swagger.protocols", "http,https")])
    ///     .unwrap()
    ///     .load_unvalidated();
    ///
    /// assert_eq!(props.async_pool.core_pool_size, 3);
    /// assert_eq!(props.swagger.protocols, vec!["http", "https"]);
    /// ```
    pub fn with_properties<I, K, V>(mut self, entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in entries {
            let key = key.as_ref();
            self.config.set_text(key, value.as_ref())?;
            tracing::debug!(path = %key, "Applied configuration override");
        }
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// Environment variables use the format `PREFIX__GROUP__FIELD`.
    /// For example, with prefix "SIMLIFE":
    /// - `SIMLIFE__ASYNC__CORE_POOL_SIZE=8`
    /// - `SIMLIFE__CACHE__HAZELCAST__BACKUP_COUNT=2`
    ///
    /// Active profiles are read from `PREFIX_PROFILES_ACTIVE` (comma list)
    /// unless set with [`with_profiles`](Self::with_profiles).
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file for environment variables.
    ///
    /// Uses the `dotenvy` crate; a missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        self.dotenv_result(dotenvy::dotenv().map(|_| ()))
    }

    /// Load a specific `.env` file for environment variables.
    ///
    /// Variables already present in the process environment are kept; a
    /// missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be parsed.
    pub fn with_dotenv_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        self.dotenv_result(dotenvy::from_path(path.as_ref()))
    }

    fn dotenv_result(self, result: Result<(), dotenvy::Error>) -> Result<Self, ConfigError> {
        match result {
            Ok(()) => Ok(self),
            Err(e) if e.not_found() => {
                tracing::debug!(".env file not found, skipping");
                Ok(self)
            }
            Err(e) => Err(ConfigError::validation_error(format!(
                "failed to load .env file: {e}"
            ))),
        }
    }

    /// Set the active profiles.
    #[must_use]
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    /// Merge a `.properties` metadata file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file exists but cannot be read.
    pub fn with_metadata_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        if let Some(entries) = read_optional_properties(path.as_ref())? {
            self.metadata.extend(entries);
        }
        Ok(self)
    }

    /// Merge `git.properties` and `META-INF/build-info.properties` found
    /// under `dir`. Either may be absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if a present file cannot be read.
    pub fn with_build_metadata<P: AsRef<Path>>(self, dir: P) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        self.with_metadata_file(dir.join(GIT_PROPERTIES))?
            .with_metadata_file(dir.join(BUILD_INFO_PROPERTIES))
    }

    /// Finalize and return the loaded settings.
    ///
    /// Applies environment variable overrides (if a prefix was set) and
    /// validates required fields.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - An environment variable cannot be applied
    /// - A required field is empty
    pub fn load(self) -> Result<SimlifeProperties, ConfigError> {
        Ok(self.load_environment()?.properties)
    }

    /// Like [`load`](Self::load), also returning profiles and metadata.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_environment(self) -> Result<Environment, ConfigError> {
        let environment = self.finish()?;
        environment.properties.validate()?;
        Ok(environment)
    }

    /// Finalize without validation.
    ///
    /// Environment variables are not read here since applying them can fail.
    ///
    /// # Example
    ///
    /// ```
    /// use simlife_config::ConfigLoader;
    ///
    /// let props = ConfigLoader::new().load_unvalidated();
    ///
    /// // The remember-me key has no default
    /// assert!(props.validate().is_err());
    /// ```
    #[must_use]
    pub fn load_unvalidated(self) -> SimlifeProperties {
        self.config
    }

    fn finish(mut self) -> Result<Environment, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;

            if self.profiles.is_empty() {
                if let Ok(value) = env::var(format!("{prefix}_PROFILES_ACTIVE")) {
                    self.profiles = value
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect();
                }
            }
        }

        tracing::debug!(profiles = ?self.profiles, "Configuration loaded");

        Ok(Environment {
            properties: self.config,
            active_profiles: self.profiles,
            metadata: self.metadata,
        })
    }

    // Walk a parsed document and apply every leaf
    fn apply_document(&mut self, document: &Json) -> Result<(), ConfigError> {
        let root = match (&self.root_key, document) {
            (_, Json::Null) => return Ok(()),
            (Some(key), Json::Object(entries)) => match entries.get(key) {
                Some(subtree) => subtree,
                None => return Ok(()),
            },
            (None, document) => document,
            (Some(_), _) => {
                return Err(ConfigError::validation_error(
                    "configuration document root must be a table",
                ))
            }
        };

        match root {
            Json::Object(entries) => {
                for (key, node) in entries {
                    self.apply_node(key, node)?;
                }
                Ok(())
            }
            Json::Null => Ok(()),
            _ => Err(ConfigError::validation_error(
                "configuration document root must be a table",
            )),
        }
    }

    fn apply_node(&mut self, path: &str, node: &Json) -> Result<(), ConfigError> {
        if FieldSpec::resolve(path).is_some() {
            if node.is_null() {
                tracing::debug!(path = %path, "Empty value, keeping current setting");
                return Ok(());
            }
            self.config.set_json(path, node)?;
            tracing::debug!(path = %path, "Applied configuration override");
            return Ok(());
        }

        match node {
            Json::Object(entries) if !SimlifeProperties::is_map_field(path) => {
                for (key, child) in entries {
                    self.apply_node(&format!("{path}.{key}"), child)?;
                }
                Ok(())
            }
            _ => Err(ConfigError::unknown_path(path)),
        }
    }

    // Apply environment variable overrides
    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        let marker = format!("{prefix}__");
        let env_vars: BTreeMap<String, String> =
            env::vars().filter(|(k, _)| k.starts_with(&marker)).collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    // Apply a single environment variable
    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        // Remove prefix and split by double underscore
        let key_without_prefix = key
            .strip_prefix(prefix)
            .and_then(|k| k.strip_prefix("__"))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::env_parse_error(key, "invalid key format"))?;

        let path = key_without_prefix.split("__").collect::<Vec<_>>().join(".");
        self.config.set_text(&path, value)?;
        tracing::debug!(var = %key, path = %path, "Applied environment override");
        Ok(())
    }
}
