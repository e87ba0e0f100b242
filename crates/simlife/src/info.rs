//! Contributors to the application info document.
//!
//! Each [`InfoContributor`] adds details to an [`InfoBuilder`]; the result is
//! the JSON served by the info endpoint:
//!
//! ```json
//! {
//!   "activeProfiles": ["prod", "swagger"],
//!   "mailEnabled": false,
//!   "git": { "branch": "main", "commit": { "id": { "abbrev": "1a2b3c4" } } }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use simlife_config::SimlifeProperties;

/// Adds details to the info document.
pub trait InfoContributor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Adds this contributor's details.
    fn contribute(&self, builder: &mut InfoBuilder);
}

/// Accumulates info details.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoBuilder {
    details: Map<String, Value>,
}

impl InfoBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a top-level detail, replacing any previous value.
    pub fn with_detail(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// Returns the document built so far.
    #[must_use]
    pub fn build(self) -> Value {
        Value::Object(self.details)
    }
}

/// Which contributors are enabled (`management.info.<name>.enabled`).
///
/// Every contributor is enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoSettings {
    /// `management.info.active-profiles.enabled`
    pub active_profiles: bool,
    /// `management.info.mail-enabled.enabled`
    pub mail_enabled: bool,
    /// `management.info.build.enabled`
    pub build: bool,
    /// `management.info.git.enabled`
    pub git: bool,
}

impl Default for InfoSettings {
    fn default() -> Self {
        Self {
            active_profiles: true,
            mail_enabled: true,
            build: true,
            git: true,
        }
    }
}

impl InfoSettings {
    /// Enables or disables the active profiles contributor.
    #[must_use]
    pub fn with_active_profiles(mut self, enabled: bool) -> Self {
        self.active_profiles = enabled;
        self
    }

    /// Enables or disables the mail contributor.
    #[must_use]
    pub fn with_mail_enabled(mut self, enabled: bool) -> Self {
        self.mail_enabled = enabled;
        self
    }

    /// Enables or disables the build metadata contributor.
    #[must_use]
    pub fn with_build(mut self, enabled: bool) -> Self {
        self.build = enabled;
        self
    }

    /// Enables or disables the git metadata contributor.
    #[must_use]
    pub fn with_git(mut self, enabled: bool) -> Self {
        self.git = enabled;
        self
    }
}

/// Exposes the active profiles as `activeProfiles`.
#[derive(Debug, Clone)]
pub struct ActiveProfilesInfoContributor {
    profiles: Vec<String>,
}

impl ActiveProfilesInfoContributor {
    /// Detail key.
    pub const KEY: &'static str = "activeProfiles";

    /// Creates the contributor.
    #[must_use]
    pub fn new(profiles: Vec<String>) -> Self {
        Self { profiles }
    }
}

impl InfoContributor for ActiveProfilesInfoContributor {
    fn name(&self) -> &'static str {
        "active-profiles"
    }

    fn contribute(&self, builder: &mut InfoBuilder) {
        builder.with_detail(Self::KEY, self.profiles.clone());
    }
}

/// Exposes `mail.enabled` as `mailEnabled`.
#[derive(Debug, Clone)]
pub struct MailEnabledInfoContributor {
    properties: Arc<SimlifeProperties>,
}

impl MailEnabledInfoContributor {
    /// Detail key.
    pub const KEY: &'static str = "mailEnabled";

    /// Creates the contributor.
    #[must_use]
    pub fn new(properties: Arc<SimlifeProperties>) -> Self {
        Self { properties }
    }
}

impl InfoContributor for MailEnabledInfoContributor {
    fn name(&self) -> &'static str {
        "mail-enabled"
    }

    fn contribute(&self, builder: &mut InfoBuilder) {
        builder.with_detail(Self::KEY, self.properties.mail.enabled);
    }
}

/// Exposes one metadata section (`build` or `git`) as a nested object.
///
/// Dotted keys are expanded: `commit.id.abbrev` becomes
/// `{"commit": {"id": {"abbrev": ...}}}`.
#[derive(Debug, Clone)]
pub struct MetadataInfoContributor {
    section: &'static str,
    entries: BTreeMap<String, String>,
}

impl MetadataInfoContributor {
    /// Contributor for `build.*` entries.
    #[must_use]
    pub fn build(entries: BTreeMap<String, String>) -> Self {
        Self {
            section: "build",
            entries,
        }
    }

    /// Contributor for `git.*` entries.
    #[must_use]
    pub fn git(entries: BTreeMap<String, String>) -> Self {
        Self {
            section: "git",
            entries,
        }
    }
}

impl InfoContributor for MetadataInfoContributor {
    fn name(&self) -> &'static str {
        self.section
    }

    fn contribute(&self, builder: &mut InfoBuilder) {
        if self.entries.is_empty() {
            return;
        }

        let mut root = Map::new();
        for (key, value) in &self.entries {
            insert_dotted(&mut root, key, value);
        }
        builder.with_detail(self.section, Value::Object(root));
    }
}

// A key that is both a leaf and a prefix keeps the nested entries
fn insert_dotted(root: &mut Map<String, Value>, key: &str, value: &str) {
    let mut segments = key.split('.').peekable();
    let mut node = root;

    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            node.entry(segment.to_string())
                .or_insert_with(|| Value::String(value.to_string()));
            return;
        }

        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        match child {
            Value::Object(map) => node = map,
            _ => return,
        }
    }
}

/// Runs every contributor, in order, into a single document.
#[must_use]
pub fn collect_info(contributors: &[Box<dyn InfoContributor>]) -> Value {
    let mut builder = InfoBuilder::new();
    for contributor in contributors {
        contributor.contribute(&mut builder);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_active_profiles_contributor() {
        let contributor =
            ActiveProfilesInfoContributor::new(vec!["prod".to_string(), "swagger".to_string()]);
        let mut builder = InfoBuilder::new();
        contributor.contribute(&mut builder);
        assert_eq!(builder.build(), json!({"activeProfiles": ["prod", "swagger"]}));
    }

    #[test]
    fn test_mail_enabled_contributor() {
        let mut props = SimlifeProperties::default();
        props.mail.enabled = true;
        let contributor = MailEnabledInfoContributor::new(Arc::new(props));

        let mut builder = InfoBuilder::new();
        contributor.contribute(&mut builder);
        assert_eq!(builder.build(), json!({"mailEnabled": true}));
    }

    #[test]
    fn test_git_contributor_nests_keys() {
        let mut entries = BTreeMap::new();
        entries.insert("branch".to_string(), "main".to_string());
        entries.insert("commit.id.abbrev".to_string(), "1a2b3c4".to_string());
        entries.insert("commit.time".to_string(), "2018-03-01T10:15:00Z".to_string());

        let contributors: Vec<Box<dyn InfoContributor>> =
            vec![Box::new(MetadataInfoContributor::git(entries))];
        let info = collect_info(&contributors);
        assert_eq!(
            info,
            json!({
                "git": {
                    "branch": "main",
                    "commit": {"id": {"abbrev": "1a2b3c4"}, "time": "2018-03-01T10:15:00Z"}
                }
            })
        );
    }

    #[test]
    fn test_leaf_and_prefix_conflict_keeps_nested() {
        let mut root = Map::new();
        insert_dotted(&mut root, "commit", "abc");
        insert_dotted(&mut root, "commit.id", "1a2b3c4");
        assert_eq!(Value::Object(root), json!({"commit": {"id": "1a2b3c4"}}));

        let mut root = Map::new();
        insert_dotted(&mut root, "commit.id", "1a2b3c4");
        insert_dotted(&mut root, "commit", "abc");
        assert_eq!(Value::Object(root), json!({"commit": {"id": "1a2b3c4"}}));
    }

    #[test]
    fn test_empty_metadata_contributes_nothing() {
        let contributors: Vec<Box<dyn InfoContributor>> =
            vec![Box::new(MetadataInfoContributor::build(BTreeMap::new()))];
        let info = collect_info(&contributors);
        assert_eq!(info, json!({}));
    }

    #[test]
    fn test_info_settings_default_enabled() {
        let settings = InfoSettings::default();
        assert!(settings.active_profiles && settings.mail_enabled && settings.build && settings.git);
        assert!(!settings.with_mail_enabled(false).mail_enabled);
    }
}
