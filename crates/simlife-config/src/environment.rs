//! Loaded settings plus the process-level context around them.
//!
//! Besides the settings tree, startup needs the active profiles and the
//! build metadata found in `git.properties` and
//! `META-INF/build-info.properties`. Both files are optional.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::{ConfigError, SimlifeProperties};

/// Git metadata file, relative to the metadata directory.
pub const GIT_PROPERTIES: &str = "git.properties";

/// Build metadata file, relative to the metadata directory.
pub const BUILD_INFO_PROPERTIES: &str = "META-INF/build-info.properties";

/// Loaded settings, active profiles and build metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// The populated settings tree.
    pub properties: SimlifeProperties,

    /// Active profiles, in activation order.
    pub active_profiles: Vec<String>,

    /// Keys merged from the metadata files (`git.*`, `build.*`).
    pub metadata: BTreeMap<String, String>,
}

impl Environment {
    /// Returns true if `profile` is active.
    #[must_use]
    pub fn is_profile_active(&self, profile: &str) -> bool {
        self.active_profiles.iter().any(|p| p == profile)
    }

    /// Returns metadata entries under `prefix.`, with the prefix stripped.
    ///
    /// ```
    /// use simlife_config::Environment;
    ///
    /// let mut env = Environment::default();
    /// env.metadata.insert("git.branch".into(), "main".into());
    /// env.metadata.insert("build.version".into(), "1.2.0".into());
    ///
    /// let git = env.metadata_section("git");
    /// assert_eq!(git.len(), 1);
    /// assert_eq!(git["branch"], "main");
    /// ```
    #[must_use]
    pub fn metadata_section(&self, prefix: &str) -> BTreeMap<String, String> {
        let prefix = format!("{prefix}.");
        self.metadata
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Reads a Java-style `.properties` file if it exists.
///
/// Returns `Ok(None)` when the file is absent.
pub(crate) fn read_optional_properties(
    path: &Path,
) -> Result<Option<BTreeMap<String, String>>, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Metadata file not found, skipping");
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;
    Ok(Some(parse_properties(&content)))
}

/// Parses `.properties` text: `key=value` or `key: value` lines, `#`/`!`
/// comments, trailing-backslash continuations and the usual escapes.
pub(crate) fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut entries = BTreeMap::new();
    let mut logical = String::new();

    for raw in content.lines() {
        let line = raw.trim_start();
        if logical.is_empty() && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        if let Some(body) = continued(line) {
            logical.push_str(body);
            continue;
        }
        logical.push_str(line);

        if let Some((key, value)) = split_entry(&logical) {
            entries.insert(unescape(key), unescape(value));
        }
        logical.clear();
    }

    if let Some((key, value)) = split_entry(&logical) {
        entries.insert(unescape(key), unescape(value));
    }

    entries
}

// A line continues when it ends with an odd number of backslashes.
fn continued(line: &str) -> Option<&str> {
    let trailing = line.chars().rev().take_while(|c| *c == '\\').count();
    (trailing % 2 == 1).then(|| &line[..line.len() - 1])
}

fn split_entry(line: &str) -> Option<(&str, &str)> {
    if line.trim().is_empty() {
        return None;
    }

    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '=' | ':' if !escaped => {
                return Some((line[..idx].trim_end(), line[idx + 1..].trim_start()));
            }
            _ => escaped = false,
        }
    }
    Some((line.trim_end(), ""))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}
