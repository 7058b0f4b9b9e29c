//! Key sources and slot resolution

use std::collections::HashMap;
use std::ffi::OsString;

/// Default variable name prefix for key slots
pub const DEFAULT_PREFIX: &str = "API_KEY_";

/// Default number of numbered key slots
pub const DEFAULT_COUNT: usize = 3;

/// Read-only lookup of configuration values by name
pub trait KeySource: Send + Sync {
    /// Look up a value; `None` when absent
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Key source backed by the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl KeySource for EnvSource {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(decode_env_value)
    }
}

// Non-UTF-8 bytes become U+FFFD instead of hiding the whole value.
fn decode_env_value(value: OsString) -> String {
    value
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

/// In-memory key source
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeySource for MapSource {
    fn lookup(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

/// Ordered list of variable names scanned for keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySlots {
    names: Vec<String>,
}

impl KeySlots {
    /// Numbered slots `{prefix}1` through `{prefix}{count}`
    pub fn numbered(prefix: &str, count: usize) -> Self {
        Self {
            names: (1..=count).map(|i| format!("{prefix}{i}")).collect(),
        }
    }

    /// Explicitly named slots, scanned in the given order
    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for KeySlots {
    fn default() -> Self {
        Self::numbered(DEFAULT_PREFIX, DEFAULT_COUNT)
    }
}

/// Scan `slots` in order and keep every present, non-empty value
pub fn collect_keys(source: &dyn KeySource, slots: &KeySlots) -> Vec<String> {
    slots
        .names()
        .iter()
        .filter_map(|name| source.lookup(name))
        .filter(|value| !value.is_empty())
        .collect()
}
