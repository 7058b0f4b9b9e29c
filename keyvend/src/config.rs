//! Configuration management

use config::builder::{ConfigBuilder, DefaultState};
use keyvend_keys::{KeySlots, DEFAULT_COUNT, DEFAULT_PREFIX};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Which variables are scanned for keys
#[derive(Debug, Deserialize)]
pub struct KeysConfig {
    /// Prefix of numbered slots
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Number of numbered slots, starting at 1
    #[serde(default = "default_count")]
    pub count: usize,

    /// Explicit variable names; overrides `prefix`/`count` when non-empty
    #[serde(default)]
    pub names: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            count: default_count(),
            names: Vec::new(),
        }
    }
}

impl KeysConfig {
    /// Named slots when any non-empty name is set, numbered slots otherwise
    pub fn slots(&self) -> KeySlots {
        let names: Vec<&String> = self.names.iter().filter(|n| !n.is_empty()).collect();

        if names.is_empty() {
            KeySlots::numbered(&self.prefix, self.count)
        } else {
            KeySlots::named(names.into_iter().cloned())
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// `keyvend.toml` in the working directory is read when present; an
    /// explicit `path` must exist. `KEYVEND_`-prefixed variables override
    /// file values, e.g. `KEYVEND_SERVER__PORT=8080` or
    /// `KEYVEND_KEYS__NAMES=PRIMARY,BACKUP`.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name("keyvend").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        Self::build(builder, None)
    }

    /// Layer `KEYVEND_` variables over `builder`. `env` replaces the process
    /// environment when given.
    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("KEYVEND")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("keys.names")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        Ok(config.try_deserialize::<Config>()?)
    }

    /// Apply command-line values; each one given wins over file and
    /// `KEYVEND_*` config values
    pub fn apply_overrides(
        &mut self,
        port: Option<u16>,
        host: Option<String>,
        key_prefix: Option<String>,
        key_count: Option<usize>,
    ) {
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(prefix) = key_prefix {
            self.keys.prefix = prefix;
        }
        if let Some(count) = key_count {
            self.keys.count = count;
        }
    }
}
