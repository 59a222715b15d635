//! Configuration for lanewise.
//!
//! Sources are merged in priority order (lowest to highest):
//! 1. Built-in defaults
//! 2. TOML configuration file (optional)
//! 3. `LANEWISE_*` environment variables, `__` separating nested keys
//!
//! ```toml
//! [dispatch]
//! disabled_targets = ["avx512"]
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::targets::{Target, TargetSet};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LANEWISE_";

/// Runtime dispatch configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Targets dispatch must never select, by name (`"avx512"`, `"sse4"`, ...).
    ///
    /// Accepts a list or a comma-separated string.
    #[serde(deserialize_with = "string_or_list")]
    pub disabled_targets: Vec<String>,
}

impl DispatchConfig {
    /// Reads `LANEWISE_DISABLED_TARGETS` only.
    pub fn from_env() -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).only(&["disabled_targets"]))
            .extract()
            .map_err(Error::from)
    }

    /// Validates the disable list.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownTarget`] for an unrecognized name,
    /// [`Error::ScalarNotDisableable`] if `scalar` is listed.
    pub fn disabled_set(&self) -> Result<TargetSet> {
        let mut set = TargetSet::EMPTY;
        for name in &self.disabled_targets {
            let target: Target = name.parse()?;
            if target == Target::Scalar {
                return Err(Error::ScalarNotDisableable);
            }
            set = set.with(target);
        }
        Ok(set)
    }
}

/// Logging configuration, consumed by binaries installing a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanewiseConfig {
    /// Dispatch settings.
    pub dispatch: DispatchConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl LanewiseConfig {
    /// Loads defaults, then `path` if given, then the environment.
    ///
    /// A `path` that does not exist is an error, not an empty layer.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Error::from)
    }

    /// Parses a TOML document over the defaults, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()
            .map_err(Error::from)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::One(names) => names
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect(),
        Raw::Many(names) => names,
    })
}
