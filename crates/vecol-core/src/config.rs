//! Configuration for function dispatch and row output.
//!
//! Settings are layered with `figment`, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. A TOML file (optional)
//! 3. Environment variables prefixed with `VECOL_`, `__` separating sections
//!    (e.g. `VECOL_DISPATCH__MAX_TARGET=avx2`)
//!
//! ```toml
//! [dispatch]
//! max_target = "avx2"
//!
//! [format.json]
//! escape_forward_slashes = false
//! quote_64bit_integers = true
//! quote_denormals = false
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::target::TargetArch;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "VECOL_";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Figment failed to read or extract a layer.
    #[error("Failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    /// A value could not be interpreted.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Dotted key of the offending value.
        key: String,
        /// Why it was rejected.
        message: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Runtime dispatch of multi-target functions.
    pub dispatch: DispatchSettings,
    /// Textual output formats.
    pub format: FormatSettings,
}

/// Runtime dispatch settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchSettings {
    /// Highest tier an adaptor may select; `None` lets the CPU decide.
    pub max_target: Option<TargetArch>,
}

/// Output format settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// JSON family settings.
    pub json: JsonFormatSettings,
}

/// JSON value rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonFormatSettings {
    /// Write `/` as `\/`.
    pub escape_forward_slashes: bool,
    /// Write 64-bit integers as JSON strings.
    pub quote_64bit_integers: bool,
    /// Write non-finite floats as quoted strings instead of `null`.
    pub quote_denormals: bool,
}

impl Default for JsonFormatSettings {
    fn default() -> Self {
        Self {
            escape_forward_slashes: true,
            quote_64bit_integers: true,
            quote_denormals: false,
        }
    }
}

impl Settings {
    fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads settings from defaults, an optional TOML file and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let settings: Self = Self::figment(file).extract()?;
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Parses settings from a TOML string layered over the defaults.
    ///
    /// Environment variables are not consulted.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml))
            .extract()?)
    }
}
