//! # oprah-config
//!
//! Layered configuration loading for Oprah using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OPRAH_*` prefix, `__` as separator)
//! 2. Project-level `.oprah/config.toml`
//! 3. User-level `~/.config/oprah/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OPRAH_DEBUG` -> `debug`, `OPRAH_GENERAL__LOG_FILTER` ->
//! `general.log_filter`, `OPRAH_NAMING__SUFFIXES` -> `naming.suffixes`.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use oprah_config::OprahConfig;
//!
//! let config = OprahConfig::load().expect("config");
//!
//! if config.debug {
//!     println!("decorator suffixes: {:?}", config.naming.suffixes);
//! }
//! ```

mod error;
mod general;
mod naming;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use naming::NamingConfig;

use std::fmt;
use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize, de};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OprahConfig {
    /// Verbose cache diagnostics. Set through `OPRAH_DEBUG`; any value other
    /// than an empty string, `0`, `false`, `no` or `off` turns it on.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub debug: bool,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub naming: NamingConfig,
}

impl OprahConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when the merged values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".oprah/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("OPRAH_").split("__"))
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unusable naming convention.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("oprah").join("config.toml"))
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl de::Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, integer, or string flag")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            let value = value.trim().to_ascii_lowercase();
            Ok(!matches!(value.as_str(), "" | "0" | "false" | "no" | "off"))
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
