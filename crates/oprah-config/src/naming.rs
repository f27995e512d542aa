//! Naming convention used to pair decorators with the types they present.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_suffixes() -> Vec<String> {
    vec!["Presenter".to_string(), "Decorator".to_string()]
}

/// A decorator named `UserPresenter` presents `User` when `Presenter` is one
/// of the configured suffixes. Suffixes are tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamingConfig {
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
        }
    }
}

impl NamingConfig {
    /// Strip the first matching suffix from `decorator_name`.
    ///
    /// Returns `None` when no suffix matches or nothing would remain of the
    /// base name (`Presenter` alone is not a decorator for anything).
    #[must_use]
    pub fn base_name<'a>(&self, decorator_name: &'a str) -> Option<&'a str> {
        self.suffixes.iter().find_map(|suffix| {
            decorator_name
                .strip_suffix(suffix.as_str())
                .filter(|base| !base.is_empty() && !base.ends_with("::"))
        })
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the suffix list is empty or
    /// contains an empty suffix.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suffixes.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "naming.suffixes".to_string(),
                reason: "at least one suffix is required".to_string(),
            });
        }
        if self.suffixes.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                field: "naming.suffixes".to_string(),
                reason: "suffixes must not be empty strings".to_string(),
            });
        }
        Ok(())
    }
}
