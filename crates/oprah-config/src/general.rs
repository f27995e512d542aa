//! General runtime configuration.

use serde::{Deserialize, Serialize};

/// Default tracing filter when `OPRAH_LOG` is unset and debug is off.
fn default_log_filter() -> String {
    "warn".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// `tracing_subscriber::EnvFilter` directive used by `init_tracing`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}
