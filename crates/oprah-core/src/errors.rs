//! Cross-cutting error types for Oprah.
//!
//! Domain-specific errors (e.g., `RegistryError`, `ConfigError`) are defined in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Oprah crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A name on a type's ancestor chain is not a valid constant path.
    #[error("Malformed type name '{name}' in ancestors of {owner}: {reason}")]
    MalformedTypeName {
        owner: String,
        name: String,
        reason: String,
    },
}
