//! Error types for presenter registration, resolution, and message sends.

use oprah_core::{CoreError, TypeDescriptor};
use thiserror::Error;

/// Errors raised while registering decorators or resolving a type's stack.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The decorator's name does not end in any configured suffix, so the
    /// type it presents cannot be derived. Use `register_for` instead.
    #[error("decorator '{decorator}' does not end in any of {suffixes:?}")]
    UnconventionalName {
        decorator: String,
        suffixes: Vec<String>,
    },

    /// Another decorator already presents this base type.
    #[error("'{base}' is already presented by '{existing}', refusing '{decorator}'")]
    Conflict {
        base: String,
        existing: String,
        decorator: String,
    },

    /// The decorator's descriptor does not derive from `Oprah::Presenter`.
    #[error("'{decorator}' does not derive from Oprah::Presenter")]
    NotADecorator { decorator: String },

    /// Type metadata could not be resolved.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Errors raised by [`Presented::send`](crate::Presented::send).
///
/// Errors always describe the innermost original value, so a message sent
/// through any number of decorator layers fails exactly as it would on the
/// bare object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendError {
    #[error("undefined method '{message}' for an instance of {class}")]
    NoMethod { class: String, message: String },

    #[error("private method '{message}' called for an instance of {class}")]
    PrivateMethod { class: String, message: String },
}

impl SendError {
    #[must_use]
    pub fn no_method(receiver: &TypeDescriptor, message: &str) -> Self {
        Self::NoMethod {
            class: receiver.name().to_string(),
            message: message.to_string(),
        }
    }

    #[must_use]
    pub fn private_method(receiver: &TypeDescriptor, message: &str) -> Self {
        Self::PrivateMethod {
            class: receiver.name().to_string(),
            message: message.to_string(),
        }
    }
}

/// Errors returned from presenting values.
#[derive(Debug, Error)]
pub enum PresentError {
    #[error("resolution failed: {0}")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Send(#[from] SendError),

    /// Typed access asked for a different original than the one presented.
    #[error("expected presented object of type {expected}, found {found}")]
    UnexpectedObject {
        expected: &'static str,
        found: String,
    },
}
