//! Mapping from base type names to the decorators that present them.
//!
//! Decorators are registered explicitly at startup. The base name is derived
//! from the decorator's own name by the configured suffix convention
//! (`UserPresenter` presents `User`), or given directly with
//! [`DecoratorRegistry::register_for`] when the decorator is named otherwise.
//!
//! ```ignore
//! let mut registry = DecoratorRegistry::new();
//! registry
//!     .register::<EntityPresenter>()?
//!     .register::<UserPresenter>()?
//!     .register_for::<AuditTrail>("Blog::Auditable")?;
//! ```

use std::collections::HashMap;
use std::fmt;

use oprah_config::{NamingConfig, OprahConfig};
use oprah_core::TypeDescriptor;

use crate::decorator::{Decorator, DecoratorType, presenter_type};
use crate::error::RegistryError;

#[derive(Clone, Default)]
pub struct DecoratorRegistry {
    naming: NamingConfig,
    decorators: HashMap<String, DecoratorType>,
}

impl DecoratorRegistry {
    /// Empty registry using the default `Presenter`/`Decorator` suffixes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_naming(naming: NamingConfig) -> Self {
        Self {
            naming,
            decorators: HashMap::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &OprahConfig) -> Self {
        Self::with_naming(config.naming.clone())
    }

    /// Register `D` for the base type its name implies.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnconventionalName`] if no suffix matches.
    /// - [`RegistryError::NotADecorator`] if `D` does not extend
    ///   `Oprah::Presenter`.
    /// - [`RegistryError::Conflict`] if the base is already taken by another
    ///   decorator.
    pub fn register<D: Decorator>(&mut self) -> Result<&mut Self, RegistryError> {
        let decorator = DecoratorType::of::<D>();
        let base = self
            .naming
            .base_name(decorator.name())
            .ok_or_else(|| RegistryError::UnconventionalName {
                decorator: decorator.name().to_string(),
                suffixes: self.naming.suffixes.clone(),
            })?;
        self.insert(base, decorator)
    }

    /// Register `D` for `base` regardless of naming.
    ///
    /// # Errors
    ///
    /// Same as [`Self::register`], minus the naming check.
    pub fn register_for<D: Decorator>(&mut self, base: &str) -> Result<&mut Self, RegistryError> {
        self.insert(base, DecoratorType::of::<D>())
    }

    fn insert(&mut self, base: &str, decorator: DecoratorType) -> Result<&mut Self, RegistryError> {
        if !decorator.descriptor().is_subtype_of(presenter_type().name()) {
            return Err(RegistryError::NotADecorator {
                decorator: decorator.name().to_string(),
            });
        }
        decorator.descriptor().validate()?;

        match self.decorators.get(base) {
            Some(existing) if *existing == decorator => {}
            Some(existing) => {
                return Err(RegistryError::Conflict {
                    base: base.to_string(),
                    existing: existing.name().to_string(),
                    decorator: decorator.name().to_string(),
                });
            }
            None => {
                tracing::debug!(base, decorator = decorator.name(), "registered decorator");
                self.decorators.insert(base.to_string(), decorator);
            }
        }
        Ok(self)
    }

    /// Decorator registered for exactly `base`.
    #[must_use]
    pub fn get(&self, base: &str) -> Option<DecoratorType> {
        self.decorators.get(base).copied()
    }

    #[must_use]
    pub fn contains(&self, base: &str) -> bool {
        self.decorators.contains_key(base)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    /// Registered base names, sorted.
    #[must_use]
    pub fn bases(&self) -> Vec<&str> {
        let mut bases: Vec<&str> = self.decorators.keys().map(String::as_str).collect();
        bases.sort_unstable();
        bases
    }

    #[must_use]
    pub const fn naming(&self) -> &NamingConfig {
        &self.naming
    }

    /// Decorators applying to `descriptor`, most general first.
    ///
    /// Ancestors without a decorator are skipped.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Core`] if the descriptor's ancestor chain holds a
    /// malformed type name.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Result<Vec<DecoratorType>, RegistryError> {
        descriptor.validate()?;
        let mut stack: Vec<DecoratorType> = descriptor
            .ancestors()
            .iter()
            .filter_map(|ancestor| self.get(ancestor))
            .collect();
        stack.reverse();
        Ok(stack)
    }
}

impl fmt::Debug for DecoratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorRegistry")
            .field("suffixes", &self.naming.suffixes)
            .field("bases", &self.bases())
            .finish()
    }
}
