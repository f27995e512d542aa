//! Presenter composition: resolve a value's decorator stack and fold it onto
//! the value.

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use oprah_core::TypeDescriptor;
use parking_lot::RwLock;

use crate::cache::{PresenterCache, Resolution};
use crate::decorator::{Decorator, DecoratorType, Layer};
use crate::error::{PresentError, RegistryError};
use crate::presented::Presented;
use crate::registry::DecoratorRegistry;
use crate::view_context::{ViewContext, ViewContextFactory, blank_view_factory};

/// Per-call presentation options.
#[derive(Debug, Clone, Default)]
pub struct PresentOptions {
    view_context: Option<ViewContext>,
    only: Option<Vec<TypeId>>,
}

impl PresentOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign this view context to every layer built by the call.
    #[must_use]
    pub fn view_context(mut self, view_context: ViewContext) -> Self {
        self.view_context = Some(view_context);
        self
    }

    /// Restrict the stack to `D` (and any other `only` entries). Decorators
    /// that would not have matched anyway are ignored.
    #[must_use]
    pub fn only<D: Decorator>(self) -> Self {
        self.only_type(DecoratorType::of::<D>())
    }

    #[must_use]
    pub fn only_type(mut self, decorator: DecoratorType) -> Self {
        self.only
            .get_or_insert_with(Vec::new)
            .push(decorator.type_id());
        self
    }

    pub(crate) fn or_view_context(mut self, fallback: &ViewContext) -> Self {
        if self.view_context.is_none() {
            self.view_context = Some(fallback.clone());
        }
        self
    }

    fn permits(&self, decorator: &DecoratorType) -> bool {
        self.only
            .as_ref()
            .is_none_or(|only| only.contains(&decorator.type_id()))
    }
}

struct ComposerInner {
    registry: RwLock<Arc<DecoratorRegistry>>,
    cache: PresenterCache,
    default_view_context: ViewContextFactory,
}

/// Entry point for presenting values. Cheap to clone; clones share the
/// registry and the resolution cache.
#[derive(Clone)]
pub struct Composer {
    inner: Arc<ComposerInner>,
}

/// Builder for [`Composer`].
#[must_use]
pub struct ComposerBuilder {
    registry: DecoratorRegistry,
    default_view_context: ViewContextFactory,
}

impl ComposerBuilder {
    /// Factory invoked for every `present` call that supplies no view context.
    pub fn default_view_context<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> ViewContext + Send + Sync + 'static,
    {
        self.default_view_context = Arc::new(factory);
        self
    }

    #[must_use]
    pub fn build(self) -> Composer {
        Composer {
            inner: Arc::new(ComposerInner {
                registry: RwLock::new(Arc::new(self.registry)),
                cache: PresenterCache::new(),
                default_view_context: self.default_view_context,
            }),
        }
    }
}

impl Composer {
    #[must_use]
    pub fn new(registry: DecoratorRegistry) -> Self {
        Self::builder(registry).build()
    }

    pub fn builder(registry: DecoratorRegistry) -> ComposerBuilder {
        ComposerBuilder {
            registry,
            default_view_context: blank_view_factory(),
        }
    }

    /// Present a value with every matching decorator and a default view
    /// context.
    ///
    /// Returns the value itself, undecorated, when nothing matches.
    ///
    /// # Errors
    ///
    /// [`PresentError::Registry`] if the value's type metadata is malformed.
    pub fn present(&self, object: impl Into<Presented>) -> Result<Presented, PresentError> {
        self.present_with(object, &PresentOptions::default())
    }

    /// # Errors
    ///
    /// [`PresentError::Registry`] if the value's type metadata is malformed.
    pub fn present_with(
        &self,
        object: impl Into<Presented>,
        options: &PresentOptions,
    ) -> Result<Presented, PresentError> {
        let object = object.into();
        let stack = self.resolve(&object)?;

        let mut applicable = stack.iter().filter(|decorator| options.permits(decorator));
        let Some(first) = applicable.next() else {
            return Ok(object);
        };

        let view_context = self.view_context_for(options);
        let presented = std::iter::once(first)
            .chain(applicable)
            .fold(object, |memo, decorator| {
                let layer = Layer::new(*decorator, memo, view_context.clone(), self.clone());
                Presented::Decorated(decorator.instantiate(layer))
            });
        tracing::trace!(
            original = presented.original().descriptor().name(),
            layers = ?presented.decorator_names(),
            "presented object"
        );
        Ok(presented)
    }

    /// Present each value in order.
    ///
    /// # Errors
    ///
    /// Stops at the first value whose resolution fails.
    pub fn present_many<I>(&self, objects: I) -> Result<Vec<Presented>, PresentError>
    where
        I: IntoIterator,
        I::Item: Into<Presented>,
    {
        self.present_many_with(objects, &PresentOptions::default())
    }

    /// # Errors
    ///
    /// Stops at the first value whose resolution fails.
    pub fn present_many_with<I>(
        &self,
        objects: I,
        options: &PresentOptions,
    ) -> Result<Vec<Presented>, PresentError>
    where
        I: IntoIterator,
        I::Item: Into<Presented>,
    {
        objects
            .into_iter()
            .map(|object| self.present_with(object, options))
            .collect()
    }

    /// Wrap `object` in a single decorator `D`, bypassing resolution, with a
    /// default view context.
    ///
    /// The decorator need not be registered, and nothing is cached.
    #[must_use]
    pub fn wrap<D: Decorator>(&self, object: impl Into<Presented>) -> D {
        self.wrap_with(object, &PresentOptions::default())
    }

    /// Like [`Self::wrap`], taking the view context from `options`. The
    /// `only` filter does not apply.
    #[must_use]
    pub fn wrap_with<D: Decorator>(
        &self,
        object: impl Into<Presented>,
        options: &PresentOptions,
    ) -> D {
        let layer = Layer::new(
            DecoratorType::of::<D>(),
            object.into(),
            self.view_context_for(options),
            self.clone(),
        );
        D::new(layer)
    }

    /// Decorator stack for a value, general to specific.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Core`] for malformed type metadata.
    pub fn resolve(&self, object: &Presented) -> Result<Resolution, RegistryError> {
        self.resolve_type(object.resolution_descriptor())
    }

    /// Decorator stack for a type, general to specific. Cached by type name.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Core`] for malformed type metadata.
    pub fn resolve_type(&self, descriptor: &TypeDescriptor) -> Result<Resolution, RegistryError> {
        self.inner.cache.lookup(descriptor.name(), || {
            let stack = self.registry().resolve(descriptor)?;
            tracing::debug!(
                type_name = descriptor.name(),
                decorators = ?stack,
                "resolved decorator stack"
            );
            Ok(Resolution::from(stack))
        })
    }

    fn view_context_for(&self, options: &PresentOptions) -> ViewContext {
        options
            .view_context
            .clone()
            .unwrap_or_else(|| (self.inner.default_view_context)())
    }

    #[must_use]
    pub fn cache(&self) -> &PresenterCache {
        &self.inner.cache
    }

    /// Snapshot of the current registry.
    #[must_use]
    pub fn registry(&self) -> Arc<DecoratorRegistry> {
        Arc::clone(&self.inner.registry.read())
    }

    /// Drop every cached resolution. Call after application code reloads.
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Swap in a rebuilt registry and invalidate the cache.
    pub fn reload(&self, registry: DecoratorRegistry) {
        *self.inner.registry.write() = Arc::new(registry);
        tracing::debug!("decorator registry reloaded");
        self.inner.cache.clear();
    }
}

impl fmt::Debug for Composer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("registry", &self.registry())
            .field("cache", &self.inner.cache)
            .finish_non_exhaustive()
    }
}
