//! Decorator types and the per-layer state they wrap.
//!
//! A decorator is an ordinary Rust type that holds a [`Layer`] and adds
//! presentation-only behavior on top of the value inside it:
//!
//! ```ignore
//! static USER_PRESENTER: LazyLock<TypeDescriptor> = LazyLock::new(|| {
//!     TypeDescriptor::class("UserPresenter")
//!         .extends(oprah::presenter_type())
//!         .build()
//! });
//!
//! struct UserPresenter {
//!     layer: Layer,
//! }
//!
//! impl UserPresenter {
//!     fn display_name(&self) -> Result<String, PresentError> {
//!         let user = self.layer.object_as::<User>()?;
//!         Ok(format!("{} {}", user.first_name, user.last_name))
//!     }
//! }
//!
//! impl Decorator for UserPresenter {
//!     fn descriptor() -> &'static TypeDescriptor { &USER_PRESENTER }
//!     fn new(layer: Layer) -> Self { Self { layer } }
//!     fn layer(&self) -> &Layer { &self.layer }
//! }
//! ```

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::{Arc, LazyLock};

use oprah_core::TypeDescriptor;
use serde_json::Value;

use crate::composer::{Composer, PresentOptions};
use crate::error::{PresentError, SendError};
use crate::presentable::{AsAny, Presentable};
use crate::presented::Presented;
use crate::view_context::ViewContext;

static PRESENTER: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Oprah::Presenter").build());

/// Base class every decorator descriptor must extend.
#[must_use]
pub fn presenter_type() -> &'static TypeDescriptor {
    &PRESENTER
}

/// A presenter type stacked on values whose ancestors it is registered for.
pub trait Decorator: AsAny + Send + Sync + 'static {
    /// Declared type of the decorator; must extend [`presenter_type`].
    fn descriptor() -> &'static TypeDescriptor
    where
        Self: Sized;

    /// Wrap one layer. Called by the composer, once per `present`.
    fn new(layer: Layer) -> Self
    where
        Self: Sized;

    fn layer(&self) -> &Layer;

    /// Public messages answered by this decorator itself.
    fn messages(&self) -> &[&'static str] {
        &[]
    }

    /// Answer `message`, or return `None` to forward it to the inner value.
    fn respond(&self, _message: &str) -> Option<Result<Value, SendError>> {
        None
    }
}

/// Registry handle for a decorator: its descriptor, Rust type, and
/// constructor.
#[derive(Clone, Copy)]
pub struct DecoratorType {
    descriptor: &'static TypeDescriptor,
    type_id: TypeId,
    build: fn(Layer) -> Arc<dyn Decorator>,
}

fn build<D: Decorator>(layer: Layer) -> Arc<dyn Decorator> {
    Arc::new(D::new(layer))
}

impl DecoratorType {
    #[must_use]
    pub fn of<D: Decorator>() -> Self {
        Self {
            descriptor: D::descriptor(),
            type_id: TypeId::of::<D>(),
            build: build::<D>,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.descriptor.name()
    }

    #[must_use]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[must_use]
    pub fn is<D: Decorator>(&self) -> bool {
        self.type_id == TypeId::of::<D>()
    }

    pub(crate) fn instantiate(&self, layer: Layer) -> Arc<dyn Decorator> {
        (self.build)(layer)
    }
}

impl PartialEq for DecoratorType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for DecoratorType {}

impl fmt::Debug for DecoratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DecoratorType").field(&self.name()).finish()
    }
}

/// State of one decorator layer: the wrapped value, the view context, and the
/// composer that built it. Fixed at construction.
#[derive(Clone)]
pub struct Layer {
    decorator: DecoratorType,
    inner: Presented,
    view_context: ViewContext,
    composer: Composer,
}

impl Layer {
    pub(crate) const fn new(
        decorator: DecoratorType,
        inner: Presented,
        view_context: ViewContext,
        composer: Composer,
    ) -> Self {
        Self {
            decorator,
            inner,
            view_context,
            composer,
        }
    }

    #[must_use]
    pub const fn decorator_type(&self) -> DecoratorType {
        self.decorator
    }

    /// The value this layer wraps, possibly another decorator.
    #[must_use]
    pub const fn inner(&self) -> &Presented {
        &self.inner
    }

    #[must_use]
    pub const fn view_context(&self) -> &ViewContext {
        &self.view_context
    }

    #[must_use]
    pub const fn composer(&self) -> &Composer {
        &self.composer
    }

    /// The undecorated value at the bottom of the stack.
    #[must_use]
    pub fn original(&self) -> &Arc<dyn Presentable> {
        self.inner.original()
    }

    #[must_use]
    pub fn object<T: Presentable>(&self) -> Option<&T> {
        self.inner.object::<T>()
    }

    /// Typed access to the original value.
    ///
    /// # Errors
    ///
    /// [`PresentError::UnexpectedObject`] if the original is not a `T`.
    pub fn object_as<T: Presentable>(&self) -> Result<&T, PresentError> {
        self.object::<T>()
            .ok_or_else(|| PresentError::UnexpectedObject {
                expected: type_name::<T>(),
                found: self.original().descriptor().name().to_string(),
            })
    }

    /// Present another value, reusing this layer's view context.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from the composer.
    pub fn present(&self, object: impl Into<Presented>) -> Result<Presented, PresentError> {
        self.present_with(object, &PresentOptions::default())
    }

    /// Like [`Self::present`]; a view context in `options` wins over this
    /// layer's.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from the composer.
    pub fn present_with(
        &self,
        object: impl Into<Presented>,
        options: &PresentOptions,
    ) -> Result<Presented, PresentError> {
        self.composer.present_with(object, &self.inherit(options))
    }

    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub fn present_many<I>(&self, objects: I) -> Result<Vec<Presented>, PresentError>
    where
        I: IntoIterator,
        I::Item: Into<Presented>,
    {
        self.present_many_with(objects, &PresentOptions::default())
    }

    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub fn present_many_with<I>(
        &self,
        objects: I,
        options: &PresentOptions,
    ) -> Result<Vec<Presented>, PresentError>
    where
        I: IntoIterator,
        I::Item: Into<Presented>,
    {
        self.composer.present_many_with(objects, &self.inherit(options))
    }

    /// Present a one-to-one association of the wrapped value.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures from the composer.
    pub fn present_one<T: Presentable>(&self, value: T) -> Result<Presented, PresentError> {
        self.present(Arc::new(value))
    }

    /// Present a one-to-many association of the wrapped value.
    ///
    /// # Errors
    ///
    /// Propagates the first resolution failure.
    pub fn present_all<T, I>(&self, values: I) -> Result<Vec<Presented>, PresentError>
    where
        T: Presentable,
        I: IntoIterator<Item = T>,
    {
        self.present_many(values.into_iter().map(Arc::new))
    }

    fn inherit(&self, options: &PresentOptions) -> PresentOptions {
        options.clone().or_view_context(&self.view_context)
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("decorator", &self.decorator.name())
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
