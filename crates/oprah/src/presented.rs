//! The composed value produced by presenting an object.

use std::fmt;
use std::sync::Arc;

use oprah_core::TypeDescriptor;
use serde_json::Value;

use crate::decorator::{Decorator, DecoratorType};
use crate::error::SendError;
use crate::presentable::{ClassRef, Presentable};
use crate::view_context::ViewContext;

/// Either the original value (nothing matched) or the outermost decorator of
/// a stack.
///
/// Reflective queries look through every layer: a value presented as
/// `UserPresenter(EntityPresenter(user))` is a `UserPresenter`, an
/// `EntityPresenter`, and everything `user` is. Equality is decided on the
/// originals, so `present(user) == user` holds in both directions.
#[derive(Clone)]
pub enum Presented {
    Original(Arc<dyn Presentable>),
    Decorated(Arc<dyn Decorator>),
}

impl Presented {
    pub fn new<T: Presentable>(value: T) -> Self {
        Self::Original(Arc::new(value))
    }

    /// Whether at least one decorator was applied.
    #[must_use]
    pub const fn is_presented(&self) -> bool {
        matches!(self, Self::Decorated(_))
    }

    #[must_use]
    pub fn original(&self) -> &Arc<dyn Presentable> {
        match self {
            Self::Original(object) => object,
            Self::Decorated(decorator) => decorator.layer().original(),
        }
    }

    /// One layer down, or `None` for an original value.
    #[must_use]
    pub fn inner(&self) -> Option<&Self> {
        self.as_decorator().map(|decorator| decorator.layer().inner())
    }

    #[must_use]
    pub fn view_context(&self) -> Option<&ViewContext> {
        self.as_decorator()
            .map(|decorator| decorator.layer().view_context())
    }

    /// Outermost decorator type.
    #[must_use]
    pub fn decorator_type(&self) -> Option<DecoratorType> {
        self.as_decorator()
            .map(|decorator| decorator.layer().decorator_type())
    }

    /// Decorator layers, outermost first.
    pub fn layers(&self) -> impl Iterator<Item = &dyn Decorator> {
        std::iter::successors(self.as_decorator(), |decorator| {
            decorator.layer().inner().as_decorator()
        })
    }

    /// Decorator names, outermost first.
    #[must_use]
    pub fn decorator_names(&self) -> Vec<&'static str> {
        self.layers()
            .map(|decorator| decorator.layer().decorator_type().name())
            .collect()
    }

    /// The outermost layer of decorator type `D`.
    #[must_use]
    pub fn decorator<D: Decorator>(&self) -> Option<&D> {
        self.layers()
            .find_map(|decorator| decorator.as_any().downcast_ref::<D>())
    }

    /// The original value as a `T`.
    #[must_use]
    pub fn object<T: Presentable>(&self) -> Option<&T> {
        let original: &dyn Presentable = &**self.original();
        original.as_any().downcast_ref::<T>()
    }

    /// Runtime type of the outermost layer.
    #[must_use]
    pub fn descriptor(&self) -> &TypeDescriptor {
        match self {
            Self::Original(object) => object.descriptor(),
            Self::Decorated(decorator) => decorator.layer().decorator_type().descriptor(),
        }
    }

    /// Type membership through every layer.
    #[must_use]
    pub fn is_a(&self, type_name: &str) -> bool {
        match self {
            Self::Original(object) => object.descriptor().is_subtype_of(type_name),
            Self::Decorated(decorator) => {
                let layer = decorator.layer();
                layer.decorator_type().descriptor().is_subtype_of(type_name)
                    || layer.inner().is_a(type_name)
            }
        }
    }

    /// Exact type identity at any layer.
    #[must_use]
    pub fn instance_of(&self, type_name: &str) -> bool {
        match self {
            Self::Original(object) => object.descriptor().name() == type_name,
            Self::Decorated(decorator) => {
                let layer = decorator.layer();
                layer.decorator_type().name() == type_name || layer.inner().instance_of(type_name)
            }
        }
    }

    #[must_use]
    pub fn responds_to(&self, message: &str) -> bool {
        match self {
            Self::Original(object) => object.messages().iter().any(|known| *known == message),
            Self::Decorated(decorator) => {
                decorator.messages().iter().any(|known| *known == message)
                    || decorator.layer().inner().responds_to(message)
            }
        }
    }

    /// Send a message, outermost layer first. Layers that do not answer it
    /// forward it inwards, down to the original.
    ///
    /// # Errors
    ///
    /// The original's [`SendError`], unchanged, when no layer answers.
    pub fn send(&self, message: &str) -> Result<Value, SendError> {
        match self {
            Self::Original(object) => object.receive(message),
            Self::Decorated(decorator) => decorator
                .respond(message)
                .unwrap_or_else(|| decorator.layer().inner().send(message)),
        }
    }

    /// Type the decorator stack is resolved for: the value's own type, or the
    /// type a type value stands for.
    pub(crate) fn resolution_descriptor(&self) -> &TypeDescriptor {
        match self {
            Self::Original(object) => object
                .as_class()
                .unwrap_or_else(|| object.descriptor()),
            Self::Decorated(_) => self.descriptor(),
        }
    }

    fn as_decorator(&self) -> Option<&dyn Decorator> {
        match self {
            Self::Original(_) => None,
            Self::Decorated(decorator) => Some(&**decorator),
        }
    }
}

impl<T: Presentable> From<Arc<T>> for Presented {
    fn from(value: Arc<T>) -> Self {
        Self::Original(value)
    }
}

impl From<Arc<dyn Presentable>> for Presented {
    fn from(value: Arc<dyn Presentable>) -> Self {
        Self::Original(value)
    }
}

impl From<ClassRef> for Presented {
    fn from(class: ClassRef) -> Self {
        Self::new(class)
    }
}

impl PartialEq for Presented {
    fn eq(&self, other: &Self) -> bool {
        if let (Self::Decorated(a), Self::Decorated(b)) = (self, other) {
            if Arc::ptr_eq(a, b) {
                return true;
            }
        }
        let (a, b) = (self.original(), other.original());
        Arc::ptr_eq(a, b) || a.eq_object(&**b)
    }
}

impl fmt::Display for Presented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self.original(), f)
    }
}

impl fmt::Debug for Presented {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self.original(), f)
    }
}
