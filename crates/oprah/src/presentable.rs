//! The contract every presentable value implements.

use std::any::Any;
use std::fmt;

use oprah_core::TypeDescriptor;
use serde_json::Value;

use crate::error::SendError;

/// Access to a value as `&dyn Any`, implemented for every `'static` type.
///
/// Call it on a trait object (`&dyn Presentable`, `&dyn Decorator`), never on
/// a smart pointer, or the pointer itself is what gets downcast.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A domain value that decorators can be stacked on.
///
/// Only [`descriptor`](Self::descriptor) is required. Values answer
/// zero-argument messages through [`receive`](Self::receive); anything not
/// understood fails with [`SendError::NoMethod`], and messages that exist but
/// are not public should fail with [`SendError::PrivateMethod`].
pub trait Presentable: AsAny + Send + Sync + fmt::Debug + fmt::Display + 'static {
    /// Runtime type of this value.
    fn descriptor(&self) -> &TypeDescriptor;

    /// `Some(type)` when this value *is* a type. Decorators are then resolved
    /// for that type rather than for `Class`.
    fn as_class(&self) -> Option<&TypeDescriptor> {
        None
    }

    /// Public messages this value answers.
    fn messages(&self) -> &[&'static str] {
        &[]
    }

    /// # Errors
    ///
    /// [`SendError::NoMethod`] by default.
    fn receive(&self, message: &str) -> Result<Value, SendError> {
        Err(SendError::no_method(self.descriptor(), message))
    }

    /// Identity by default. Override with [`eq_by_value`] for value types.
    fn eq_object(&self, other: &dyn Presentable) -> bool {
        std::ptr::addr_eq(std::ptr::from_ref(self), std::ptr::from_ref(other))
    }
}

/// Value equality for [`Presentable::eq_object`]: equal when `other` has the
/// same concrete type and compares equal.
pub fn eq_by_value<T>(this: &T, other: &dyn Presentable) -> bool
where
    T: Presentable + PartialEq,
{
    other
        .as_any()
        .downcast_ref::<T>()
        .is_some_and(|other| this == other)
}

/// A type presented as a value, e.g. to decorate a listing page for `User`
/// itself rather than for one user.
#[derive(Clone, Copy)]
pub struct ClassRef(&'static TypeDescriptor);

impl ClassRef {
    #[must_use]
    pub const fn of(target: &'static TypeDescriptor) -> Self {
        Self(target)
    }

    #[must_use]
    pub const fn target(&self) -> &'static TypeDescriptor {
        self.0
    }
}

impl PartialEq for ClassRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.name() == other.0.name()
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.name())
    }
}

impl Presentable for ClassRef {
    fn descriptor(&self) -> &TypeDescriptor {
        TypeDescriptor::class_type()
    }

    fn as_class(&self) -> Option<&TypeDescriptor> {
        Some(self.0)
    }

    fn messages(&self) -> &[&'static str] {
        &["name", "ancestors"]
    }

    fn receive(&self, message: &str) -> Result<Value, SendError> {
        match message {
            "name" => Ok(Value::from(self.0.name())),
            "ancestors" => Ok(Value::from(self.0.ancestors().to_vec())),
            _ => Err(SendError::no_method(self.descriptor(), message)),
        }
    }

    fn eq_object(&self, other: &dyn Presentable) -> bool {
        eq_by_value(self, other)
    }
}
