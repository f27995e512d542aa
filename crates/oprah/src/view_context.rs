//! Opaque view context threaded through presented values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Caller-supplied rendering context. The presenter core never looks inside;
/// decorators downcast it to whatever their view layer provides.
#[derive(Clone)]
pub struct ViewContext(Arc<dyn Any + Send + Sync>);

/// Produces a fresh default view context for each `present` call that does
/// not supply one.
pub type ViewContextFactory = Arc<dyn Fn() -> ViewContext + Send + Sync>;

/// Default view context used when the host supplies none.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlankView;

impl ViewContext {
    pub fn new<T: Any + Send + Sync>(context: T) -> Self {
        Self(Arc::new(context))
    }

    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Whether both handles refer to the same context instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ViewContext {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for ViewContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext").finish_non_exhaustive()
    }
}

pub(crate) fn blank_view_factory() -> ViewContextFactory {
    Arc::new(|| ViewContext::new(BlankView))
}
