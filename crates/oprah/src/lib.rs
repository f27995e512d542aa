//! # oprah
//!
//! Presenter resolution and composition for view layers.
//!
//! A [`Composer`] maps a value's type, through its ancestor chain, to a stack
//! of registered decorators and layers them onto the value: the decorator for
//! the most general ancestor innermost, the one for the value's own type
//! outermost. Stacks are memoized per type name in a [`PresenterCache`] that
//! the host clears whenever its application code reloads.
//!
//! The result is a [`Presented`] value that answers for every layer and for
//! the original underneath: `is_a`, `instance_of`, `send`, equality, and
//! formatting all see through the decorators.
//!
//! ```ignore
//! let mut registry = DecoratorRegistry::from_config(&OprahConfig::load()?);
//! registry.register::<EntityPresenter>()?.register::<UserPresenter>()?;
//!
//! let composer = Composer::new(registry);
//! let user = composer.present(Arc::new(User::new(1)))?;
//!
//! assert!(user.is_a("UserPresenter"));
//! assert!(user.is_a("EntityPresenter"));
//! assert!(user.is_a("User"));
//! ```

pub mod cache;
pub mod composer;
pub mod decorator;
pub mod error;
pub mod presentable;
pub mod presented;
pub mod registry;
pub mod telemetry;
pub mod view_context;

pub use cache::{PresenterCache, Resolution};
pub use composer::{Composer, ComposerBuilder, PresentOptions};
pub use decorator::{Decorator, DecoratorType, Layer, presenter_type};
pub use error::{PresentError, RegistryError, SendError};
pub use presentable::{AsAny, ClassRef, Presentable, eq_by_value};
pub use presented::Presented;
pub use registry::DecoratorRegistry;
pub use view_context::{BlankView, ViewContext, ViewContextFactory};

pub use oprah_config::OprahConfig;
pub use oprah_core::{TypeDescriptor, TypeKind};
