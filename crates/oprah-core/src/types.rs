//! Type descriptors and ancestor linearization.
//!
//! A [`TypeDescriptor`] is declared once from a static class or module
//! declaration and is immutable afterwards. The ancestor chain is computed at
//! build time, most specific type first:
//!
//! 1. the type itself
//! 2. each included module's ancestors, last inclusion first
//! 3. the parent class's ancestors (`Object` when no parent is given)
//!
//! A name that occurs more than once keeps only its last position, so a module
//! that a superclass already includes stays where the superclass put it.
//!
//! ```
//! use oprah_core::TypeDescriptor;
//!
//! let entity = TypeDescriptor::module("Entity").build();
//! let user = TypeDescriptor::class("User").include(&entity).build();
//!
//! assert_eq!(user.ancestors(), ["User", "Entity", "Object"]);
//! assert!(user.is_subtype_of("Entity"));
//! ```

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

use crate::errors::CoreError;

static OBJECT: LazyLock<TypeDescriptor> = LazyLock::new(|| TypeDescriptor {
    name: "Object".to_string(),
    kind: TypeKind::Class,
    ancestors: vec!["Object".to_string()],
});

static MODULE: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Module").build());

static CLASS: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Class").extends(&MODULE).build());

/// Whether a descriptor names a class or a mixed-in module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Module,
}

/// Identity and linearized ancestor chain of a presentable type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    ancestors: Vec<String>,
}

impl TypeDescriptor {
    /// Start declaring a class. Classes extend `Object` unless
    /// [`ClassBuilder::extends`] says otherwise.
    pub fn class(name: impl Into<String>) -> ClassBuilder<'static> {
        ClassBuilder {
            name: name.into(),
            parent: None,
            mixins: Vec::new(),
        }
    }

    /// Start declaring a module (a capability set that classes include).
    pub fn module(name: impl Into<String>) -> ModuleBuilder<'static> {
        ModuleBuilder {
            name: name.into(),
            mixins: Vec::new(),
        }
    }

    /// The root of every class hierarchy.
    #[must_use]
    pub fn object() -> &'static Self {
        &OBJECT
    }

    /// Runtime type of type values (`Class`, `Module`, `Object`).
    #[must_use]
    pub fn class_type() -> &'static Self {
        &CLASS
    }

    /// Canonical name, e.g. `Blog::User`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Ancestor chain, most specific first. The first element is always the
    /// type itself.
    #[must_use]
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    /// Whether `name` is this type or one of its ancestors.
    #[must_use]
    pub fn is_subtype_of(&self, name: &str) -> bool {
        self.ancestors.iter().any(|ancestor| ancestor == name)
    }

    /// Check every name on the ancestor chain is a well-formed constant path
    /// (`Segment(::Segment)*`, segments start with an uppercase ASCII letter).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MalformedTypeName`] for the first offending name.
    pub fn validate(&self) -> Result<(), CoreError> {
        for name in &self.ancestors {
            check_constant_path(name).map_err(|reason| CoreError::MalformedTypeName {
                owner: self.name.clone(),
                name: name.clone(),
                reason,
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ── Builders ───────────────────────────────────────────────────────

/// Declaration of a class: optional parent plus included modules.
#[must_use]
pub struct ClassBuilder<'a> {
    name: String,
    parent: Option<&'a TypeDescriptor>,
    mixins: Vec<&'a TypeDescriptor>,
}

impl<'a> ClassBuilder<'a> {
    /// Set the superclass.
    pub fn extends<'b>(self, parent: &'b TypeDescriptor) -> ClassBuilder<'b>
    where
        'a: 'b,
    {
        ClassBuilder {
            name: self.name,
            parent: Some(parent),
            mixins: self.mixins,
        }
    }

    /// Mix in a module. Later inclusions take precedence over earlier ones.
    pub fn include<'b>(self, module: &'b TypeDescriptor) -> ClassBuilder<'b>
    where
        'a: 'b,
    {
        let mut mixins: Vec<&'b TypeDescriptor> = self.mixins;
        mixins.push(module);
        ClassBuilder {
            name: self.name,
            parent: self.parent,
            mixins,
        }
    }

    pub fn build(self) -> TypeDescriptor {
        let parent = self.parent.unwrap_or(TypeDescriptor::object());
        linearize(self.name, TypeKind::Class, &self.mixins, Some(parent))
    }
}

/// Declaration of a module. Modules have no superclass.
#[must_use]
pub struct ModuleBuilder<'a> {
    name: String,
    mixins: Vec<&'a TypeDescriptor>,
}

impl<'a> ModuleBuilder<'a> {
    /// Mix another module into this one.
    pub fn include<'b>(self, module: &'b TypeDescriptor) -> ModuleBuilder<'b>
    where
        'a: 'b,
    {
        let mut mixins: Vec<&'b TypeDescriptor> = self.mixins;
        mixins.push(module);
        ModuleBuilder {
            name: self.name,
            mixins,
        }
    }

    pub fn build(self) -> TypeDescriptor {
        linearize(self.name, TypeKind::Module, &self.mixins, None)
    }
}

fn linearize(
    name: String,
    kind: TypeKind,
    mixins: &[&TypeDescriptor],
    parent: Option<&TypeDescriptor>,
) -> TypeDescriptor {
    let mut chain: Vec<&str> = Vec::new();
    for module in mixins.iter().rev() {
        chain.extend(module.ancestors().iter().map(String::as_str));
    }
    if let Some(parent) = parent {
        chain.extend(parent.ancestors().iter().map(String::as_str));
    }

    let mut ancestors = Vec::with_capacity(chain.len() + 1);
    ancestors.push(name.clone());
    for (idx, ancestor) in chain.iter().enumerate() {
        if *ancestor == name || chain[idx + 1..].contains(ancestor) {
            continue;
        }
        ancestors.push((*ancestor).to_string());
    }

    TypeDescriptor {
        name,
        kind,
        ancestors,
    }
}

fn check_constant_path(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    for segment in name.split("::") {
        let mut chars = segment.chars();
        match chars.next() {
            None => return Err("empty path segment".to_string()),
            Some(first) if !first.is_ascii_uppercase() => {
                return Err(format!(
                    "segment '{segment}' must start with an uppercase letter"
                ));
            }
            Some(_) => {}
        }
        if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(format!("segment '{segment}' contains invalid character '{bad}'"));
        }
    }
    Ok(())
}
