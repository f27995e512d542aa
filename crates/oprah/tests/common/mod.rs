//! Shared fixtures: a small domain (users, projects, comments) and the
//! presenters registered for it.

#![allow(dead_code)]

use std::fmt;
use std::sync::LazyLock;

use oprah::{
    Composer, Decorator, DecoratorRegistry, Layer, PresentError, Presentable, Presented,
    SendError, TypeDescriptor, eq_by_value, presenter_type,
};
use serde_json::Value;

// ── Domain types ───────────────────────────────────────────────────

pub static ENTITY: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::module("Fixtures::Entity").build());

pub static USER: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::class("Fixtures::User")
        .include(&ENTITY)
        .build()
});

pub static COMMENT: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Fixtures::Comment").build());

pub static PROJECT: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Fixtures::Project").build());

pub static TAG: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Fixtures::Tag").build());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Fixtures::User id={}>", self.id)
    }
}

impl Presentable for User {
    fn descriptor(&self) -> &TypeDescriptor {
        &USER
    }

    fn messages(&self) -> &[&'static str] {
        &["id", "first_name", "last_name"]
    }

    fn receive(&self, message: &str) -> Result<Value, SendError> {
        match message {
            "id" => Ok(Value::from(self.id)),
            "first_name" => Ok(Value::from("Foo")),
            "last_name" => Ok(Value::from("Bar")),
            "password" => Err(SendError::private_method(self.descriptor(), message)),
            _ => Err(SendError::no_method(self.descriptor(), message)),
        }
    }

    fn eq_object(&self, other: &dyn Presentable) -> bool {
        eq_by_value(self, other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: u32,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Fixtures::Comment id={}>", self.id)
    }
}

impl Presentable for Comment {
    fn descriptor(&self) -> &TypeDescriptor {
        &COMMENT
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
}

impl Project {
    pub fn comments(&self) -> Vec<Comment> {
        (1..=3).map(|id| Comment { id }).collect()
    }

    pub const fn owner(&self) -> User {
        User { id: self.id }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<Fixtures::Project id={}>", self.id)
    }
}

impl Presentable for Project {
    fn descriptor(&self) -> &TypeDescriptor {
        &PROJECT
    }

    fn eq_object(&self, other: &dyn Presentable) -> bool {
        eq_by_value(self, other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub &'static str);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl Presentable for Tag {
    fn descriptor(&self) -> &TypeDescriptor {
        &TAG
    }
}

// ── Presenters ─────────────────────────────────────────────────────

macro_rules! presenter_descriptor {
    ($static:ident, $name:literal) => {
        pub static $static: LazyLock<TypeDescriptor> = LazyLock::new(|| {
            TypeDescriptor::class($name)
                .extends(presenter_type())
                .build()
        });
    };
}

presenter_descriptor!(ENTITY_PRESENTER, "Fixtures::EntityPresenter");
presenter_descriptor!(USER_PRESENTER, "Fixtures::UserPresenter");
presenter_descriptor!(COMMENT_PRESENTER, "Fixtures::CommentPresenter");
presenter_descriptor!(PROJECT_PRESENTER, "Fixtures::ProjectPresenter");

pub struct EntityPresenter {
    layer: Layer,
}

impl Decorator for EntityPresenter {
    fn descriptor() -> &'static TypeDescriptor {
        &ENTITY_PRESENTER
    }

    fn new(layer: Layer) -> Self {
        Self { layer }
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn messages(&self) -> &[&'static str] {
        &["foo"]
    }

    fn respond(&self, message: &str) -> Option<Result<Value, SendError>> {
        match message {
            "foo" => Some(Ok(Value::from("foo"))),
            _ => None,
        }
    }
}

pub struct UserPresenter {
    layer: Layer,
}

impl UserPresenter {
    pub fn name(&self) -> Result<String, SendError> {
        let inner = self.layer.inner();
        let first = inner.send("first_name")?;
        let last = inner.send("last_name")?;
        Ok(format!(
            "{} {}",
            first.as_str().unwrap_or_default(),
            last.as_str().unwrap_or_default()
        ))
    }

    /// Extends the `foo` answered by the layer underneath.
    pub fn foo(&self) -> Result<String, SendError> {
        let foo = self.layer.inner().send("foo")?;
        Ok(format!("{}bar", foo.as_str().unwrap_or_default()))
    }

    pub fn greeting(&self) -> Result<String, PresentError> {
        let first = self.layer.inner().send("first_name")?;
        Ok(format!("Hello, {}!", first.as_str().unwrap_or_default()))
    }

    /// Only succeeds if the user exposes its password, which it must not.
    pub fn password_hint(&self) -> Result<String, PresentError> {
        let password = self.layer.inner().send("password")?;
        Ok(password.to_string())
    }

    pub fn user(&self) -> Result<&User, PresentError> {
        self.layer.object_as::<User>()
    }
}

impl Decorator for UserPresenter {
    fn descriptor() -> &'static TypeDescriptor {
        &USER_PRESENTER
    }

    fn new(layer: Layer) -> Self {
        Self { layer }
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }

    fn messages(&self) -> &[&'static str] {
        &["name", "foo"]
    }

    fn respond(&self, message: &str) -> Option<Result<Value, SendError>> {
        match message {
            "name" => Some(self.name().map(Value::from)),
            "foo" => Some(self.foo().map(Value::from)),
            _ => None,
        }
    }
}

pub struct CommentPresenter {
    layer: Layer,
}

impl Decorator for CommentPresenter {
    fn descriptor() -> &'static TypeDescriptor {
        &COMMENT_PRESENTER
    }

    fn new(layer: Layer) -> Self {
        Self { layer }
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }
}

pub struct ProjectPresenter {
    layer: Layer,
}

impl ProjectPresenter {
    pub fn comments(&self) -> Result<Vec<Presented>, PresentError> {
        let project = self.layer.object_as::<Project>()?;
        self.layer.present_all(project.comments())
    }

    pub fn owner(&self) -> Result<Presented, PresentError> {
        let project = self.layer.object_as::<Project>()?;
        self.layer.present_one(project.owner())
    }
}

impl Decorator for ProjectPresenter {
    fn descriptor() -> &'static TypeDescriptor {
        &PROJECT_PRESENTER
    }

    fn new(layer: Layer) -> Self {
        Self { layer }
    }

    fn layer(&self) -> &Layer {
        &self.layer
    }
}

// ── Setup ──────────────────────────────────────────────────────────

pub fn registry() -> DecoratorRegistry {
    let mut registry = DecoratorRegistry::new();
    registry
        .register::<EntityPresenter>()
        .and_then(|r| r.register::<UserPresenter>())
        .and_then(|r| r.register::<CommentPresenter>())
        .and_then(|r| r.register::<ProjectPresenter>())
        .expect("fixture presenters register");
    registry
}

pub fn composer() -> Composer {
    Composer::new(registry())
}
