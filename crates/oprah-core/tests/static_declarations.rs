//! Descriptors declared as process-wide statics, the way host applications
//! declare their domain types.

use std::sync::LazyLock;

use oprah_core::{TypeDescriptor, TypeKind};
use pretty_assertions::assert_eq;

static AUDITABLE: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::module("Blog::Auditable").build());

static ENTITY: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::module("Blog::Entity")
        .include(&AUDITABLE)
        .build()
});

static RECORD: LazyLock<TypeDescriptor> =
    LazyLock::new(|| TypeDescriptor::class("Blog::Record").build());

static POST: LazyLock<TypeDescriptor> = LazyLock::new(|| {
    TypeDescriptor::class("Blog::Post")
        .extends(&RECORD)
        .include(&ENTITY)
        .build()
});

#[test]
fn statics_linearize_on_first_use() {
    assert_eq!(
        POST.ancestors(),
        [
            "Blog::Post",
            "Blog::Entity",
            "Blog::Auditable",
            "Blog::Record",
            "Object"
        ]
    );
    assert_eq!(POST.kind(), TypeKind::Class);
    assert_eq!(ENTITY.kind(), TypeKind::Module);
}

#[test]
fn subtype_checks_follow_the_chain() {
    assert!(POST.is_subtype_of("Blog::Auditable"));
    assert!(POST.is_subtype_of("Object"));
    assert!(!RECORD.is_subtype_of("Blog::Entity"));
    assert!(!ENTITY.is_subtype_of("Object"));
}

#[test]
fn namespaced_statics_validate() {
    assert!(POST.validate().is_ok());
    assert_eq!(POST.to_string(), "Blog::Post");
}
