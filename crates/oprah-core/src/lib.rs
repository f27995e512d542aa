//! # oprah-core
//!
//! Core types and error types for Oprah.
//!
//! This crate provides the foundational types shared across all Oprah crates:
//! - Type descriptors declared once from static class/module declarations
//! - Ancestor linearization (most specific type first)
//! - Constant-path validation for type names
//! - Cross-cutting error types

pub mod errors;
pub mod types;

pub use errors::CoreError;
pub use types::{ClassBuilder, ModuleBuilder, TypeDescriptor, TypeKind};
