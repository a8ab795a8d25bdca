//! KeyMask Core Types and Traits
//!
//! This crate provides the fundamental types shared by every KeyMask crate:
//! - Core error types
//! - The key/value `Container` abstraction and its same-shape factory
//! - Declarative metadata (`MapSensitive`, markers) attached to values
//! - Condition predicates and their registry

pub mod condition;
pub mod container;
pub mod error;
pub mod metadata;

pub use condition::{ALWAYS, AlwaysTrue, Condition, ConditionRegistry};
pub use container::{
    Container, ContainerFactory, DefaultContainerFactory, FnContainerFactory, copy_entries,
};
pub use error::{Error, Result};
pub use metadata::{Annotation, DEFAULT_MAP_CONFIG, MapSensitive, Metadata};
