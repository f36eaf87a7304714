//! Type-introspection service for the mapforge mapping generator.
//!
//! Retrieval and import planning consume types through the [`TypeDatabase`]
//! trait. [`TypeRegistry`] is the in-memory implementation:
//!
//! - **Interned handles**: `TypeId` equality is type identity
//! - **Reserved ids**: "no value" and the built-in scalars need no lookup
//! - **Default queries**: inherited methods, assignability and accessibility
//!   are answered structurally unless an implementation overrides them

pub mod annotations;
mod db;
pub mod format;
mod registry;
pub mod relations;
pub mod type_queries;
pub mod types;

pub use annotations::*;
pub use db::TypeDatabase;
pub use format::TypeFormatter;
pub use registry::{TypeBuilder, TypeRegistry};
pub use types::{
    MethodFlags, MethodInfo, ParamInfo, PrimitiveKind, TypeData, TypeFlags, TypeId, TypeIdVec,
    TypeKind,
};
