//! Generated-unit model and import planning.
//!
//! A [`GeneratedUnit`] is assembled once through [`GeneratedUnitBuilder`] and
//! then only read. [`GeneratedUnit::compute_imports`] derives the import list
//! from its content alone.

pub mod imports;
pub mod model;
pub mod unit;

pub use imports::{ImportedType, needs_import};
pub use model::{Accessibility, Annotation, Constructor, Field, MappingMethod};
pub use unit::{GeneratedUnit, GeneratedUnitBuilder, VersionInformation};
