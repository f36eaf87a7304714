//! Mapping-method retrieval for the mapforge generator.
//!
//! Given a root mapping-specification type this crate:
//! - resolves its [`Configuration`] (composed types, archetype, strategy defaults)
//! - collects the archetype's prototype methods
//! - classifies every visited method as a generation target, a reference to an
//!   existing method, or irrelevant
//! - runs the mapping-method shape checks and reads per-property override rules
//!
//! Per-method problems are reported as diagnostics and never abort retrieval.
//! Only a broken root configuration is fatal.

pub mod configuration;
pub mod mapping;
pub mod prototypes;
pub mod retrieval;
pub mod source_method;
pub mod validation;

pub use configuration::{ConfigError, Configuration, resolve_configuration};
pub use mapping::{BeanMapping, IterableMapping, MapMapping, Mapping, MappingRules};
pub use prototypes::prototype_methods;
pub use retrieval::{MethodRetrieval, RetrievalError};
pub use source_method::{MappingTarget, MethodReference, SourceMethod};
pub use validation::{ParameterCounts, ShapeViolation, check_mapping_shape};
