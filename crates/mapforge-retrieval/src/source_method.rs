//! Retrieved methods.
//!
//! A visited method ends up as exactly one of:
//! - [`MappingTarget`]: abstract on the root type, must be implemented
//! - [`MethodReference`]: an existing conversion or factory method to call

use std::sync::Arc;

use mapforge_types::{ParamInfo, TypeId};

use crate::mapping::{BeanMapping, IterableMapping, MapMapping, Mapping, MappingRules};
use crate::validation::{ParameterCounts, mapping_target_parameter, result_type, source_parameters};

/// A method the generated unit must implement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingTarget {
    pub name: String,
    pub declaring_type: TypeId,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub thrown_types: Vec<TypeId>,
    pub mappings: MappingRules,
    pub iterable_mapping: Option<IterableMapping>,
    pub map_mapping: Option<MapMapping>,
    pub bean_mapping: Option<BeanMapping>,
    /// Archetype methods this target may inherit configuration from.
    /// Always empty on a prototype itself.
    pub prototypes: Arc<[MappingTarget]>,
}

impl MappingTarget {
    pub fn source_parameters(&self) -> impl Iterator<Item = &ParamInfo> {
        source_parameters(&self.params)
    }

    pub fn mapping_target_parameter(&self) -> Option<&ParamInfo> {
        mapping_target_parameter(&self.params)
    }

    /// The update target's type if present, else the return type.
    pub fn result_type(&self) -> TypeId {
        result_type(&self.params, self.return_type)
    }

    /// Whether the method updates an existing instance instead of creating one.
    pub fn is_update_method(&self) -> bool {
        self.mapping_target_parameter().is_some()
    }

    /// Rules registered for `target_name`, in declaration order.
    pub fn mappings_for(&self, target_name: &str) -> &[Mapping] {
        self.mappings
            .get(target_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// An existing method the generated unit may call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodReference {
    pub name: String,
    /// `None` when the method lives on the root type itself.
    pub declaring_type: Option<TypeId>,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub thrown_types: Vec<TypeId>,
}

impl MethodReference {
    /// A factory takes no source and no update target.
    pub fn is_factory(&self) -> bool {
        ParameterCounts::of(&self.params).is_factory_shape()
    }

    pub fn result_type(&self) -> TypeId {
        result_type(&self.params, self.return_type)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceMethod {
    Target(MappingTarget),
    Reference(MethodReference),
}

impl SourceMethod {
    pub fn name(&self) -> &str {
        match self {
            SourceMethod::Target(target) => &target.name,
            SourceMethod::Reference(reference) => &reference.name,
        }
    }

    pub fn params(&self) -> &[ParamInfo] {
        match self {
            SourceMethod::Target(target) => &target.params,
            SourceMethod::Reference(reference) => &reference.params,
        }
    }

    pub fn return_type(&self) -> TypeId {
        match self {
            SourceMethod::Target(target) => target.return_type,
            SourceMethod::Reference(reference) => reference.return_type,
        }
    }

    pub fn as_target(&self) -> Option<&MappingTarget> {
        match self {
            SourceMethod::Target(target) => Some(target),
            SourceMethod::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&MethodReference> {
        match self {
            SourceMethod::Reference(reference) => Some(reference),
            SourceMethod::Target(_) => None,
        }
    }

    pub fn is_target(&self) -> bool {
        matches!(self, SourceMethod::Target(_))
    }
}
