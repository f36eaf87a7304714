//! Annotation payloads as extracted by the introspection service.
//!
//! These are raw values: nothing here is validated. The retrieval stage turns
//! them into configuration, override rules and refinements, reporting
//! diagnostics for malformed payloads.

use mapforge_common::{CollectionMappingStrategy, MappingInheritanceStrategy, ReportingPolicy};

use crate::types::TypeId;

// =============================================================================
// Type-level annotations
// =============================================================================

/// Strategy settings that may appear on both a specification and its archetype.
/// `None` means "not set here".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategySettings {
    pub unmapped_target_policy: Option<ReportingPolicy>,
    pub component_model: Option<String>,
    pub collection_mapping_strategy: Option<CollectionMappingStrategy>,
    pub mapping_inheritance_strategy: Option<MappingInheritanceStrategy>,
    pub implementation_name: Option<String>,
    pub implementation_namespace: Option<String>,
}

/// The mapping-specification annotation placed on a root type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecificationAnnotation {
    /// Composed ("used") types, in declaration order.
    pub uses: Vec<TypeId>,
    /// Archetype type; `Some(TypeId::VOID)` is the explicit "no type" marker.
    pub config: Option<TypeId>,
    pub settings: StrategySettings,
}

/// The archetype annotation placed on a shared configuration type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchetypeAnnotation {
    pub uses: Vec<TypeId>,
    pub settings: StrategySettings,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeAnnotations {
    pub specification: Option<SpecificationAnnotation>,
    pub archetype: Option<ArchetypeAnnotation>,
}

// =============================================================================
// Method-level annotations
// =============================================================================

/// A single per-property override.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingAnnotation {
    pub target: String,
    pub source: Option<String>,
    pub expression: Option<String>,
    pub constant: Option<String>,
    pub default_value: Option<String>,
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualified_by: Vec<TypeId>,
    pub result_type: Option<TypeId>,
    pub ignore: bool,
}

impl MappingAnnotation {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    pub fn with_constant(mut self, constant: impl Into<String>) -> Self {
        self.constant = Some(constant.into());
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IterableMappingAnnotation {
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualified_by: Vec<TypeId>,
    pub element_target_type: Option<TypeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapMappingAnnotation {
    pub key_format: Option<String>,
    pub value_format: Option<String>,
    pub key_qualified_by: Vec<TypeId>,
    pub value_qualified_by: Vec<TypeId>,
    pub key_target_type: Option<TypeId>,
    pub value_target_type: Option<TypeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BeanMappingAnnotation {
    pub result_type: Option<TypeId>,
    pub qualified_by: Vec<TypeId>,
    pub ignore_by_default: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MethodAnnotations {
    /// Single override rule.
    pub mapping: Option<MappingAnnotation>,
    /// Repeated override rules, in declaration order.
    pub mappings: Vec<MappingAnnotation>,
    pub iterable_mapping: Option<IterableMappingAnnotation>,
    pub map_mapping: Option<MapMappingAnnotation>,
    pub bean_mapping: Option<BeanMappingAnnotation>,
}
