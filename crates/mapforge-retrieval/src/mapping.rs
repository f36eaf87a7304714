//! Per-property override rules and method-level refinements.
//!
//! Annotation payloads arrive unvalidated. A malformed override rule is
//! reported and dropped, an empty refinement is reported and dropped; neither
//! rejects the method carrying it.

use indexmap::IndexMap;
use mapforge_common::diagnostics::diagnostic_messages;
use mapforge_common::{Diagnostic, DiagnosticMessage};
use mapforge_types::{
    BeanMappingAnnotation, IterableMappingAnnotation, MapMappingAnnotation, MappingAnnotation,
    MethodAnnotations, TypeId,
};
use tracing::trace;

/// Target property name -> rules naming it, in declaration order.
///
/// Duplicates are kept; rejecting them is up to property mapping.
pub type MappingRules = IndexMap<String, Vec<Mapping>>;

const EXPRESSION_PREFIX: &str = "java(";
const EXPRESSION_SUFFIX: &str = ")";

/// Body of a `java(<body>)` expression.
fn expression_body(expression: &str) -> Option<&str> {
    expression
        .strip_prefix(EXPRESSION_PREFIX)?
        .strip_suffix(EXPRESSION_SUFFIX)
}

// =============================================================================
// Mapping
// =============================================================================

/// A validated override rule for one target property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mapping {
    pub target_name: String,
    pub source_name: Option<String>,
    /// Expression body without the `java(` `)` wrapper.
    pub expression: Option<String>,
    pub constant: Option<String>,
    pub default_value: Option<String>,
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualifiers: Vec<TypeId>,
    pub result_type: Option<TypeId>,
    pub ignored: bool,
}

impl Mapping {
    /// Validate one annotation payload. `element` names the method for diagnostics.
    pub fn from_annotation(
        annotation: &MappingAnnotation,
        element: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Mapping> {
        let target = annotation.target.as_str();
        let report =
            |diagnostics: &mut Vec<Diagnostic>, message: &DiagnosticMessage, arg: &str| {
                diagnostics.push(Diagnostic::new(element, message, &[arg]));
            };

        let has_source = annotation.source.is_some();
        let has_expression = annotation.expression.is_some();
        let has_constant = annotation.constant.is_some();

        if has_source && has_constant {
            report(
                diagnostics,
                &diagnostic_messages::SOURCE_AND_CONSTANT_BOTH_DEFINED,
                target,
            );
            return None;
        }
        if has_source && has_expression {
            report(
                diagnostics,
                &diagnostic_messages::SOURCE_AND_EXPRESSION_BOTH_DEFINED,
                target,
            );
            return None;
        }
        if has_expression && has_constant {
            report(
                diagnostics,
                &diagnostic_messages::EXPRESSION_AND_CONSTANT_BOTH_DEFINED,
                target,
            );
            return None;
        }

        let expression = match annotation.expression.as_deref() {
            Some(value) => match expression_body(value) {
                Some(body) => Some(body.to_string()),
                None => {
                    report(diagnostics, &diagnostic_messages::INVALID_EXPRESSION, value);
                    return None;
                }
            },
            None => None,
        };

        if annotation.ignore && (has_source || has_expression || has_constant) {
            report(
                diagnostics,
                &diagnostic_messages::IGNORED_TARGET_WITH_VALUE,
                target,
            );
            return None;
        }

        Some(Mapping {
            target_name: annotation.target.clone(),
            source_name: annotation.source.clone(),
            expression,
            constant: annotation.constant.clone(),
            default_value: annotation.default_value.clone(),
            date_format: annotation.date_format.clone(),
            number_format: annotation.number_format.clone(),
            qualifiers: annotation.qualified_by.clone(),
            result_type: annotation.result_type,
            ignored: annotation.ignore,
        })
    }
}

/// Read the single rule, then the repeated rules, into a target-keyed map.
///
/// A rejected rule still registers its target with an empty list.
pub fn collect_mappings(
    annotations: &MethodAnnotations,
    element: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> MappingRules {
    let mut rules = MappingRules::new();
    for annotation in annotations.mapping.iter().chain(&annotations.mappings) {
        let entry = rules.entry(annotation.target.clone()).or_default();
        if let Some(mapping) = Mapping::from_annotation(annotation, element, diagnostics) {
            entry.push(mapping);
        } else {
            trace!(target = %annotation.target, "dropped override rule");
        }
    }
    rules
}

// =============================================================================
// Refinements
// =============================================================================

/// Element conversion settings for iterable-to-iterable methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterableMapping {
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualifiers: Vec<TypeId>,
    pub element_target_type: Option<TypeId>,
}

impl IterableMapping {
    pub fn from_annotation(
        annotation: Option<&IterableMappingAnnotation>,
        element: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Self> {
        let annotation = annotation?;
        if annotation.date_format.is_none()
            && annotation.number_format.is_none()
            && annotation.qualified_by.is_empty()
            && annotation.element_target_type.is_none()
        {
            diagnostics.push(Diagnostic::new(
                element,
                &diagnostic_messages::EMPTY_ITERABLE_MAPPING,
                &[],
            ));
            return None;
        }
        Some(Self {
            date_format: annotation.date_format.clone(),
            number_format: annotation.number_format.clone(),
            qualifiers: annotation.qualified_by.clone(),
            element_target_type: annotation.element_target_type,
        })
    }
}

/// Key and value conversion settings for map-to-map methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapMapping {
    pub key_format: Option<String>,
    pub value_format: Option<String>,
    pub key_qualifiers: Vec<TypeId>,
    pub value_qualifiers: Vec<TypeId>,
    pub key_target_type: Option<TypeId>,
    pub value_target_type: Option<TypeId>,
}

impl MapMapping {
    pub fn from_annotation(
        annotation: Option<&MapMappingAnnotation>,
        element: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Self> {
        let annotation = annotation?;
        if annotation.key_format.is_none()
            && annotation.value_format.is_none()
            && annotation.key_qualified_by.is_empty()
            && annotation.value_qualified_by.is_empty()
            && annotation.key_target_type.is_none()
            && annotation.value_target_type.is_none()
        {
            diagnostics.push(Diagnostic::new(
                element,
                &diagnostic_messages::EMPTY_MAP_MAPPING,
                &[],
            ));
            return None;
        }
        Some(Self {
            key_format: annotation.key_format.clone(),
            value_format: annotation.value_format.clone(),
            key_qualifiers: annotation.key_qualified_by.clone(),
            value_qualifiers: annotation.value_qualified_by.clone(),
            key_target_type: annotation.key_target_type,
            value_target_type: annotation.value_target_type,
        })
    }
}

/// Result-type selection and default-ignore settings for bean methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BeanMapping {
    pub result_type: Option<TypeId>,
    pub qualifiers: Vec<TypeId>,
    pub ignore_by_default: bool,
}

impl BeanMapping {
    pub fn from_annotation(
        annotation: Option<&BeanMappingAnnotation>,
        element: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Self> {
        let annotation = annotation?;
        if annotation.result_type.is_none()
            && annotation.qualified_by.is_empty()
            && !annotation.ignore_by_default
        {
            diagnostics.push(Diagnostic::new(
                element,
                &diagnostic_messages::EMPTY_BEAN_MAPPING,
                &[],
            ));
            return None;
        }
        Some(Self {
            result_type: annotation.result_type,
            qualifiers: annotation.qualified_by.clone(),
            ignore_by_default: annotation.ignore_by_default,
        })
    }
}

#[cfg(test)]
#[path = "tests/mapping_tests.rs"]
mod tests;
