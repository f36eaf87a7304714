//! Mapping-method shape checks.
//!
//! A generation target must map at least one source to a non-void, non-scalar
//! result of a compatible shape. The checks run in a fixed order and the
//! first failure rejects the method, so each rejected method is reported
//! exactly once.

use mapforge_common::diagnostics::diagnostic_messages;
use mapforge_common::{Diagnostic, DiagnosticMessage};
use mapforge_types::type_queries::{is_enum_type, is_iterable_type};
use mapforge_types::{MethodInfo, ParamInfo, TypeDatabase, TypeFormatter, TypeId};

// =============================================================================
// Parameter shapes
// =============================================================================

/// Parameter roles of a method signature.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterCounts {
    /// Neither update target nor result-type hint.
    pub sources: usize,
    pub mapping_targets: usize,
    pub target_types: usize,
    pub total: usize,
}

impl ParameterCounts {
    pub fn of(params: &[ParamInfo]) -> Self {
        let mut counts = Self {
            total: params.len(),
            ..Self::default()
        };
        for param in params {
            if param.is_mapping_target {
                counts.mapping_targets += 1;
            }
            if param.is_target_type {
                counts.target_types += 1;
            }
            if !param.is_mapping_target && !param.is_target_type {
                counts.sources += 1;
            }
        }
        counts
    }

    fn is_exhaustive(&self) -> bool {
        self.total == self.sources + self.mapping_targets + self.target_types
    }

    /// `convert(source [, @target] [, @targetType])`
    pub fn is_reference_shape(&self) -> bool {
        self.sources == 1
            && self.mapping_targets <= 1
            && self.target_types <= 1
            && self.is_exhaustive()
    }

    /// `create([@targetType])`
    pub fn is_factory_shape(&self) -> bool {
        self.sources == 0
            && self.mapping_targets == 0
            && self.target_types <= 1
            && self.is_exhaustive()
    }
}

/// Every parameter that is not an update target, in declaration order.
pub fn source_parameters(params: &[ParamInfo]) -> impl Iterator<Item = &ParamInfo> {
    params.iter().filter(|param| !param.is_mapping_target)
}

/// The first update-target parameter.
pub fn mapping_target_parameter(params: &[ParamInfo]) -> Option<&ParamInfo> {
    params.iter().find(|param| param.is_mapping_target)
}

/// The update target's type if there is one, else the declared return type.
pub fn result_type(params: &[ParamInfo], return_type: TypeId) -> TypeId {
    mapping_target_parameter(params).map_or(return_type, |param| param.type_id)
}

// =============================================================================
// Shape checks
// =============================================================================

/// Why a generation-target candidate was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeViolation {
    NoInputArgs,
    DuplicateMappingTargets,
    VoidMappingMethod,
    NonAssignableResultType { result: TypeId, declared: TypeId },
    IterableToNonIterable,
    TargetTypeParameter,
    NonIterableToIterable,
    PrimitiveParameter,
    PrimitiveReturn,
    EnumToNonEnum,
    NonEnumToEnum,
}

impl ShapeViolation {
    pub fn message(self) -> &'static DiagnosticMessage {
        use diagnostic_messages as m;
        match self {
            ShapeViolation::NoInputArgs => &m::NO_INPUT_ARGS,
            ShapeViolation::DuplicateMappingTargets => &m::DUPLICATE_MAPPING_TARGETS,
            ShapeViolation::VoidMappingMethod => &m::VOID_MAPPING_METHOD,
            ShapeViolation::NonAssignableResultType { .. } => &m::NON_ASSIGNABLE_RESULT_TYPE,
            ShapeViolation::IterableToNonIterable => &m::ITERABLE_TO_NON_ITERABLE,
            ShapeViolation::TargetTypeParameter => &m::MAPPING_HAS_TARGET_TYPE_PARAMETER,
            ShapeViolation::NonIterableToIterable => &m::NON_ITERABLE_TO_ITERABLE,
            ShapeViolation::PrimitiveParameter => &m::PRIMITIVE_PARAMETER,
            ShapeViolation::PrimitiveReturn => &m::PRIMITIVE_RETURN,
            ShapeViolation::EnumToNonEnum => &m::ENUM_TO_NON_ENUM,
            ShapeViolation::NonEnumToEnum => &m::NON_ENUM_TO_ENUM,
        }
    }

    pub fn code(self) -> u32 {
        self.message().code
    }

    /// Diagnostic attached to `method`.
    pub fn to_diagnostic(self, db: &dyn TypeDatabase, method: &MethodInfo) -> Diagnostic {
        let formatter = TypeFormatter::new(db);
        let element = formatter.format_method(method);
        match self {
            ShapeViolation::NonAssignableResultType { result, declared } => {
                let result = formatter.format(result);
                let declared = formatter.format(declared);
                Diagnostic::new(element, self.message(), &[result.as_str(), declared.as_str()])
            }
            _ => Diagnostic::new(element, self.message(), &[]),
        }
    }
}

/// Run the shape checks on a generation-target candidate.
pub fn check_mapping_shape(
    db: &dyn TypeDatabase,
    method: &MethodInfo,
) -> Result<(), ShapeViolation> {
    let params = &method.params;
    let Some(first_source) = source_parameters(params).next() else {
        return Err(ShapeViolation::NoInputArgs);
    };

    let target = mapping_target_parameter(params);
    if target.is_some() && source_parameters(params).count() + 1 != params.len() {
        return Err(ShapeViolation::DuplicateMappingTargets);
    }

    let result = result_type(params, method.return_type);
    if result.is_void() {
        return Err(ShapeViolation::VoidMappingMethod);
    }

    let declared = method.return_type;
    if !declared.is_void() && !db.is_assignable_to(result, declared) {
        return Err(ShapeViolation::NonAssignableResultType { result, declared });
    }

    let source = first_source.type_id;
    let source_iterable = is_iterable_type(db, source);
    let result_iterable = is_iterable_type(db, result);
    if source_iterable && !result_iterable {
        return Err(ShapeViolation::IterableToNonIterable);
    }

    if params.iter().any(|param| param.is_target_type) {
        return Err(ShapeViolation::TargetTypeParameter);
    }

    if !source_iterable && result_iterable {
        return Err(ShapeViolation::NonIterableToIterable);
    }

    if source.is_primitive() {
        return Err(ShapeViolation::PrimitiveParameter);
    }
    if result.is_primitive() {
        return Err(ShapeViolation::PrimitiveReturn);
    }

    let source_enum = is_enum_type(db, source);
    let result_enum = is_enum_type(db, result);
    if source_enum && !result_enum {
        return Err(ShapeViolation::EnumToNonEnum);
    }
    if !source_enum && result_enum {
        return Err(ShapeViolation::NonEnumToEnum);
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
