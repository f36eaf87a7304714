//! Diagnostic message table.
//!
//! Codes are grouped by stage:
//! - 1xxx: mapping-method shape checks
//! - 2xxx: override rules and refinements
//! - 3xxx: mapping-specification configuration

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    pub const NO_INPUT_ARGS: u32 = 1001;
    pub const DUPLICATE_MAPPING_TARGETS: u32 = 1002;
    pub const VOID_MAPPING_METHOD: u32 = 1003;
    pub const NON_ASSIGNABLE_RESULT_TYPE: u32 = 1004;
    pub const ITERABLE_TO_NON_ITERABLE: u32 = 1005;
    pub const MAPPING_HAS_TARGET_TYPE_PARAMETER: u32 = 1006;
    pub const NON_ITERABLE_TO_ITERABLE: u32 = 1007;
    pub const PRIMITIVE_PARAMETER: u32 = 1008;
    pub const PRIMITIVE_RETURN: u32 = 1009;
    pub const ENUM_TO_NON_ENUM: u32 = 1010;
    pub const NON_ENUM_TO_ENUM: u32 = 1011;

    pub const SOURCE_AND_CONSTANT_BOTH_DEFINED: u32 = 2001;
    pub const SOURCE_AND_EXPRESSION_BOTH_DEFINED: u32 = 2002;
    pub const EXPRESSION_AND_CONSTANT_BOTH_DEFINED: u32 = 2003;
    pub const INVALID_EXPRESSION: u32 = 2004;
    pub const IGNORED_TARGET_WITH_VALUE: u32 = 2005;
    pub const EMPTY_ITERABLE_MAPPING: u32 = 2101;
    pub const EMPTY_MAP_MAPPING: u32 = 2102;
    pub const EMPTY_BEAN_MAPPING: u32 = 2103;

    pub const MISSING_SPECIFICATION: u32 = 3001;
    pub const INVALID_COMPOSED_TYPE: u32 = 3002;
    pub const INVALID_ARCHETYPE: u32 = 3003;
    pub const ARCHETYPE_NOT_ANNOTATED: u32 = 3004;
}

pub mod diagnostic_messages {
    use super::diagnostic_codes as codes;
    use super::{DiagnosticCategory, DiagnosticMessage};

    const fn error(code: u32, message: &'static str) -> DiagnosticMessage {
        DiagnosticMessage {
            code,
            category: DiagnosticCategory::Error,
            message,
        }
    }

    pub const NO_INPUT_ARGS: DiagnosticMessage = error(
        codes::NO_INPUT_ARGS,
        "Can't generate mapping method with no input arguments.",
    );
    pub const DUPLICATE_MAPPING_TARGETS: DiagnosticMessage = error(
        codes::DUPLICATE_MAPPING_TARGETS,
        "Can't generate mapping method with more than one update-target parameter.",
    );
    pub const VOID_MAPPING_METHOD: DiagnosticMessage = error(
        codes::VOID_MAPPING_METHOD,
        "Can't generate mapping method with return type void.",
    );
    pub const NON_ASSIGNABLE_RESULT_TYPE: DiagnosticMessage = error(
        codes::NON_ASSIGNABLE_RESULT_TYPE,
        "The result type {0} is not assignable to the return type {1}.",
    );
    pub const ITERABLE_TO_NON_ITERABLE: DiagnosticMessage = error(
        codes::ITERABLE_TO_NON_ITERABLE,
        "Can't generate mapping method from iterable type to non-iterable type.",
    );
    pub const MAPPING_HAS_TARGET_TYPE_PARAMETER: DiagnosticMessage = error(
        codes::MAPPING_HAS_TARGET_TYPE_PARAMETER,
        "Mapping method must not declare a result-type-hint parameter.",
    );
    pub const NON_ITERABLE_TO_ITERABLE: DiagnosticMessage = error(
        codes::NON_ITERABLE_TO_ITERABLE,
        "Can't generate mapping method from non-iterable type to iterable type.",
    );
    pub const PRIMITIVE_PARAMETER: DiagnosticMessage = error(
        codes::PRIMITIVE_PARAMETER,
        "Can't generate mapping method with primitive parameter type.",
    );
    pub const PRIMITIVE_RETURN: DiagnosticMessage = error(
        codes::PRIMITIVE_RETURN,
        "Can't generate mapping method with primitive return type.",
    );
    pub const ENUM_TO_NON_ENUM: DiagnosticMessage = error(
        codes::ENUM_TO_NON_ENUM,
        "Can't generate mapping method from enum type to non-enum type.",
    );
    pub const NON_ENUM_TO_ENUM: DiagnosticMessage = error(
        codes::NON_ENUM_TO_ENUM,
        "Can't generate mapping method from non-enum type to enum type.",
    );

    pub const SOURCE_AND_CONSTANT_BOTH_DEFINED: DiagnosticMessage = error(
        codes::SOURCE_AND_CONSTANT_BOTH_DEFINED,
        "Source and constant are both defined in mapping of target \"{0}\", either define a source or a constant.",
    );
    pub const SOURCE_AND_EXPRESSION_BOTH_DEFINED: DiagnosticMessage = error(
        codes::SOURCE_AND_EXPRESSION_BOTH_DEFINED,
        "Source and expression are both defined in mapping of target \"{0}\", either define a source or an expression.",
    );
    pub const EXPRESSION_AND_CONSTANT_BOTH_DEFINED: DiagnosticMessage = error(
        codes::EXPRESSION_AND_CONSTANT_BOTH_DEFINED,
        "Expression and constant are both defined in mapping of target \"{0}\", either define an expression or a constant.",
    );
    pub const INVALID_EXPRESSION: DiagnosticMessage = error(
        codes::INVALID_EXPRESSION,
        "Value \"{0}\" for expression must be given in the form \"java(<EXPRESSION>)\".",
    );
    pub const IGNORED_TARGET_WITH_VALUE: DiagnosticMessage = error(
        codes::IGNORED_TARGET_WITH_VALUE,
        "Target \"{0}\" is ignored but also has a source, constant or expression.",
    );
    pub const EMPTY_ITERABLE_MAPPING: DiagnosticMessage = error(
        codes::EMPTY_ITERABLE_MAPPING,
        "'element format', 'element qualifier' and 'element target type' are all undefined in iterable refinement.",
    );
    pub const EMPTY_MAP_MAPPING: DiagnosticMessage = error(
        codes::EMPTY_MAP_MAPPING,
        "'key format', 'key qualifier', 'key target type', 'value format', 'value qualifier' and 'value target type' are all undefined in map refinement.",
    );
    pub const EMPTY_BEAN_MAPPING: DiagnosticMessage = error(
        codes::EMPTY_BEAN_MAPPING,
        "'result type', 'qualifier' and 'ignore by default' are all undefined in bean refinement.",
    );

    pub const MISSING_SPECIFICATION: DiagnosticMessage = error(
        codes::MISSING_SPECIFICATION,
        "Couldn't retrieve mapping-specification annotation on \"{0}\".",
    );
    pub const INVALID_COMPOSED_TYPE: DiagnosticMessage = error(
        codes::INVALID_COMPOSED_TYPE,
        "\"{0}\" listed as used type of \"{1}\" is not a declared type.",
    );
    pub const INVALID_ARCHETYPE: DiagnosticMessage = error(
        codes::INVALID_ARCHETYPE,
        "\"{0}\" given as config of \"{1}\" is not a declared type.",
    );
    pub const ARCHETYPE_NOT_ANNOTATED: DiagnosticMessage = error(
        codes::ARCHETYPE_NOT_ANNOTATED,
        "\"{0}\" given as config of \"{1}\" lacks the archetype annotation.",
    );
}

use diagnostic_messages as m;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    m::NO_INPUT_ARGS,
    m::DUPLICATE_MAPPING_TARGETS,
    m::VOID_MAPPING_METHOD,
    m::NON_ASSIGNABLE_RESULT_TYPE,
    m::ITERABLE_TO_NON_ITERABLE,
    m::MAPPING_HAS_TARGET_TYPE_PARAMETER,
    m::NON_ITERABLE_TO_ITERABLE,
    m::PRIMITIVE_PARAMETER,
    m::PRIMITIVE_RETURN,
    m::ENUM_TO_NON_ENUM,
    m::NON_ENUM_TO_ENUM,
    m::SOURCE_AND_CONSTANT_BOTH_DEFINED,
    m::SOURCE_AND_EXPRESSION_BOTH_DEFINED,
    m::EXPRESSION_AND_CONSTANT_BOTH_DEFINED,
    m::INVALID_EXPRESSION,
    m::IGNORED_TARGET_WITH_VALUE,
    m::EMPTY_ITERABLE_MAPPING,
    m::EMPTY_MAP_MAPPING,
    m::EMPTY_BEAN_MAPPING,
    m::MISSING_SPECIFICATION,
    m::INVALID_COMPOSED_TYPE,
    m::INVALID_ARCHETYPE,
    m::ARCHETYPE_NOT_ANNOTATED,
];
