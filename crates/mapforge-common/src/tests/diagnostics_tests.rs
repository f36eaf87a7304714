use super::*;
use crate::options::{GeneratorOptions, ReportingPolicy};
use crate::well_known::is_builtin_namespace;

#[test]
fn test_format_message_replaces_positional_args() {
    let text = format_message(
        diagnostic_messages::NON_ASSIGNABLE_RESULT_TYPE.message,
        &["CarDto", "Vehicle"],
    );
    assert_eq!(
        text,
        "The result type CarDto is not assignable to the return type Vehicle."
    );
}

#[test]
fn test_diagnostic_codes_are_unique() {
    let mut codes: Vec<u32> = DIAGNOSTIC_MESSAGES.iter().map(|m| m.code).collect();
    let total = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), total);
}

#[test]
fn test_lookup_by_code() {
    let message = get_diagnostic_message(diagnostic_codes::ENUM_TO_NON_ENUM)
        .expect("enum-to-non-enum is registered");
    assert_eq!(message.category, DiagnosticCategory::Error);
    assert_eq!(
        get_message_template(diagnostic_codes::NO_INPUT_ARGS),
        Some("Can't generate mapping method with no input arguments.")
    );
    assert!(get_diagnostic_message(42).is_none());
}

#[test]
fn test_diagnostic_new_carries_code_and_element() {
    let diag = Diagnostic::new(
        "com.acme.CarMapper#toDto(Car)",
        &diagnostic_messages::PRIMITIVE_PARAMETER,
        &[],
    );
    assert_eq!(diag.code, diagnostic_codes::PRIMITIVE_PARAMETER);
    assert_eq!(diag.element, "com.acme.CarMapper#toDto(Car)");
    assert!(diag.is_error());
}

#[test]
fn test_builtin_namespace_is_segment_aware() {
    assert!(is_builtin_namespace("java.lang"));
    assert!(is_builtin_namespace("java.lang.reflect"));
    assert!(!is_builtin_namespace("java.language"));
    assert!(!is_builtin_namespace("java.util"));
    assert!(!is_builtin_namespace(""));
}

#[test]
fn test_generator_options_deserialize_with_defaults() {
    let options: GeneratorOptions =
        serde_json::from_str(r#"{ "unmappedTargetPolicy": "error" }"#).expect("valid options");
    assert_eq!(options.unmapped_target_policy, ReportingPolicy::Error);
    assert!(!options.suppress_generator_timestamp);
    assert_eq!(options.default_component_model, "default");
}
