//! Names with a fixed meaning for generated units.

/// Namespace whose types (and the types of its sub-namespaces) never need an import.
pub const BUILTIN_NAMESPACE: &str = "java.lang";

/// Namespace of the marker annotation placed on every generated unit.
pub const GENERATED_MARKER_NAMESPACE: &str = "javax.annotation";

/// Simple name of the marker annotation placed on every generated unit.
pub const GENERATED_MARKER_NAME: &str = "Generated";

/// Placeholder in implementation-name patterns replaced by the specification's simple name.
pub const CLASS_NAME_PLACEHOLDER: &str = "<CLASS_NAME>";

/// Placeholder in implementation-namespace patterns replaced by the specification's namespace.
pub const PACKAGE_NAME_PLACEHOLDER: &str = "<PACKAGE_NAME>";

pub const DEFAULT_IMPLEMENTATION_NAME: &str = "<CLASS_NAME>Impl";
pub const DEFAULT_IMPLEMENTATION_NAMESPACE: &str = "<PACKAGE_NAME>";

/// Check whether `namespace` is the built-in namespace or one of its sub-namespaces.
///
/// The match is segment aware: `java.lang.reflect` matches, `java.language` does not.
pub fn is_builtin_namespace(namespace: &str) -> bool {
    match namespace.strip_prefix(BUILTIN_NAMESPACE) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}
