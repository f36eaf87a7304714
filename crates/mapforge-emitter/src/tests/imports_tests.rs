use super::*;
use mapforge_types::{TypeFlags, TypeRegistry};

const UNIT_NAMESPACE: &str = "com.acme";

#[test]
fn test_needs_import_exclusions() {
    let mut registry = TypeRegistry::new();
    let foreign = registry.declare("org.other", "Foreign").build();
    let local = registry.declare("com.acme", "Local").build();
    let outer = registry.declare("com.acme", "Outer").build();
    let inner = registry.declare("com.acme", "Inner").nested_in(outer).build();
    let string = registry.declare("java.lang", "String").build();
    let reflect = registry.declare("java.lang.reflect", "Method").build();
    let lookalike = registry.declare("java.language", "Word").build();
    let bare = registry.declare("", "Bare").build();
    let compiled = registry
        .declare("org.other", "SameRound")
        .not_imported()
        .build();

    assert!(needs_import(&registry, UNIT_NAMESPACE, foreign));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, local));
    assert!(needs_import(&registry, UNIT_NAMESPACE, inner));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, string));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, reflect));
    assert!(needs_import(&registry, UNIT_NAMESPACE, lookalike));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, bare));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, compiled));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, TypeId::INT));
    assert!(!needs_import(&registry, UNIT_NAMESPACE, TypeId::INVALID));
}

#[test]
fn test_imported_type_orders_by_namespace_then_name() {
    let mut registry = TypeRegistry::new();
    let b = registry.declare("a.b", "Zed").build();
    let a = registry.declare("a.b", "Alpha").build();
    let c = registry.declare("a", "Zed").build();

    let mut entries: Vec<ImportedType> = [b, a, c]
        .into_iter()
        .filter_map(|id| ImportedType::of(&registry, id))
        .collect();
    entries.sort();
    let names: Vec<String> = entries.iter().map(ImportedType::qualified_name).collect();
    assert_eq!(names, ["a.Zed", "a.b.Alpha", "a.b.Zed"]);
}

#[test]
fn test_instantiations_share_one_entry() {
    let mut registry = TypeRegistry::new();
    let list = registry
        .declare("java.util", "List")
        .flags(TypeFlags::ITERABLE)
        .build();
    let a = registry.declare("org.other", "A").build();
    let b = registry.declare("org.other", "B").build();
    let list_a = registry.instantiate(list, [a]);
    let list_b = registry.instantiate(list, [b]);

    let mut planner = ImportPlanner::new(&registry, UNIT_NAMESPACE);
    planner.add_with_dependents(list_a);
    planner.add_with_dependents(list_b);
    let imports = planner.finish();

    let names: Vec<String> = imports.iter().map(ToString::to_string).collect();
    assert_eq!(names, ["java.util.List", "org.other.A", "org.other.B"]);
    let list_entry = imports.iter().next().expect("list entry");
    assert_eq!(list_entry.type_id, list);
}

#[test]
fn test_arrays_import_their_element_type() {
    let mut registry = TypeRegistry::new();
    let foreign = registry.declare("org.other", "Foreign").build();
    let list = registry.declare("java.util", "List").build();
    let arg = registry.declare("org.args", "Arg").build();
    let matrix = {
        let row = registry.array_of(foreign);
        registry.array_of(row)
    };
    let lists = {
        let list_of_arg = registry.instantiate(list, [arg]);
        registry.array_of(list_of_arg)
    };
    let ints = registry.array_of(TypeId::INT);

    let mut planner = ImportPlanner::new(&registry, UNIT_NAMESPACE);
    planner.add_with_dependents(matrix);
    planner.add_with_dependents(lists);
    planner.add_with_dependents(ints);
    let names: Vec<String> = planner.finish().iter().map(ToString::to_string).collect();
    assert_eq!(names, ["java.util.List", "org.args.Arg", "org.other.Foreign"]);
}

#[test]
fn test_nested_arrays_visit_innermost_type_arguments() {
    let mut registry = TypeRegistry::new();
    let list = registry.declare("java.util", "List").build();
    let item = registry.declare("org.other", "Item").build();
    let list_of_item = registry.instantiate(list, [item]);
    let rows = registry.array_of(list_of_item);
    let grid = registry.array_of(rows);

    let mut planner = ImportPlanner::new(&registry, UNIT_NAMESPACE);
    planner.add_with_dependents(grid);
    let names: Vec<String> = planner.finish().iter().map(ToString::to_string).collect();
    assert_eq!(names, ["java.util.List", "org.other.Item"]);
}
