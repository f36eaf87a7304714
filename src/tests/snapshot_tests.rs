use super::*;
use mapforge_types::relations::is_assignable_to;
use mapforge_types::{TypeDatabase, TypeKind};

fn registry(json: &str) -> TypeRegistry {
    load_snapshot(json).expect("snapshot should load")
}

#[test]
fn test_declares_types_with_kinds_and_flags() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "java.util", "name": "List", "kind": "interface", "flags": ["iterable"] },
          { "namespace": "com.acme", "name": "Color", "kind": "enum" },
          { "namespace": "com.acme", "name": "Base", "kind": "abstractClass", "imported": false }
        ] }"#,
    );

    let list = registry.lookup("java.util.List").unwrap();
    let flags = registry.type_data(list).unwrap().flags;
    assert!(flags.contains(TypeFlags::INTERFACE | TypeFlags::ITERABLE | TypeFlags::IMPORTED));

    let color = registry.lookup("com.acme.Color").unwrap();
    assert!(registry.type_data(color).unwrap().flags.contains(TypeFlags::ENUM));

    let base = registry.type_data(registry.lookup("com.acme.Base").unwrap()).unwrap();
    assert!(base.flags.contains(TypeFlags::ABSTRACT));
    assert!(!base.is_imported());
}

#[test]
fn test_nested_types_need_their_enclosing_type_first() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Outer" },
          { "namespace": "com.acme", "name": "Inner", "enclosing": "com.acme.Outer" }
        ] }"#,
    );
    let inner = registry.lookup("com.acme.Outer.Inner").unwrap();
    assert!(registry.type_data(inner).unwrap().is_nested());

    let err = load_snapshot(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Inner", "enclosing": "com.acme.Outer" },
          { "namespace": "com.acme", "name": "Outer" }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(err, SnapshotError::UnknownType { reference } if reference == "com.acme.Outer"));
}

#[test]
fn test_duplicate_types_are_rejected() {
    let err = load_snapshot(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Car" },
          { "namespace": "com.acme", "name": "Car" }
        ] }"#,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "type 'com.acme.Car' is declared more than once");
}

#[test]
fn test_supertypes_may_refer_forward() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Sub", "supertypes": ["com.acme.Super"] },
          { "namespace": "com.acme", "name": "Super" }
        ] }"#,
    );
    let sub = registry.lookup("com.acme.Sub").unwrap();
    let sup = registry.lookup("com.acme.Super").unwrap();
    assert!(is_assignable_to(&registry, sub, sup));
}

#[test]
fn test_resolves_type_reference_forms() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "java.lang", "name": "String" },
          { "namespace": "java.util", "name": "Map", "kind": "interface", "flags": ["map"] },
          { "namespace": "java.util", "name": "List", "kind": "interface", "flags": ["iterable"] },
          { "namespace": "com.acme", "name": "Mapper", "typeParameters": ["T"],
            "methods": [
              { "name": "a", "returnType": "int[]",
                "parameters": [
                  { "name": "m", "type": "java.util.Map<java.lang.String, java.util.List<T>>" },
                  { "name": "u", "type": "java.util.List<java.lang.String>[]" }
                ] },
              { "name": "b", "typeParameters": ["R"], "returnType": "R" }
            ] }
        ] }"#,
    );

    let mapper = registry.lookup("com.acme.Mapper").unwrap();
    let methods = registry.declared_methods(mapper);
    assert_eq!(methods.len(), 2);

    let a = &methods[0];
    let returned = registry.type_data(a.return_type).unwrap();
    assert_eq!(returned.kind, TypeKind::Array);
    assert_eq!(returned.component, Some(TypeId::INT));

    let map = registry.type_data(a.params[0].type_id).unwrap();
    assert_eq!(map.erasure, registry.lookup("java.util.Map"));
    assert_eq!(map.type_args.len(), 2);
    let list_of_t = registry.type_data(map.type_args[1]).unwrap();
    let t = registry.type_data(list_of_t.type_args[0]).unwrap();
    assert_eq!(t.kind, TypeKind::TypeVariable);
    assert_eq!(t.name, "T");

    let array = registry.type_data(a.params[1].type_id).unwrap();
    assert!(array.is_array());

    let b = &methods[1];
    assert_eq!(registry.type_data(b.return_type).unwrap().kind, TypeKind::TypeVariable);
}

#[test]
fn test_generic_instantiations_are_shared() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Car" },
          { "namespace": "java.util", "name": "List", "kind": "interface", "flags": ["iterable"] },
          { "namespace": "com.acme", "name": "Mapper",
            "methods": [
              { "name": "a", "returnType": "java.util.List<com.acme.Car>" },
              { "name": "b", "returnType": "java.util.List< com.acme.Car >" }
            ] }
        ] }"#,
    );
    let mapper = registry.lookup("com.acme.Mapper").unwrap();
    let methods = registry.declared_methods(mapper);
    assert_eq!(methods[0].return_type, methods[1].return_type);
}

#[test]
fn test_rejects_unknown_and_malformed_references() {
    let unknown = load_snapshot(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Mapper",
            "methods": [{ "name": "a", "returnType": "com.acme.Nope" }] }
        ] }"#,
    )
    .unwrap_err();
    assert!(matches!(unknown, SnapshotError::UnknownType { .. }));

    for reference in ["", "java.util.List<", "java.util.List<a,>", "A>B"] {
        let json = format!(
            r#"{{ "types": [
              {{ "namespace": "java.util", "name": "List" }},
              {{ "namespace": "com.acme", "name": "Mapper",
                "methods": [{{ "name": "a", "returnType": "{reference}" }}] }}
            ] }}"#
        );
        let err = load_snapshot(&json).unwrap_err();
        assert!(
            matches!(err, SnapshotError::MalformedTypeReference { .. }),
            "{reference:?} gave {err}"
        );
    }
}

#[test]
fn test_split_type_arguments() {
    assert_eq!(
        split_type_arguments("A, Map<B, C>").unwrap().as_slice(),
        ["A", "Map<B, C>"]
    );
    assert!(split_type_arguments("A>").is_none());
    assert!(split_type_arguments("Map<A").is_none());
    assert!(split_type_arguments("").is_none());
}

#[test]
fn test_reads_annotations_and_methods() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Car" },
          { "namespace": "com.acme", "name": "CarDto" },
          { "namespace": "com.acme", "name": "Helper" },
          { "namespace": "com.acme", "name": "Central",
            "archetype": { "uses": ["com.acme.Helper"], "unmappedTargetPolicy": "ignore" } },
          { "namespace": "com.acme", "name": "CarMapper", "kind": "interface",
            "specification": {
              "uses": ["com.acme.Helper"], "config": "com.acme.Central",
              "componentModel": "spring", "collectionMappingStrategy": "adderPreferred"
            },
            "methods": [
              { "name": "update", "modifiers": ["public", "abstract"],
                "parameters": [
                  { "name": "car", "type": "com.acme.Car" },
                  { "name": "dto", "type": "com.acme.CarDto", "mappingTarget": true }
                ],
                "mapping": { "target": "name", "source": "fullName" },
                "mappings": [{ "target": "id", "ignore": true }],
                "beanMapping": { "ignoreByDefault": true } }
            ] },
          { "namespace": "com.acme", "name": "Standalone",
            "specification": { "config": "void" } }
        ] }"#,
    );

    let mapper = registry.lookup("com.acme.CarMapper").unwrap();
    let helper = registry.lookup("com.acme.Helper").unwrap();
    let central = registry.lookup("com.acme.Central").unwrap();
    let data = registry.type_data(mapper).unwrap();
    let spec = data.annotations.specification.as_ref().unwrap();
    assert_eq!(spec.uses, [helper]);
    assert_eq!(spec.config, Some(central));
    assert_eq!(spec.settings.component_model.as_deref(), Some("spring"));
    assert_eq!(
        spec.settings.collection_mapping_strategy,
        Some(CollectionMappingStrategy::AdderPreferred)
    );

    let archetype = registry.type_data(central).unwrap();
    let archetype = archetype.annotations.archetype.as_ref().unwrap();
    assert_eq!(archetype.settings.unmapped_target_policy, Some(ReportingPolicy::Ignore));

    let method = &registry.declared_methods(mapper)[0];
    assert_eq!(method.return_type, TypeId::VOID);
    assert!(method.flags.contains(MethodFlags::PUBLIC | MethodFlags::ABSTRACT));
    assert!(method.params[1].is_mapping_target);
    assert_eq!(
        method.annotations.mapping.as_ref().unwrap().source.as_deref(),
        Some("fullName")
    );
    assert!(method.annotations.mappings[0].ignore);
    assert!(method.annotations.bean_mapping.as_ref().unwrap().ignore_by_default);

    let standalone = registry.lookup("com.acme.Standalone").unwrap();
    let spec = registry
        .type_data(standalone)
        .unwrap()
        .annotations
        .specification
        .clone()
        .unwrap();
    assert_eq!(spec.config, Some(TypeId::VOID));
}

#[test]
fn test_methods_default_to_public() {
    let registry = registry(
        r#"{ "types": [
          { "namespace": "com.acme", "name": "Helper",
            "methods": [{ "name": "noop" }] }
        ] }"#,
    );
    let helper = registry.lookup("com.acme.Helper").unwrap();
    assert_eq!(registry.declared_methods(helper)[0].flags, MethodFlags::PUBLIC);
}

#[test]
fn test_reports_parse_and_io_errors() {
    assert!(matches!(
        load_snapshot("{ not json").unwrap_err(),
        SnapshotError::Parse(_)
    ));

    let temp = tempfile::tempdir().unwrap();
    let err = load_snapshot_file(&temp.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SnapshotError::Io { .. }));
    assert!(std::error::Error::source(&err).is_some());
}
