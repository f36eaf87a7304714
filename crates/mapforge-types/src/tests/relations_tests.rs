use super::*;
use crate::registry::TypeRegistry;
use crate::types::{ParamInfo, TypeFlags};

fn names(methods: &[&MethodInfo]) -> Vec<String> {
    methods.iter().map(|m| m.name.clone()).collect()
}

#[test]
fn test_all_methods_lists_own_methods_before_inherited() {
    let mut registry = TypeRegistry::new();
    let base = registry
        .declare("com.acme", "BaseMapper")
        .flags(TypeFlags::INTERFACE)
        .build();
    let mapper = registry.declare("com.acme", "CarMapper").supertype(base).build();
    registry.add_method(MethodInfo::abstract_method("inherited", base, TypeId::VOID));
    registry.add_method(MethodInfo::abstract_method("first", mapper, TypeId::VOID));
    registry.add_method(MethodInfo::abstract_method("second", mapper, TypeId::VOID));

    assert_eq!(
        names(&all_methods(&registry, mapper)),
        ["first", "second", "inherited"]
    );
}

#[test]
fn test_all_methods_skips_overridden_signatures() {
    let mut registry = TypeRegistry::new();
    let car = registry.declare("com.acme", "Car").build();
    let base = registry.declare("com.acme", "BaseMapper").build();
    let mapper = registry.declare("com.acme", "CarMapper").supertype(base).build();
    registry.add_method(
        MethodInfo::abstract_method("map", base, TypeId::VOID).with_param(ParamInfo::source("c", car)),
    );
    registry.add_method(MethodInfo::abstract_method("map", base, TypeId::VOID));
    registry.add_method(
        MethodInfo::new("map", mapper, TypeId::VOID).with_param(ParamInfo::source("car", car)),
    );

    let methods = all_methods(&registry, mapper);
    assert_eq!(methods.len(), 2);
    assert_eq!(methods[0].declaring_type, mapper);
    assert!(methods[1].params.is_empty());
}

#[test]
fn test_all_methods_visits_diamond_supertypes_once() {
    let mut registry = TypeRegistry::new();
    let root = registry.declare("com.acme", "Root").build();
    let left = registry.declare("com.acme", "Left").supertype(root).build();
    let right = registry.declare("com.acme", "Right").supertype(root).build();
    let leaf = registry
        .declare("com.acme", "Leaf")
        .supertype(left)
        .supertype(right)
        .build();
    registry.add_method(MethodInfo::abstract_method("shared", root, TypeId::INT));

    assert_eq!(names(&all_methods(&registry, leaf)), ["shared"]);
}

#[test]
fn test_can_access_follows_visibility_flags() {
    let mut registry = TypeRegistry::new();
    let helper = registry.declare("com.acme.util", "Helper").build();
    let mapper = registry.declare("com.acme", "CarMapper").build();
    let sibling = registry.declare("com.acme.util", "Sibling").build();
    let derived = registry.declare("com.other", "Derived").supertype(helper).build();

    let public = MethodInfo::new("m", helper, TypeId::INT);
    let private = public.clone().with_flags(MethodFlags::PRIVATE);
    let protected = public.clone().with_flags(MethodFlags::PROTECTED);
    let package = public.clone().with_flags(MethodFlags::empty());

    assert!(can_access(&registry, mapper, helper, &public));
    assert!(!can_access(&registry, sibling, helper, &private));

    assert!(can_access(&registry, sibling, helper, &protected));
    assert!(can_access(&registry, derived, helper, &protected));
    assert!(!can_access(&registry, mapper, helper, &protected));

    assert!(can_access(&registry, sibling, helper, &package));
    assert!(!can_access(&registry, derived, helper, &package));
}
