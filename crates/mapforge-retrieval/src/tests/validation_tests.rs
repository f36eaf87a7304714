use super::*;
use mapforge_common::diagnostics::diagnostic_codes;
use mapforge_types::{TypeFlags, TypeRegistry};

struct Fixture {
    registry: TypeRegistry,
    mapper: TypeId,
    car: TypeId,
    dto: TypeId,
    vehicle: TypeId,
    cars: TypeId,
    dtos: TypeId,
    color: TypeId,
    color_dto: TypeId,
    class: TypeId,
}

fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let mapper = registry.declare("com.acme", "CarMapper").build();
    let vehicle = registry.declare("com.acme", "Vehicle").build();
    let car = registry.declare("com.acme", "Car").build();
    let dto = registry.declare("com.acme", "CarDto").build();
    let list = registry
        .declare("java.util", "List")
        .flags(TypeFlags::ITERABLE | TypeFlags::INTERFACE)
        .build();
    let cars = registry.instantiate(list, [car]);
    let dtos = registry.instantiate(list, [dto]);
    let color = registry
        .declare("com.acme", "Color")
        .flags(TypeFlags::ENUM)
        .build();
    let color_dto = registry
        .declare("com.acme", "ColorDto")
        .flags(TypeFlags::ENUM)
        .build();
    let class = registry.declare("java.lang", "Class").build();
    Fixture {
        registry,
        mapper,
        car,
        dto,
        vehicle,
        cars,
        dtos,
        color,
        color_dto,
        class,
    }
}

fn method(f: &Fixture, return_type: TypeId, params: &[ParamInfo]) -> MethodInfo {
    params.iter().cloned().fold(
        MethodInfo::abstract_method("map", f.mapper, return_type),
        MethodInfo::with_param,
    )
}

fn violation(f: &Fixture, return_type: TypeId, params: &[ParamInfo]) -> Option<ShapeViolation> {
    check_mapping_shape(&f.registry, &method(f, return_type, params)).err()
}

#[test]
fn test_parameter_counts_classify_reference_and_factory_shapes() {
    let f = fixture();
    let source = ParamInfo::source("car", f.car);
    let target = ParamInfo::mapping_target("dto", f.dto);
    let hint = ParamInfo::target_type("type", f.class);

    let conversion = ParameterCounts::of(&[source.clone(), target.clone(), hint.clone()]);
    assert!(conversion.is_reference_shape());
    assert!(!conversion.is_factory_shape());

    let factory = ParameterCounts::of(&[hint.clone()]);
    assert!(factory.is_factory_shape());
    assert!(ParameterCounts::of(&[]).is_factory_shape());

    let two_sources = ParameterCounts::of(&[source.clone(), source.clone()]);
    assert!(!two_sources.is_reference_shape());
    assert!(!two_sources.is_factory_shape());

    let target_only = ParameterCounts::of(&[target.clone()]);
    assert!(!target_only.is_reference_shape());
    assert!(!target_only.is_factory_shape());

    let two_hints = ParameterCounts::of(&[source, hint.clone(), hint]);
    assert!(!two_hints.is_reference_shape());
}

#[test]
fn test_result_type_prefers_the_update_target() {
    let f = fixture();
    let params = [
        ParamInfo::source("car", f.car),
        ParamInfo::mapping_target("dto", f.dto),
    ];
    assert_eq!(result_type(&params, TypeId::VOID), f.dto);
    assert_eq!(result_type(&params[..1], f.vehicle), f.vehicle);
    assert_eq!(source_parameters(&params).count(), 1);
}

#[test]
fn test_accepts_well_formed_methods() {
    let f = fixture();
    assert_eq!(violation(&f, f.dto, &[ParamInfo::source("car", f.car)]), None);
    assert_eq!(
        violation(
            &f,
            TypeId::VOID,
            &[
                ParamInfo::source("car", f.car),
                ParamInfo::mapping_target("dto", f.dto)
            ]
        ),
        None
    );
    assert_eq!(violation(&f, f.dtos, &[ParamInfo::source("cars", f.cars)]), None);
    assert_eq!(
        violation(&f, f.color_dto, &[ParamInfo::source("color", f.color)]),
        None
    );
}

#[test]
fn test_no_input_arguments() {
    let f = fixture();
    assert_eq!(violation(&f, f.dto, &[]), Some(ShapeViolation::NoInputArgs));
    // An update target alone is not a source, even with every later check violated.
    assert_eq!(
        violation(&f, TypeId::INT, &[ParamInfo::mapping_target("dto", f.dto)]),
        Some(ShapeViolation::NoInputArgs)
    );
}

#[test]
fn test_duplicate_mapping_targets() {
    let f = fixture();
    let params = [
        ParamInfo::source("car", f.car),
        ParamInfo::mapping_target("a", f.dto),
        ParamInfo::mapping_target("b", f.dto),
    ];
    assert_eq!(
        violation(&f, TypeId::VOID, &params),
        Some(ShapeViolation::DuplicateMappingTargets)
    );
}

#[test]
fn test_void_mapping_method() {
    let f = fixture();
    assert_eq!(
        violation(&f, TypeId::VOID, &[ParamInfo::source("car", f.car)]),
        Some(ShapeViolation::VoidMappingMethod)
    );
}

#[test]
fn test_non_assignable_result_type() {
    let f = fixture();
    let params = [
        ParamInfo::source("car", f.car),
        ParamInfo::mapping_target("dto", f.dto),
    ];
    assert_eq!(
        violation(&f, f.vehicle, &params),
        Some(ShapeViolation::NonAssignableResultType {
            result: f.dto,
            declared: f.vehicle
        })
    );
}

#[test]
fn test_iterable_shape_mismatch_is_rejected_both_ways() {
    let f = fixture();
    assert_eq!(
        violation(&f, f.dto, &[ParamInfo::source("cars", f.cars)]),
        Some(ShapeViolation::IterableToNonIterable)
    );
    assert_eq!(
        violation(&f, f.dtos, &[ParamInfo::source("car", f.car)]),
        Some(ShapeViolation::NonIterableToIterable)
    );
}

#[test]
fn test_collection_subtypes_are_iterable_shaped() {
    let mut f = fixture();
    let car_list = f
        .registry
        .declare("com.acme", "CarList")
        .supertype(f.cars)
        .build();
    let dto_list = f
        .registry
        .declare("com.acme", "CarDtoList")
        .supertype(f.dtos)
        .build();

    assert_eq!(
        violation(&f, f.dto, &[ParamInfo::source("cars", car_list)]),
        Some(ShapeViolation::IterableToNonIterable)
    );
    assert_eq!(
        violation(&f, dto_list, &[ParamInfo::source("car", f.car)]),
        Some(ShapeViolation::NonIterableToIterable)
    );
    assert_eq!(
        violation(&f, dto_list, &[ParamInfo::source("cars", car_list)]),
        None
    );
}

#[test]
fn test_target_type_parameter_is_rejected_on_mapping_methods() {
    let f = fixture();
    let params = [
        ParamInfo::source("car", f.car),
        ParamInfo::target_type("type", f.class),
    ];
    assert_eq!(
        violation(&f, f.dto, &params),
        Some(ShapeViolation::TargetTypeParameter)
    );
}

#[test]
fn test_iterable_check_runs_before_target_type_check() {
    let f = fixture();
    let params = [
        ParamInfo::source("cars", f.cars),
        ParamInfo::target_type("type", f.class),
    ];
    assert_eq!(
        violation(&f, f.dto, &params),
        Some(ShapeViolation::IterableToNonIterable)
    );
}

#[test]
fn test_primitive_parameter_and_return_are_rejected() {
    let f = fixture();
    assert_eq!(
        violation(&f, f.dto, &[ParamInfo::source("value", TypeId::INT)]),
        Some(ShapeViolation::PrimitiveParameter)
    );
    assert_eq!(
        violation(&f, TypeId::LONG, &[ParamInfo::source("car", f.car)]),
        Some(ShapeViolation::PrimitiveReturn)
    );
}

#[test]
fn test_enum_shape_mismatch_is_rejected_both_ways() {
    let f = fixture();
    assert_eq!(
        violation(&f, f.dto, &[ParamInfo::source("color", f.color)]),
        Some(ShapeViolation::EnumToNonEnum)
    );
    assert_eq!(
        violation(&f, f.color_dto, &[ParamInfo::source("car", f.car)]),
        Some(ShapeViolation::NonEnumToEnum)
    );
}

#[test]
fn test_violation_diagnostic_names_method_and_types() {
    let f = fixture();
    let method = method(
        &f,
        f.vehicle,
        &[
            ParamInfo::source("car", f.car),
            ParamInfo::mapping_target("dto", f.dto),
        ],
    );
    let violation = check_mapping_shape(&f.registry, &method).unwrap_err();
    let diagnostic = violation.to_diagnostic(&f.registry, &method);

    assert_eq!(diagnostic.code, diagnostic_codes::NON_ASSIGNABLE_RESULT_TYPE);
    assert_eq!(diagnostic.element, "com.acme.CarMapper#map(Car, CarDto)");
    assert_eq!(
        diagnostic.message_text,
        "The result type CarDto is not assignable to the return type Vehicle."
    );
    assert!(diagnostic.is_error());
}
