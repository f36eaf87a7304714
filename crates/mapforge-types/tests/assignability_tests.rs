//! Assignability as seen through the `TypeDatabase` trait object.

use mapforge_types::{TypeDatabase, TypeFlags, TypeId, TypeRegistry};

struct Fixture {
    registry: TypeRegistry,
    collection: TypeId,
    list: TypeId,
    array_list: TypeId,
    car: TypeId,
    sports_car: TypeId,
    dto: TypeId,
}

fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let collection = registry
        .declare("java.util", "Collection")
        .flags(TypeFlags::ITERABLE | TypeFlags::INTERFACE)
        .build();
    let list = registry
        .declare("java.util", "List")
        .flags(TypeFlags::ITERABLE | TypeFlags::INTERFACE)
        .supertype(collection)
        .build();
    let array_list = registry
        .declare("java.util", "ArrayList")
        .flags(TypeFlags::ITERABLE)
        .supertype(list)
        .build();
    let car = registry.declare("com.acme", "Car").build();
    let sports_car = registry.declare("com.acme", "SportsCar").supertype(car).build();
    let dto = registry.declare("com.acme", "CarDto").build();
    Fixture {
        registry,
        collection,
        list,
        array_list,
        car,
        sports_car,
        dto,
    }
}

#[test]
fn test_subtype_is_assignable_through_the_supertype_chain() {
    let f = fixture();
    let db: &dyn TypeDatabase = &f.registry;

    assert!(db.is_assignable_to(f.sports_car, f.car));
    assert!(!db.is_assignable_to(f.car, f.sports_car));
    assert!(db.is_assignable_to(f.array_list, f.collection));
    assert!(!db.is_assignable_to(f.dto, f.car));
}

#[test]
fn test_generic_arguments_must_match_when_both_sides_have_them() {
    let mut f = fixture();
    let cars = f.registry.instantiate(f.list, [f.car]);
    let dtos = f.registry.instantiate(f.list, [f.dto]);
    let car_array_list = f.registry.instantiate(f.array_list, [f.car]);
    let db: &dyn TypeDatabase = &f.registry;

    assert!(db.is_assignable_to(car_array_list, cars));
    assert!(!db.is_assignable_to(car_array_list, dtos));
    assert!(db.is_assignable_to(cars, f.collection));
    assert!(db.is_assignable_to(f.array_list, dtos));
}

#[test]
fn test_arrays_compare_their_components() {
    let mut f = fixture();
    let sports_cars = f.registry.array_of(f.sports_car);
    let cars = f.registry.array_of(f.car);
    let ints = f.registry.array_of(TypeId::INT);
    let longs = f.registry.array_of(TypeId::LONG);
    let db: &dyn TypeDatabase = &f.registry;

    assert!(db.is_assignable_to(sports_cars, cars));
    assert!(!db.is_assignable_to(cars, sports_cars));
    assert!(!db.is_assignable_to(ints, longs));
    assert!(!db.is_assignable_to(cars, f.collection));
}

#[test]
fn test_scalars_and_void_are_only_assignable_to_themselves() {
    let f = fixture();
    let db: &dyn TypeDatabase = &f.registry;

    assert!(db.is_assignable_to(TypeId::INT, TypeId::INT));
    assert!(!db.is_assignable_to(TypeId::INT, TypeId::LONG));
    assert!(db.is_assignable_to(TypeId::VOID, TypeId::VOID));
    assert!(!db.is_assignable_to(TypeId::VOID, f.car));
    assert!(!db.is_assignable_to(f.car, TypeId::VOID));
}
