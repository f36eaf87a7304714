//! Shape queries used by the shape checks and by import planning.

use rustc_hash::FxHashSet;

use crate::db::TypeDatabase;
use crate::relations::erasure_of;
use crate::types::{TypeData, TypeFlags, TypeId, TypeKind};

fn has_flag(db: &dyn TypeDatabase, id: TypeId, flag: TypeFlags) -> bool {
    db.type_data(id).is_some_and(|data| data.flags.contains(flag))
}

/// `flag` on `id` or on any erased supertype.
fn inherits_flag(db: &dyn TypeDatabase, id: TypeId, flag: TypeFlags) -> bool {
    let mut visited = FxHashSet::default();
    let mut pending = vec![erasure_of(db, id)];
    while let Some(current) = pending.pop() {
        if !visited.insert(current) {
            continue;
        }
        let Some(data) = db.type_data(current) else {
            continue;
        };
        if data.flags.contains(flag) {
            return true;
        }
        pending.extend(data.supertypes.iter().map(|&supertype| erasure_of(db, supertype)));
    }
    false
}

/// Iterable-shaped: every array and every type deriving from a flagged
/// collection.
pub fn is_iterable_type(db: &dyn TypeDatabase, id: TypeId) -> bool {
    db.type_data(id).is_some_and(|data| data.kind == TypeKind::Array)
        || inherits_flag(db, id, TypeFlags::ITERABLE)
}

pub fn is_enum_type(db: &dyn TypeDatabase, id: TypeId) -> bool {
    has_flag(db, id, TypeFlags::ENUM)
}

pub fn is_map_type(db: &dyn TypeDatabase, id: TypeId) -> bool {
    inherits_flag(db, id, TypeFlags::MAP)
}

/// Only class, interface and enum declarations (and their instantiations)
/// can be composed or used as archetypes.
pub fn is_declared_type(db: &dyn TypeDatabase, id: TypeId) -> bool {
    db.type_data(id).is_some_and(|data| data.kind == TypeKind::Declared)
}

pub fn is_nested_type(db: &dyn TypeDatabase, id: TypeId) -> bool {
    db.type_data(id).is_some_and(TypeData::is_nested)
}

/// Element type of an array, `None` for anything else.
pub fn array_component(db: &dyn TypeDatabase, id: TypeId) -> Option<TypeId> {
    db.type_data(id)
        .filter(|data| data.is_array())
        .and_then(|data| data.component)
}

/// Simple name qualified by enclosing types, e.g. `Outer.Inner`.
pub fn nested_name(db: &dyn TypeDatabase, id: TypeId) -> String {
    let Some(data) = db.type_data(id) else {
        return String::new();
    };
    let mut name = data.name.clone();
    let mut enclosing = data.enclosing;
    while let Some(outer) = enclosing.and_then(|outer| db.type_data(outer)) {
        name = format!("{}.{}", outer.name, name);
        enclosing = outer.enclosing;
    }
    name
}

/// Fully qualified name without type arguments, e.g. `com.acme.Outer.Inner`.
pub fn qualified_name(db: &dyn TypeDatabase, id: TypeId) -> String {
    let nested = nested_name(db, id);
    match db.type_data(id) {
        Some(data) if !data.namespace.is_empty() => format!("{}.{}", data.namespace, nested),
        _ => nested,
    }
}

#[cfg(test)]
#[path = "tests/type_queries_tests.rs"]
mod tests;
