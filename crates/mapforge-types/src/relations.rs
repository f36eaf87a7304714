//! Structural queries the introspection service answers by default:
//! inherited-method enumeration, assignability and accessibility.
//!
//! Not a type checker: generic arguments are compared by
//! identity and supertypes are not substituted, which is enough to decide
//! whether a mapping method's result fits its declared return type.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::db::TypeDatabase;
use crate::types::{MethodFlags, MethodInfo, TypeId, TypeKind};

/// The generic declaration behind `id`, or `id` itself.
pub fn erasure_of<D: TypeDatabase + ?Sized>(db: &D, id: TypeId) -> TypeId {
    db.type_data(id).and_then(|data| data.erasure).unwrap_or(id)
}

// =============================================================================
// Inherited methods
// =============================================================================

pub fn all_methods<'a, D: TypeDatabase + ?Sized>(db: &'a D, id: TypeId) -> Vec<&'a MethodInfo> {
    let mut out = Vec::new();
    let mut visited = FxHashSet::default();
    collect_methods(db, erasure_of(db, id), &mut visited, &mut out);
    out
}

fn collect_methods<'a, D: TypeDatabase + ?Sized>(
    db: &'a D,
    id: TypeId,
    visited: &mut FxHashSet<TypeId>,
    out: &mut Vec<&'a MethodInfo>,
) {
    if !visited.insert(id) {
        return;
    }

    for method in db.declared_methods(id) {
        if out.iter().any(|seen| seen.overrides_signature_of(method)) {
            trace!(method = %method.name, "skipping overridden method");
            continue;
        }
        out.push(method);
    }

    let Some(data) = db.type_data(id) else {
        return;
    };
    for &supertype in &data.supertypes {
        collect_methods(db, erasure_of(db, supertype), visited, out);
    }
}

// =============================================================================
// Assignability
// =============================================================================

pub fn is_assignable_to<D: TypeDatabase + ?Sized>(db: &D, source: TypeId, target: TypeId) -> bool {
    if source == target {
        return true;
    }
    // Scalars and "no value" are only assignable to themselves.
    if source.is_reserved() || target.is_reserved() {
        return false;
    }

    let (Some(s), Some(t)) = (db.type_data(source), db.type_data(target)) else {
        return false;
    };

    match (s.kind, t.kind) {
        (TypeKind::Array, TypeKind::Array) => match (s.component, t.component) {
            (Some(sc), Some(tc)) => is_assignable_to(db, sc, tc),
            _ => false,
        },
        (TypeKind::Declared, TypeKind::Declared) => {
            // Raw types on either side match any arguments.
            if !s.type_args.is_empty() && !t.type_args.is_empty() && s.type_args != t.type_args {
                return false;
            }
            let mut visited = FxHashSet::default();
            derives_from(
                db,
                erasure_of(db, source),
                erasure_of(db, target),
                &mut visited,
            )
        }
        _ => false,
    }
}

fn derives_from<D: TypeDatabase + ?Sized>(
    db: &D,
    source: TypeId,
    target: TypeId,
    visited: &mut FxHashSet<TypeId>,
) -> bool {
    if source == target {
        return true;
    }
    if !visited.insert(source) {
        return false;
    }
    let Some(data) = db.type_data(source) else {
        return false;
    };
    data.supertypes
        .iter()
        .any(|&supertype| derives_from(db, erasure_of(db, supertype), target, visited))
}

// =============================================================================
// Accessibility
// =============================================================================

/// Private methods are never callable from generated code (it lives in a
/// different type). Protected methods need the same namespace or a subtype
/// relation; package-private methods need the same namespace.
pub fn can_access<D: TypeDatabase + ?Sized>(
    db: &D,
    from: TypeId,
    owner: TypeId,
    method: &MethodInfo,
) -> bool {
    if method.flags.contains(MethodFlags::PRIVATE) {
        return false;
    }
    if method.flags.contains(MethodFlags::PUBLIC) {
        return true;
    }

    let same_namespace = match (db.type_data(from), db.type_data(owner)) {
        (Some(a), Some(b)) => a.namespace == b.namespace,
        _ => false,
    };

    if method.flags.contains(MethodFlags::PROTECTED) {
        same_namespace || is_assignable_to(db, from, owner)
    } else {
        same_namespace
    }
}

#[cfg(test)]
#[path = "tests/relations_tests.rs"]
mod tests;
