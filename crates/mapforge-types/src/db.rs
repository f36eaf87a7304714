//! The introspection service boundary.
//!
//! Retrieval and import planning only ever see a `&dyn TypeDatabase`; they
//! never mutate it and never clone type graphs out of it.

use crate::relations;
use crate::types::{MethodInfo, TypeData, TypeId};

pub trait TypeDatabase {
    /// Look up the data for a type handle.
    fn type_data(&self, id: TypeId) -> Option<&TypeData>;

    /// Methods declared directly on `id`, in declaration order.
    ///
    /// For an instantiation this is the declaration's method list.
    fn declared_methods(&self, id: TypeId) -> &[MethodInfo];

    /// The marker type placed on every generated unit.
    fn generated_marker(&self) -> TypeId;

    /// All declared and inherited methods, in a stable order.
    ///
    /// Own declarations come first, then each supertype's methods depth-first.
    /// A method whose signature is already present from a more specific type
    /// is skipped, and every type is visited once.
    fn methods_of(&self, id: TypeId) -> Vec<&MethodInfo> {
        relations::all_methods(self, id)
    }

    /// Whether a value of `source` can be used where `target` is expected.
    fn is_assignable_to(&self, source: TypeId, target: TypeId) -> bool {
        relations::is_assignable_to(self, source, target)
    }

    /// Whether code generated into `from` may call `method`, declared on `owner`.
    fn can_access(&self, from: TypeId, owner: TypeId, method: &MethodInfo) -> bool {
        relations::can_access(self, from, owner, method)
    }
}
