//! Import planning for generated units.
//!
//! Every type reachable from a unit's methods, fields, annotations and extra
//! types is tested with [`needs_import`]. Type arguments are always visited,
//! so a container that needs no import still contributes its arguments.
//!
//! The result is a `BTreeSet` ordered by namespace then nested name, which
//! makes the import list reproducible.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use mapforge_common::well_known::is_builtin_namespace;
use mapforge_types::relations::erasure_of;
use mapforge_types::type_queries::{array_component, nested_name};
use mapforge_types::{TypeDatabase, TypeId};
use tracing::trace;

// =============================================================================
// ImportedType
// =============================================================================

/// One import entry. Identity is (namespace, nested name); `type_id` is the
/// erased declaration, so all instantiations of a generic share one entry.
#[derive(Clone, Debug)]
pub struct ImportedType {
    pub namespace: String,
    /// Simple name qualified by enclosing types, e.g. `Outer.Inner`.
    pub name: String,
    pub type_id: TypeId,
}

impl ImportedType {
    pub fn of(db: &dyn TypeDatabase, id: TypeId) -> Option<Self> {
        let erased = erasure_of(db, id);
        let data = db.type_data(erased)?;
        Some(Self {
            namespace: data.namespace.clone(),
            name: nested_name(db, erased),
            type_id: erased,
        })
    }

    /// `ns.Outer.Inner`
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl PartialEq for ImportedType {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}

impl Eq for ImportedType {}

impl PartialOrd for ImportedType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImportedType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace
            .cmp(&other.namespace)
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for ImportedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

// =============================================================================
// needs_import
// =============================================================================

/// Whether `id`, referenced from a unit in `unit_namespace`, needs an import.
///
/// Not needed for types that are not externally defined, have no namespace,
/// live in the built-in namespace, or share the unit's namespace without
/// being nested.
pub fn needs_import(db: &dyn TypeDatabase, unit_namespace: &str, id: TypeId) -> bool {
    let Some(data) = db.type_data(id) else {
        return false;
    };
    if !data.is_imported() || data.namespace.is_empty() {
        return false;
    }
    if is_builtin_namespace(&data.namespace) {
        return false;
    }
    !(data.namespace == unit_namespace && !data.is_nested())
}

// =============================================================================
// ImportPlanner
// =============================================================================

pub(crate) struct ImportPlanner<'a> {
    db: &'a dyn TypeDatabase,
    namespace: &'a str,
    imports: BTreeSet<ImportedType>,
}

impl<'a> ImportPlanner<'a> {
    pub(crate) fn new(db: &'a dyn TypeDatabase, namespace: &'a str) -> Self {
        Self {
            db,
            namespace,
            imports: BTreeSet::new(),
        }
    }

    /// Add `id` without testing it.
    pub(crate) fn insert(&mut self, id: TypeId) {
        if let Some(entry) = ImportedType::of(self.db, id) {
            self.imports.insert(entry);
        }
    }

    /// Add `id` if it needs an import (its innermost element type for
    /// arrays), then visit that element's type arguments.
    pub(crate) fn add_with_dependents(&mut self, id: TypeId) {
        let db = self.db;
        let mut element = id;
        while let Some(component) = array_component(db, element) {
            element = component;
        }
        if needs_import(db, self.namespace, id) {
            trace!(type_id = element.0, "import");
            self.insert(element);
        }

        let Some(data) = db.type_data(element) else {
            return;
        };
        for &arg in &data.type_args {
            self.add_with_dependents(arg);
        }
    }

    pub(crate) fn finish(self) -> BTreeSet<ImportedType> {
        self.imports
    }
}

#[cfg(test)]
#[path = "tests/imports_tests.rs"]
mod tests;
