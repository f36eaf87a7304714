//! In-memory introspection service.
//!
//! `TypeRegistry` interns declarations, generic instantiations, array shapes
//! and type variables, and stores declared methods per declaration. It backs
//! the snapshot loader and every test fixture.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = TypeRegistry::new();
//! let car = registry.declare("com.acme", "Car").build();
//! let list = registry
//!     .declare("java.util", "List")
//!     .flags(TypeFlags::ITERABLE | TypeFlags::INTERFACE)
//!     .build();
//! let cars = registry.instantiate(list, [car]);
//! registry.add_method(
//!     MethodInfo::abstract_method("toDtos", mapper, dtos).with_param(ParamInfo::source("cars", cars)),
//! );
//! ```

use mapforge_common::well_known::{GENERATED_MARKER_NAME, GENERATED_MARKER_NAMESPACE};
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::annotations::{ArchetypeAnnotation, SpecificationAnnotation};
use crate::db::TypeDatabase;
use crate::types::{MethodInfo, PrimitiveKind, TypeData, TypeFlags, TypeId, TypeIdVec, TypeKind};

#[derive(Debug)]
pub struct TypeRegistry {
    types: Vec<TypeData>,
    /// Declaration -> declared methods
    methods: FxHashMap<TypeId, Vec<MethodInfo>>,
    /// Qualified name (with enclosing types) -> declaration
    by_name: FxHashMap<String, TypeId>,
    instantiations: FxHashMap<(TypeId, TypeIdVec), TypeId>,
    arrays: FxHashMap<TypeId, TypeId>,
    type_variables: FxHashMap<String, TypeId>,
    generated_marker: TypeId,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut types = Vec::with_capacity(TypeId::FIRST_DYNAMIC as usize + 16);
        types.push(TypeData::reserved(TypeKind::Invalid, "<invalid>"));
        types.push(TypeData::reserved(TypeKind::Void, "void"));
        for kind in PrimitiveKind::ALL {
            debug_assert_eq!(kind.type_id().0 as usize, types.len());
            types.push(TypeData::reserved(TypeKind::Primitive(kind), kind.keyword()));
        }

        let mut registry = Self {
            types,
            methods: FxHashMap::default(),
            by_name: FxHashMap::default(),
            instantiations: FxHashMap::default(),
            arrays: FxHashMap::default(),
            type_variables: FxHashMap::default(),
            generated_marker: TypeId::INVALID,
        };
        registry.generated_marker = registry
            .declare(GENERATED_MARKER_NAMESPACE, GENERATED_MARKER_NAME)
            .build();
        registry
    }

    /// Number of interned types, reserved ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn intern(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        trace!(type_id = id.0, name = %data.name, kind = ?data.kind, "TypeRegistry::intern");
        self.types.push(data);
        id
    }

    /// Start declaring a class, interface or enum.
    pub fn declare(
        &mut self,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> TypeBuilder<'_> {
        TypeBuilder {
            data: TypeData::declared(namespace, name),
            registry: self,
        }
    }

    /// Look up a declaration by qualified name, e.g. `com.acme.Outer.Inner`.
    pub fn lookup(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    /// Intern `declaration<args...>`.
    pub fn instantiate(
        &mut self,
        declaration: TypeId,
        args: impl IntoIterator<Item = TypeId>,
    ) -> TypeId {
        let args: TypeIdVec = args.into_iter().collect();
        if args.is_empty() {
            return declaration;
        }
        let key = (declaration, args);
        if let Some(&existing) = self.instantiations.get(&key) {
            return existing;
        }
        let Some(base) = self.types.get(declaration.0 as usize) else {
            warn!(declaration = declaration.0, "instantiating unknown declaration");
            return TypeId::INVALID;
        };
        let mut data = base.clone();
        data.erasure = Some(declaration);
        data.type_args = key.1.clone();
        data.annotations = Default::default();
        let id = self.intern(data);
        self.instantiations.insert(key, id);
        id
    }

    /// Intern `component[]`.
    ///
    /// The array takes the namespace, nesting and import flag of its element
    /// type, so an array of an external type is import-relevant.
    pub fn array_of(&mut self, component: TypeId) -> TypeId {
        if let Some(&existing) = self.arrays.get(&component) {
            return existing;
        }
        let (namespace, name, enclosing, imported) = match self.types.get(component.0 as usize) {
            Some(data) => (
                data.namespace.clone(),
                format!("{}[]", data.name),
                data.enclosing,
                data.is_imported(),
            ),
            None => (String::new(), "<unknown>[]".to_string(), None, false),
        };
        let mut flags = TypeFlags::ITERABLE;
        if imported {
            flags |= TypeFlags::IMPORTED;
        }
        let id = self.intern(TypeData {
            kind: TypeKind::Array,
            namespace,
            name,
            enclosing,
            component: Some(component),
            flags,
            ..TypeData::reserved(TypeKind::Array, "")
        });
        self.arrays.insert(component, id);
        id
    }

    /// Intern a type variable such as `T`. Type variables are never imported.
    pub fn type_variable(&mut self, name: &str) -> TypeId {
        if let Some(&existing) = self.type_variables.get(name) {
            return existing;
        }
        let id = self.intern(TypeData::reserved(TypeKind::TypeVariable, name));
        self.type_variables.insert(name.to_string(), id);
        id
    }

    /// Register a method on its declaring type.
    pub fn add_method(&mut self, method: MethodInfo) {
        let owner = crate::relations::erasure_of(&*self, method.declaring_type);
        trace!(owner = owner.0, method = %method.name, "TypeRegistry::add_method");
        self.methods.entry(owner).or_default().push(method);
    }

    pub fn add_supertype(&mut self, id: TypeId, supertype: TypeId) {
        if let Some(data) = self.types.get_mut(id.0 as usize) {
            data.supertypes.push(supertype);
        }
    }

    pub fn set_specification(&mut self, id: TypeId, annotation: SpecificationAnnotation) {
        if let Some(data) = self.types.get_mut(id.0 as usize) {
            data.annotations.specification = Some(annotation);
        }
    }

    pub fn set_archetype(&mut self, id: TypeId, annotation: ArchetypeAnnotation) {
        if let Some(data) = self.types.get_mut(id.0 as usize) {
            data.annotations.archetype = Some(annotation);
        }
    }
}

impl TypeDatabase for TypeRegistry {
    fn type_data(&self, id: TypeId) -> Option<&TypeData> {
        if id == TypeId::INVALID {
            return None;
        }
        self.types.get(id.0 as usize)
    }

    fn declared_methods(&self, id: TypeId) -> &[MethodInfo] {
        let declaration = crate::relations::erasure_of(self, id);
        self.methods
            .get(&declaration)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn generated_marker(&self) -> TypeId {
        self.generated_marker
    }
}

// =============================================================================
// TypeBuilder
// =============================================================================

/// Builder returned by [`TypeRegistry::declare`].
pub struct TypeBuilder<'a> {
    registry: &'a mut TypeRegistry,
    data: TypeData,
}

impl TypeBuilder<'_> {
    /// Add shape flags (`IMPORTED` is already set).
    pub fn flags(mut self, flags: TypeFlags) -> Self {
        self.data.flags |= flags;
        self
    }

    /// Declared inside the current namespace's compilation, not externally defined.
    pub fn not_imported(mut self) -> Self {
        self.data.flags.remove(TypeFlags::IMPORTED);
        self
    }

    pub fn nested_in(mut self, enclosing: TypeId) -> Self {
        self.data.enclosing = Some(enclosing);
        self
    }

    pub fn supertype(mut self, supertype: TypeId) -> Self {
        self.data.supertypes.push(supertype);
        self
    }

    pub fn specification(mut self, annotation: SpecificationAnnotation) -> Self {
        self.data.annotations.specification = Some(annotation);
        self
    }

    pub fn archetype(mut self, annotation: ArchetypeAnnotation) -> Self {
        self.data.annotations.archetype = Some(annotation);
        self
    }

    /// Intern the declaration. Re-declaring a qualified name returns the
    /// existing handle unchanged.
    pub fn build(self) -> TypeId {
        let mut name = self.data.name.clone();
        let mut enclosing = self.data.enclosing;
        while let Some(outer) =
            enclosing.and_then(|outer| self.registry.types.get(outer.0 as usize))
        {
            name = format!("{}.{}", outer.name, name);
            enclosing = outer.enclosing;
        }
        let qualified = if self.data.namespace.is_empty() {
            name
        } else {
            format!("{}.{}", self.data.namespace, name)
        };

        if let Some(&existing) = self.registry.by_name.get(&qualified) {
            warn!(name = %qualified, "type declared twice; keeping the first declaration");
            return existing;
        }
        let id = self.registry.intern(self.data);
        self.registry.by_name.insert(qualified, id);
        id
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
