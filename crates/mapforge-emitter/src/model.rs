//! Members of a generated unit.

use mapforge_retrieval::MappingTarget;
use mapforge_types::{ParamInfo, TypeId};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    /// Package-private.
    Default,
    Private,
}

impl Accessibility {
    /// Modifier keyword, empty for package-private.
    pub const fn keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::Default => "",
            Accessibility::Private => "private",
        }
    }
}

/// A method implemented by the generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingMethod {
    pub name: String,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub thrown_types: Vec<TypeId>,
    /// Types referenced only from the method body, e.g. a local collection implementation.
    pub body_types: Vec<TypeId>,
    pub accessibility: Accessibility,
}

impl MappingMethod {
    pub fn new(name: impl Into<String>, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type,
            thrown_types: Vec::new(),
            body_types: Vec::new(),
            accessibility: Accessibility::Public,
        }
    }

    /// Skeleton implementation of a retrieved generation target.
    pub fn from_target(target: &MappingTarget) -> Self {
        Self {
            name: target.name.clone(),
            params: target.params.clone(),
            return_type: target.return_type,
            thrown_types: target.thrown_types.clone(),
            body_types: Vec::new(),
            accessibility: Accessibility::Public,
        }
    }

    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_body_type(mut self, type_id: TypeId) -> Self {
        self.body_types.push(type_id);
        self
    }

    /// Parameter types, the return type unless it is "no value", thrown
    /// types and body types.
    pub fn import_types(&self) -> Vec<TypeId> {
        let capacity =
            self.params.len() + 1 + self.thrown_types.len() + self.body_types.len();
        let mut types = Vec::with_capacity(capacity);
        types.extend(self.params.iter().map(|param| param.type_id));
        if !self.return_type.is_void() {
            types.push(self.return_type);
        }
        types.extend(&self.thrown_types);
        types.extend(&self.body_types);
        types
    }
}

/// A field of the generated unit, e.g. an injected composed type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_id: TypeId,
    /// Unset when the type is spelled fully qualified in the generated code.
    pub type_requires_import: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            type_requires_import: true,
        }
    }

    pub fn without_import(mut self) -> Self {
        self.type_requires_import = false;
        self
    }
}

/// An annotation placed on the generated unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation {
    pub type_id: TypeId,
}

impl Annotation {
    pub fn new(type_id: TypeId) -> Self {
        Self { type_id }
    }
}

/// Constructor of the generated unit. Its parameter types are never imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constructor {
    pub name: String,
    pub params: Vec<ParamInfo>,
}

impl Constructor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }
}
