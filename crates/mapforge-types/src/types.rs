//! Core type representation.
//!
//! Types are interned: every distinct declared type, generic instantiation and
//! array shape gets exactly one `TypeId`, so identity comparison is `==`.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::annotations::{MethodAnnotations, TypeAnnotations};

// =============================================================================
// TypeId
// =============================================================================

/// Handle to an interned type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    // Reserved ids, interned at these indices by `TypeRegistry::new()`.
    pub const INVALID: TypeId = TypeId(0);

    /// The "no value" type.
    pub const VOID: TypeId = TypeId(1);

    pub const BOOLEAN: TypeId = TypeId(2);
    pub const BYTE: TypeId = TypeId(3);
    pub const SHORT: TypeId = TypeId(4);
    pub const INT: TypeId = TypeId(5);
    pub const LONG: TypeId = TypeId(6);
    pub const CHAR: TypeId = TypeId(7);
    pub const FLOAT: TypeId = TypeId(8);
    pub const DOUBLE: TypeId = TypeId(9);

    /// First non-reserved index.
    pub const FIRST_DYNAMIC: u32 = 10;

    #[inline]
    pub fn is_void(self) -> bool {
        self == Self::VOID
    }

    /// Built-in scalar check (no registry needed).
    #[inline]
    pub fn is_primitive(self) -> bool {
        self.0 >= Self::BOOLEAN.0 && self.0 <= Self::DOUBLE.0
    }

    #[inline]
    pub fn is_reserved(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }
}

/// Type arguments - inline up to 2 (covers lists and maps)
pub type TypeIdVec = SmallVec<[TypeId; 2]>;

// =============================================================================
// TypeKind / TypeFlags
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }

    pub const fn type_id(self) -> TypeId {
        match self {
            PrimitiveKind::Boolean => TypeId::BOOLEAN,
            PrimitiveKind::Byte => TypeId::BYTE,
            PrimitiveKind::Short => TypeId::SHORT,
            PrimitiveKind::Int => TypeId::INT,
            PrimitiveKind::Long => TypeId::LONG,
            PrimitiveKind::Char => TypeId::CHAR,
            PrimitiveKind::Float => TypeId::FLOAT,
            PrimitiveKind::Double => TypeId::DOUBLE,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.keyword() == keyword)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Invalid,
    Void,
    Primitive(PrimitiveKind),
    /// A class, interface or enum declaration, or an instantiation of one.
    Declared,
    /// An array; the element type is in `TypeData::component`.
    Array,
    TypeVariable,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        /// Iterable-shaped (collections, and every array).
        const ITERABLE  = 1 << 0;
        /// Map-shaped.
        const MAP       = 1 << 1;
        /// Enum-shaped.
        const ENUM      = 1 << 2;
        const INTERFACE = 1 << 3;
        const ABSTRACT  = 1 << 4;
        /// Externally defined; candidates for an import statement.
        const IMPORTED  = 1 << 5;
    }
}

// =============================================================================
// TypeData
// =============================================================================

/// Everything the introspection service knows about one type.
#[derive(Clone, Debug)]
pub struct TypeData {
    pub kind: TypeKind,
    /// Dot-separated namespace; empty for types without one.
    pub namespace: String,
    /// Simple name (for nested types, without the enclosing type's name).
    pub name: String,
    /// Enclosing type for nested declarations.
    pub enclosing: Option<TypeId>,
    /// Generic declaration this type instantiates.
    pub erasure: Option<TypeId>,
    pub type_args: TypeIdVec,
    /// Element type of an array.
    pub component: Option<TypeId>,
    pub supertypes: Vec<TypeId>,
    pub flags: TypeFlags,
    pub annotations: TypeAnnotations,
}

impl TypeData {
    pub(crate) fn reserved(kind: TypeKind, name: &str) -> Self {
        Self {
            kind,
            namespace: String::new(),
            name: name.to_string(),
            enclosing: None,
            erasure: None,
            type_args: TypeIdVec::new(),
            component: None,
            supertypes: Vec::new(),
            flags: TypeFlags::empty(),
            annotations: TypeAnnotations::default(),
        }
    }

    /// A declared type, externally defined by default.
    pub fn declared(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Declared,
            namespace: namespace.into(),
            name: name.into(),
            enclosing: None,
            erasure: None,
            type_args: TypeIdVec::new(),
            component: None,
            supertypes: Vec::new(),
            flags: TypeFlags::IMPORTED,
            annotations: TypeAnnotations::default(),
        }
    }

    pub fn is_nested(&self) -> bool {
        self.enclosing.is_some()
    }

    pub fn is_array(&self) -> bool {
        self.kind == TypeKind::Array
    }

    pub fn is_imported(&self) -> bool {
        self.flags.contains(TypeFlags::IMPORTED)
    }
}

// =============================================================================
// Methods
// =============================================================================

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u8 {
        const ABSTRACT  = 1 << 0;
        const STATIC    = 1 << 1;
        /// Interface method with a body.
        const DEFAULT   = 1 << 2;
        const PUBLIC    = 1 << 3;
        const PROTECTED = 1 << 4;
        const PRIVATE   = 1 << 5;
    }
}

/// A declared method parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    pub type_id: TypeId,
    /// Receives the mapping result instead of being a source.
    pub is_mapping_target: bool,
    /// Only disambiguates the result type; carries no data.
    pub is_target_type: bool,
}

impl ParamInfo {
    pub fn source(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
            is_mapping_target: false,
            is_target_type: false,
        }
    }

    pub fn mapping_target(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            is_mapping_target: true,
            ..Self::source(name, type_id)
        }
    }

    pub fn target_type(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            is_target_type: true,
            ..Self::source(name, type_id)
        }
    }
}

/// A method as reported by the introspection service.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodInfo {
    pub name: String,
    pub declaring_type: TypeId,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub thrown_types: Vec<TypeId>,
    pub flags: MethodFlags,
    pub annotations: MethodAnnotations,
}

impl MethodInfo {
    /// A public, concrete method with no parameters.
    pub fn new(name: impl Into<String>, declaring_type: TypeId, return_type: TypeId) -> Self {
        Self {
            name: name.into(),
            declaring_type,
            params: Vec::new(),
            return_type,
            thrown_types: Vec::new(),
            flags: MethodFlags::PUBLIC,
            annotations: MethodAnnotations::default(),
        }
    }

    /// A public abstract method with no parameters.
    pub fn abstract_method(
        name: impl Into<String>,
        declaring_type: TypeId,
        return_type: TypeId,
    ) -> Self {
        Self::new(name, declaring_type, return_type)
            .with_flags(MethodFlags::PUBLIC | MethodFlags::ABSTRACT)
    }

    pub fn with_param(mut self, param: ParamInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_thrown(mut self, type_id: TypeId) -> Self {
        self.thrown_types.push(type_id);
        self
    }

    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_annotations(mut self, annotations: MethodAnnotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(MethodFlags::ABSTRACT)
    }

    /// Same name and same parameter types.
    pub fn overrides_signature_of(&self, other: &MethodInfo) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(&other.params)
                .all(|(a, b)| a.type_id == b.type_id)
    }
}
