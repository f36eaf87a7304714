//! JSON type-model snapshots.
//!
//! A snapshot is the input of the `mapforge` binary: every type the run may
//! see, with its supertypes, type-level annotations and declared methods.
//!
//! ```json
//! {
//!   "types": [
//!     { "namespace": "java.util", "name": "List", "kind": "interface",
//!       "flags": ["iterable"], "typeParameters": ["E"] },
//!     { "namespace": "com.acme", "name": "CarMapper", "kind": "interface",
//!       "specification": { "uses": ["com.acme.DateMapper"] },
//!       "methods": [
//!         { "name": "toDtos", "returnType": "java.util.List<com.acme.CarDto>",
//!           "parameters": [{ "name": "cars", "type": "com.acme.Car[]" }],
//!           "modifiers": ["public", "abstract"] }
//!       ] }
//!   ]
//! }
//! ```
//!
//! Types are declared in list order, so an enclosing type must precede the
//! types nested in it. All other references may point anywhere in the list.

use std::fmt;
use std::path::{Path, PathBuf};

use mapforge_common::{CollectionMappingStrategy, MappingInheritanceStrategy, ReportingPolicy};
use mapforge_types::{
    ArchetypeAnnotation, BeanMappingAnnotation, IterableMappingAnnotation, MapMappingAnnotation,
    MappingAnnotation, MethodAnnotations, MethodFlags, MethodInfo, ParamInfo, PrimitiveKind,
    SpecificationAnnotation, StrategySettings, TypeFlags, TypeId, TypeIdVec, TypeRegistry,
};
use serde::Deserialize;
use smallvec::SmallVec;
use tracing::{debug, trace};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum SnapshotError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    DuplicateType {
        name: String,
    },
    UnknownType {
        reference: String,
    },
    MalformedTypeReference {
        reference: String,
    },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Io { path, .. } => {
                write!(f, "failed to read snapshot {}", path.display())
            }
            SnapshotError::Parse(err) => write!(f, "invalid snapshot: {err}"),
            SnapshotError::DuplicateType { name } => {
                write!(f, "type '{name}' is declared more than once")
            }
            SnapshotError::UnknownType { reference } => {
                write!(f, "unknown type '{reference}'")
            }
            SnapshotError::MalformedTypeReference { reference } => {
                write!(f, "malformed type reference '{reference}'")
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Io { source, .. } => Some(source),
            SnapshotError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Parse(err)
    }
}

// =============================================================================
// Serialized form
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub types: Vec<TypeDecl>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKindDecl {
    #[default]
    Class,
    AbstractClass,
    Interface,
    Enum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeFlagDecl {
    Iterable,
    Map,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: TypeKindDecl,
    #[serde(default)]
    pub flags: Vec<TypeFlagDecl>,
    /// Qualified name of the enclosing type.
    #[serde(default)]
    pub enclosing: Option<String>,
    /// Unset for types compiled alongside the generated unit.
    #[serde(default = "default_imported")]
    pub imported: bool,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub supertypes: Vec<String>,
    #[serde(default)]
    pub specification: Option<SpecificationDecl>,
    #[serde(default)]
    pub archetype: Option<ArchetypeDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

fn default_imported() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsDecl {
    pub unmapped_target_policy: Option<ReportingPolicy>,
    pub component_model: Option<String>,
    pub collection_mapping_strategy: Option<CollectionMappingStrategy>,
    pub mapping_inheritance_strategy: Option<MappingInheritanceStrategy>,
    pub implementation_name: Option<String>,
    pub implementation_namespace: Option<String>,
}

impl SettingsDecl {
    fn to_settings(&self) -> StrategySettings {
        StrategySettings {
            unmapped_target_policy: self.unmapped_target_policy,
            component_model: self.component_model.clone(),
            collection_mapping_strategy: self.collection_mapping_strategy,
            mapping_inheritance_strategy: self.mapping_inheritance_strategy,
            implementation_name: self.implementation_name.clone(),
            implementation_namespace: self.implementation_namespace.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecificationDecl {
    pub uses: Vec<String>,
    /// Archetype reference; `"void"` is the explicit "no archetype" marker.
    pub config: Option<String>,
    #[serde(flatten)]
    pub settings: SettingsDecl,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArchetypeDecl {
    pub uses: Vec<String>,
    #[serde(flatten)]
    pub settings: SettingsDecl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierDecl {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Default,
}

impl ModifierDecl {
    fn flag(self) -> MethodFlags {
        match self {
            ModifierDecl::Public => MethodFlags::PUBLIC,
            ModifierDecl::Protected => MethodFlags::PROTECTED,
            ModifierDecl::Private => MethodFlags::PRIVATE,
            ModifierDecl::Abstract => MethodFlags::ABSTRACT,
            ModifierDecl::Static => MethodFlags::STATIC,
            ModifierDecl::Default => MethodFlags::DEFAULT,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDecl {
    pub name: String,
    #[serde(default = "void_reference")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParamDecl>,
    #[serde(default)]
    pub thrown_types: Vec<String>,
    /// Empty means `public`.
    #[serde(default)]
    pub modifiers: Vec<ModifierDecl>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub mapping: Option<MappingDecl>,
    #[serde(default)]
    pub mappings: Vec<MappingDecl>,
    #[serde(default)]
    pub iterable_mapping: Option<IterableMappingDecl>,
    #[serde(default)]
    pub map_mapping: Option<MapMappingDecl>,
    #[serde(default)]
    pub bean_mapping: Option<BeanMappingDecl>,
}

fn void_reference() -> String {
    "void".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(default)]
    pub mapping_target: bool,
    #[serde(default)]
    pub target_type: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingDecl {
    pub target: String,
    pub source: Option<String>,
    pub expression: Option<String>,
    pub constant: Option<String>,
    pub default_value: Option<String>,
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualified_by: Vec<String>,
    pub result_type: Option<String>,
    pub ignore: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IterableMappingDecl {
    pub date_format: Option<String>,
    pub number_format: Option<String>,
    pub qualified_by: Vec<String>,
    pub element_target_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapMappingDecl {
    pub key_format: Option<String>,
    pub value_format: Option<String>,
    pub key_qualified_by: Vec<String>,
    pub value_qualified_by: Vec<String>,
    pub key_target_type: Option<String>,
    pub value_target_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeanMappingDecl {
    pub result_type: Option<String>,
    pub qualified_by: Vec<String>,
    pub ignore_by_default: bool,
}

// =============================================================================
// Loading
// =============================================================================

/// Parse a snapshot and build the registry it describes.
pub fn load_snapshot(source: &str) -> Result<TypeRegistry, SnapshotError> {
    let snapshot: Snapshot = serde_json::from_str(source)?;
    build_registry(&snapshot)
}

pub fn load_snapshot_file(path: &Path) -> Result<TypeRegistry, SnapshotError> {
    let source = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_snapshot(&source)
}

/// Declare every type first, then resolve supertypes, annotations and
/// methods, which may refer to types later in the list.
pub fn build_registry(snapshot: &Snapshot) -> Result<TypeRegistry, SnapshotError> {
    let mut loader = Loader {
        registry: TypeRegistry::new(),
    };

    let mut declared = Vec::with_capacity(snapshot.types.len());
    for decl in &snapshot.types {
        declared.push(loader.declare(decl)?);
    }
    for (decl, &id) in snapshot.types.iter().zip(&declared) {
        loader.complete(decl, id)?;
    }

    debug!(
        types = snapshot.types.len(),
        interned = loader.registry.len(),
        "snapshot loaded"
    );
    Ok(loader.registry)
}

type Scope<'a> = SmallVec<[&'a str; 4]>;

struct Loader {
    registry: TypeRegistry,
}

impl Loader {
    fn declare(&mut self, decl: &TypeDecl) -> Result<TypeId, SnapshotError> {
        let enclosing = match &decl.enclosing {
            Some(outer) => Some(self.registry.lookup(outer).ok_or_else(|| {
                SnapshotError::UnknownType {
                    reference: outer.clone(),
                }
            })?),
            None => None,
        };
        let qualified = match &decl.enclosing {
            Some(outer) => format!("{outer}.{}", decl.name),
            None if decl.namespace.is_empty() => decl.name.clone(),
            None => format!("{}.{}", decl.namespace, decl.name),
        };
        if self.registry.lookup(&qualified).is_some() {
            return Err(SnapshotError::DuplicateType { name: qualified });
        }

        let mut flags = match decl.kind {
            TypeKindDecl::Class => TypeFlags::empty(),
            TypeKindDecl::AbstractClass => TypeFlags::ABSTRACT,
            TypeKindDecl::Interface => TypeFlags::INTERFACE | TypeFlags::ABSTRACT,
            TypeKindDecl::Enum => TypeFlags::ENUM,
        };
        for flag in &decl.flags {
            flags |= match flag {
                TypeFlagDecl::Iterable => TypeFlags::ITERABLE,
                TypeFlagDecl::Map => TypeFlags::MAP,
            };
        }

        let mut builder = self
            .registry
            .declare(decl.namespace.clone(), decl.name.clone())
            .flags(flags);
        if !decl.imported {
            builder = builder.not_imported();
        }
        if let Some(outer) = enclosing {
            builder = builder.nested_in(outer);
        }
        let id = builder.build();
        trace!(name = %qualified, type_id = id.0, "declared");
        Ok(id)
    }

    fn complete(&mut self, decl: &TypeDecl, id: TypeId) -> Result<(), SnapshotError> {
        let scope: Scope<'_> = decl.type_parameters.iter().map(String::as_str).collect();

        for supertype in &decl.supertypes {
            let supertype = self.resolve(supertype, &scope)?;
            self.registry.add_supertype(id, supertype);
        }

        if let Some(spec) = &decl.specification {
            let annotation = SpecificationAnnotation {
                uses: self.resolve_all(&spec.uses, &scope)?,
                config: self.resolve_opt(spec.config.as_deref(), &scope)?,
                settings: spec.settings.to_settings(),
            };
            self.registry.set_specification(id, annotation);
        }
        if let Some(archetype) = &decl.archetype {
            let annotation = ArchetypeAnnotation {
                uses: self.resolve_all(&archetype.uses, &scope)?,
                settings: archetype.settings.to_settings(),
            };
            self.registry.set_archetype(id, annotation);
        }

        for method in &decl.methods {
            let mut method_scope = scope.clone();
            method_scope.extend(method.type_parameters.iter().map(String::as_str));
            let info = self.method(method, id, &method_scope)?;
            self.registry.add_method(info);
        }
        Ok(())
    }

    fn method(
        &mut self,
        decl: &MethodDecl,
        owner: TypeId,
        scope: &[&str],
    ) -> Result<MethodInfo, SnapshotError> {
        let return_type = self.resolve(&decl.return_type, scope)?;
        let mut flags = decl
            .modifiers
            .iter()
            .fold(MethodFlags::empty(), |acc, modifier| acc | modifier.flag());
        if decl.modifiers.is_empty() {
            flags = MethodFlags::PUBLIC;
        }

        let mut info = MethodInfo::new(decl.name.clone(), owner, return_type).with_flags(flags);
        for param in &decl.parameters {
            let type_id = self.resolve(&param.type_ref, scope)?;
            let mut param_info = ParamInfo::source(param.name.clone(), type_id);
            param_info.is_mapping_target = param.mapping_target;
            param_info.is_target_type = param.target_type;
            info = info.with_param(param_info);
        }
        for thrown in &decl.thrown_types {
            let thrown = self.resolve(thrown, scope)?;
            info = info.with_thrown(thrown);
        }

        let mut mappings = Vec::with_capacity(decl.mappings.len());
        for mapping in &decl.mappings {
            mappings.push(self.mapping(mapping, scope)?);
        }
        let annotations = MethodAnnotations {
            mapping: match &decl.mapping {
                Some(mapping) => Some(self.mapping(mapping, scope)?),
                None => None,
            },
            mappings,
            iterable_mapping: match &decl.iterable_mapping {
                Some(iterable) => Some(IterableMappingAnnotation {
                    date_format: iterable.date_format.clone(),
                    number_format: iterable.number_format.clone(),
                    qualified_by: self.resolve_all(&iterable.qualified_by, scope)?,
                    element_target_type: self
                        .resolve_opt(iterable.element_target_type.as_deref(), scope)?,
                }),
                None => None,
            },
            map_mapping: match &decl.map_mapping {
                Some(map) => Some(MapMappingAnnotation {
                    key_format: map.key_format.clone(),
                    value_format: map.value_format.clone(),
                    key_qualified_by: self.resolve_all(&map.key_qualified_by, scope)?,
                    value_qualified_by: self.resolve_all(&map.value_qualified_by, scope)?,
                    key_target_type: self.resolve_opt(map.key_target_type.as_deref(), scope)?,
                    value_target_type: self
                        .resolve_opt(map.value_target_type.as_deref(), scope)?,
                }),
                None => None,
            },
            bean_mapping: match &decl.bean_mapping {
                Some(bean) => Some(BeanMappingAnnotation {
                    result_type: self.resolve_opt(bean.result_type.as_deref(), scope)?,
                    qualified_by: self.resolve_all(&bean.qualified_by, scope)?,
                    ignore_by_default: bean.ignore_by_default,
                }),
                None => None,
            },
        };
        Ok(info.with_annotations(annotations))
    }

    fn mapping(
        &mut self,
        decl: &MappingDecl,
        scope: &[&str],
    ) -> Result<MappingAnnotation, SnapshotError> {
        Ok(MappingAnnotation {
            target: decl.target.clone(),
            source: decl.source.clone(),
            expression: decl.expression.clone(),
            constant: decl.constant.clone(),
            default_value: decl.default_value.clone(),
            date_format: decl.date_format.clone(),
            number_format: decl.number_format.clone(),
            qualified_by: self.resolve_all(&decl.qualified_by, scope)?,
            result_type: self.resolve_opt(decl.result_type.as_deref(), scope)?,
            ignore: decl.ignore,
        })
    }

    fn resolve_all(
        &mut self,
        references: &[String],
        scope: &[&str],
    ) -> Result<Vec<TypeId>, SnapshotError> {
        references
            .iter()
            .map(|reference| self.resolve(reference, scope))
            .collect()
    }

    fn resolve_opt(
        &mut self,
        reference: Option<&str>,
        scope: &[&str],
    ) -> Result<Option<TypeId>, SnapshotError> {
        reference
            .map(|reference| self.resolve(reference, scope))
            .transpose()
    }

    /// Resolve `ns.Name`, `ns.Name<arg, ...>`, `Elem[]`, a scalar keyword,
    /// or a type parameter in `scope`.
    fn resolve(&mut self, reference: &str, scope: &[&str]) -> Result<TypeId, SnapshotError> {
        let text = reference.trim();
        let malformed = || SnapshotError::MalformedTypeReference {
            reference: reference.to_string(),
        };
        if text.is_empty() {
            return Err(malformed());
        }

        if let Some(component) = text.strip_suffix("[]") {
            let component = self.resolve(component, scope)?;
            return Ok(self.registry.array_of(component));
        }
        if text == "void" {
            return Ok(TypeId::VOID);
        }
        if let Some(kind) = PrimitiveKind::from_keyword(text) {
            return Ok(kind.type_id());
        }

        if let Some(open) = text.find('<') {
            let Some(args_text) = text[open + 1..].strip_suffix('>') else {
                return Err(malformed());
            };
            let base = text[..open].trim();
            let declaration =
                self.registry
                    .lookup(base)
                    .ok_or_else(|| SnapshotError::UnknownType {
                        reference: base.to_string(),
                    })?;
            let parts = split_type_arguments(args_text).ok_or_else(malformed)?;
            let mut args = TypeIdVec::with_capacity(parts.len());
            for part in parts {
                args.push(self.resolve(part, scope)?);
            }
            return Ok(self.registry.instantiate(declaration, args));
        }

        if text.contains(['>', ',']) {
            return Err(malformed());
        }
        if scope.contains(&text) {
            return Ok(self.registry.type_variable(text));
        }
        self.registry
            .lookup(text)
            .ok_or_else(|| SnapshotError::UnknownType {
                reference: text.to_string(),
            })
    }
}

/// Split `A, Map<B, C>` at top-level commas. `None` on unbalanced brackets
/// or an empty argument.
fn split_type_arguments(text: &str) -> Option<SmallVec<[&str; 4]>> {
    let mut parts = SmallVec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.checked_sub(1)?,
            ',' if depth == 0 => {
                parts.push(text[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return None;
    }
    parts.push(text[start..].trim());
    if parts.iter().any(|part: &&str| part.is_empty()) {
        return None;
    }
    Some(parts)
}

#[cfg(test)]
#[path = "tests/snapshot_tests.rs"]
mod tests;
