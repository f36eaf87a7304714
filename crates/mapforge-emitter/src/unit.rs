//! The generated unit and its builder.

use std::collections::BTreeSet;

use mapforge_common::GeneratorOptions;
use mapforge_types::{TypeDatabase, TypeId};
use tracing::debug;

use crate::imports::{ImportPlanner, ImportedType};
use crate::model::{Accessibility, Annotation, Constructor, Field, MappingMethod};

/// Versions recorded in the generated-marker annotation and header comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionInformation {
    pub runtime_version: String,
    pub generator_version: String,
    pub compiler_name: String,
}

impl VersionInformation {
    /// Version information of this generator build.
    pub fn current(runtime_version: impl Into<String>, compiler_name: impl Into<String>) -> Self {
        Self {
            runtime_version: runtime_version.into(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            compiler_name: compiler_name.into(),
        }
    }
}

impl Default for VersionInformation {
    fn default() -> Self {
        Self::current("unknown", "unknown")
    }
}

/// Complete description of one generated unit, ready for rendering.
#[derive(Clone, Debug)]
pub struct GeneratedUnit {
    namespace: String,
    name: String,
    supertype_name: Option<String>,
    interface_name: Option<String>,
    methods: Vec<MappingMethod>,
    fields: Vec<Field>,
    annotations: Vec<Annotation>,
    extra_imported_types: BTreeSet<TypeId>,
    accessibility: Accessibility,
    constructor: Option<Constructor>,
    suppress_generator_timestamp: bool,
    suppress_generator_version_comment: bool,
    version_information: VersionInformation,
}

impl GeneratedUnit {
    pub fn builder(namespace: impl Into<String>, name: impl Into<String>) -> GeneratedUnitBuilder {
        GeneratedUnitBuilder::new(namespace, name)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertype_name(&self) -> Option<&str> {
        self.supertype_name.as_deref()
    }

    pub fn interface_name(&self) -> Option<&str> {
        self.interface_name.as_deref()
    }

    pub fn methods(&self) -> &[MappingMethod] {
        &self.methods
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn extra_imported_types(&self) -> &BTreeSet<TypeId> {
        &self.extra_imported_types
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    pub fn suppress_generator_timestamp(&self) -> bool {
        self.suppress_generator_timestamp
    }

    pub fn suppress_generator_version_comment(&self) -> bool {
        self.suppress_generator_version_comment
    }

    pub fn version_information(&self) -> &VersionInformation {
        &self.version_information
    }

    /// The types this unit must import, ordered by namespace then name.
    ///
    /// Always contains the generated marker. Fields whose type is spelled
    /// fully qualified and the constructor contribute nothing.
    pub fn compute_imports(&self, db: &dyn TypeDatabase) -> BTreeSet<ImportedType> {
        let mut planner = ImportPlanner::new(db, &self.namespace);
        planner.insert(db.generated_marker());

        for method in &self.methods {
            for type_id in method.import_types() {
                planner.add_with_dependents(type_id);
            }
        }
        for field in self.fields.iter().filter(|f| f.type_requires_import) {
            planner.add_with_dependents(field.type_id);
        }
        for annotation in &self.annotations {
            planner.add_with_dependents(annotation.type_id);
        }
        for &extra in &self.extra_imported_types {
            planner.add_with_dependents(extra);
        }

        let imports = planner.finish();
        debug!(unit = %self.name, imports = imports.len(), "computed imports");
        imports
    }
}

// =============================================================================
// GeneratedUnitBuilder
// =============================================================================

pub struct GeneratedUnitBuilder {
    unit: GeneratedUnit,
}

impl GeneratedUnitBuilder {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            unit: GeneratedUnit {
                namespace: namespace.into(),
                name: name.into(),
                supertype_name: None,
                interface_name: None,
                methods: Vec::new(),
                fields: Vec::new(),
                annotations: Vec::new(),
                extra_imported_types: BTreeSet::new(),
                accessibility: Accessibility::Public,
                constructor: None,
                suppress_generator_timestamp: false,
                suppress_generator_version_comment: false,
                version_information: VersionInformation::default(),
            },
        }
    }

    pub fn supertype(mut self, name: impl Into<String>) -> Self {
        self.unit.supertype_name = Some(name.into());
        self
    }

    pub fn interface(mut self, name: impl Into<String>) -> Self {
        self.unit.interface_name = Some(name.into());
        self
    }

    pub fn method(mut self, method: MappingMethod) -> Self {
        self.unit.methods.push(method);
        self
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = MappingMethod>) -> Self {
        self.unit.methods.extend(methods);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.unit.fields.push(field);
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.unit.annotations.push(annotation);
        self
    }

    pub fn extra_import(mut self, type_id: TypeId) -> Self {
        self.unit.extra_imported_types.insert(type_id);
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.unit.accessibility = accessibility;
        self
    }

    pub fn constructor(mut self, constructor: Constructor) -> Self {
        self.unit.constructor = Some(constructor);
        self
    }

    /// Take the suppression flags from the run's options.
    pub fn options(mut self, options: &GeneratorOptions) -> Self {
        self.unit.suppress_generator_timestamp = options.suppress_generator_timestamp;
        self.unit.suppress_generator_version_comment = options.suppress_generator_version_comment;
        self
    }

    pub fn version_information(mut self, version_information: VersionInformation) -> Self {
        self.unit.version_information = version_information;
        self
    }

    pub fn build(self) -> GeneratedUnit {
        self.unit
    }
}
