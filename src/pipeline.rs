//! One generation run for one root type.
//!
//! Reads the configuration, retrieves source methods, and assembles the
//! skeleton generated unit whose import list is computed from its members.

use std::collections::BTreeSet;

use mapforge_common::{Diagnostic, GeneratorOptions};
use mapforge_emitter::{Field, GeneratedUnit, ImportedType, MappingMethod, VersionInformation};
use mapforge_retrieval::{Configuration, MethodRetrieval, RetrievalError, SourceMethod};
use mapforge_types::type_queries::qualified_name;
use mapforge_types::{TypeDatabase, TypeFlags, TypeId};
use rustc_hash::FxHashSet;
use tracing::{debug, info_span};

/// Name recorded as the compiler in the generated unit's version information.
pub const COMPILER_NAME: &str = "mapforge";

#[derive(Debug)]
pub struct PipelineOutput {
    pub configuration: Configuration,
    pub methods: Vec<SourceMethod>,
    pub unit: GeneratedUnit,
    pub imports: BTreeSet<ImportedType>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PipelineOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Run retrieval and unit assembly for `root`.
///
/// Only a broken root configuration is an `Err`; every other problem is a
/// diagnostic in the output.
pub fn run(
    db: &dyn TypeDatabase,
    root: TypeId,
    options: &GeneratorOptions,
) -> Result<PipelineOutput, RetrievalError> {
    let _span = info_span!("pipeline", root = %qualified_name(db, root)).entered();

    let mut retrieval = MethodRetrieval::with_options(db, options.clone());
    let configuration = retrieval.configuration(root)?;
    let methods = retrieval.resolve_with(&configuration)?;
    let diagnostics = retrieval.take_diagnostics();

    let unit = build_unit(db, &configuration, &methods, options);
    let imports = unit.compute_imports(db);
    debug!(
        unit = %unit.name(),
        methods = unit.methods().len(),
        fields = unit.fields().len(),
        imports = imports.len(),
        diagnostics = diagnostics.len(),
        "pipeline finished"
    );

    Ok(PipelineOutput {
        configuration,
        methods,
        unit,
        imports,
        diagnostics,
    })
}

/// Skeleton unit: one method per generation target and one field per
/// composed type that a reference is called on.
pub fn build_unit(
    db: &dyn TypeDatabase,
    configuration: &Configuration,
    methods: &[SourceMethod],
    options: &GeneratorOptions,
) -> GeneratedUnit {
    let root = configuration.specification;
    let mut builder = GeneratedUnit::builder(
        configuration.implementation_namespace(db),
        configuration.implementation_name(db),
    )
    .options(options)
    .version_information(VersionInformation::current("unknown", COMPILER_NAME));

    let root_name = qualified_name(db, root);
    let is_interface = db
        .type_data(root)
        .is_some_and(|data| data.flags.contains(TypeFlags::INTERFACE));
    builder = if is_interface {
        builder.interface(root_name)
    } else {
        builder.supertype(root_name)
    };

    builder = builder.methods(
        methods
            .iter()
            .filter_map(SourceMethod::as_target)
            .map(MappingMethod::from_target),
    );

    let mut seen = FxHashSet::default();
    for owner in methods
        .iter()
        .filter_map(SourceMethod::as_reference)
        .filter_map(|reference| reference.declaring_type)
    {
        if seen.insert(owner) {
            builder = builder.field(Field::new(field_name(db, owner), owner));
        }
    }

    builder.build()
}

/// `CarMapper` -> `carMapper`
fn field_name(db: &dyn TypeDatabase, id: TypeId) -> String {
    let simple = db.type_data(id).map(|data| data.name.as_str()).unwrap_or("delegate");
    let mut chars = simple.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "delegate".to_string(),
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
