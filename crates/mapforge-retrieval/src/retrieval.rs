//! Method retrieval for one root mapping-specification type.
//!
//! The root is visited first, then each composed type in configuration order.
//! Only the root's abstract methods become generation targets. Methods on any
//! visited type with a conversion or factory parameter shape, and visible from
//! the root, become references. Everything else is skipped.
//!
//! Composition is expanded at the root only: a composed type's own `uses` are
//! never followed.

use std::fmt;
use std::sync::Arc;

use mapforge_common::{Diagnostic, GeneratorOptions};
use mapforge_types::{MethodInfo, TypeDatabase, TypeFormatter, TypeId};
use tracing::{debug, trace, warn};

use crate::configuration::{ConfigError, Configuration, resolve_configuration};
use crate::mapping::{BeanMapping, IterableMapping, MapMapping, collect_mappings};
use crate::prototypes::prototype_methods;
use crate::source_method::{MappingTarget, MethodReference, SourceMethod};
use crate::validation::{ParameterCounts, check_mapping_shape};

// =============================================================================
// RetrievalError
// =============================================================================

/// Fatal retrieval failure: the root type has no usable configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetrievalError {
    pub root: String,
    pub cause: ConfigError,
}

impl fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot retrieve methods of {}: {}", self.root, self.cause)
    }
}

impl std::error::Error for RetrievalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl From<ConfigError> for RetrievalError {
    fn from(cause: ConfigError) -> Self {
        Self {
            root: cause.root().to_string(),
            cause,
        }
    }
}

// =============================================================================
// MethodRetrieval
// =============================================================================

/// Retrieves the methods of root specification types against one database.
///
/// The database is only read. Diagnostics accumulate across calls until
/// [`MethodRetrieval::take_diagnostics`].
pub struct MethodRetrieval<'a> {
    db: &'a dyn TypeDatabase,
    options: GeneratorOptions,
    diagnostics: Vec<Diagnostic>,
}

/// Per-root state threaded through the visit.
struct RootContext<'c> {
    root: TypeId,
    configuration: &'c Configuration,
    prototypes: Arc<[MappingTarget]>,
}

impl<'a> MethodRetrieval<'a> {
    pub fn new(db: &'a dyn TypeDatabase) -> Self {
        Self::with_options(db, GeneratorOptions::default())
    }

    pub fn with_options(db: &'a dyn TypeDatabase, options: GeneratorOptions) -> Self {
        Self {
            db,
            options,
            diagnostics: Vec::new(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Read the configuration of `root` with this retrieval's options.
    pub fn configuration(&self, root: TypeId) -> Result<Configuration, ConfigError> {
        resolve_configuration(self.db, root, &self.options)
    }

    /// Resolve every source method of `root`, in visit order.
    pub fn resolve(&mut self, root: TypeId) -> Result<Vec<SourceMethod>, RetrievalError> {
        let configuration = self.configuration(root)?;
        self.resolve_with(&configuration)
    }

    /// Resolve against an already read configuration.
    pub fn resolve_with(
        &mut self,
        configuration: &Configuration,
    ) -> Result<Vec<SourceMethod>, RetrievalError> {
        let root = configuration.specification;
        let prototypes: Arc<[MappingTarget]> =
            prototype_methods(self.db, configuration, &mut self.diagnostics).into();

        let ctx = RootContext {
            root,
            configuration,
            prototypes,
        };
        let reported = self.diagnostics.len();
        let mut methods = Vec::new();
        self.visit(&ctx, root, true, &mut methods);

        debug!(
            root = root.0,
            targets = methods.iter().filter(|m| m.is_target()).count(),
            references = methods.iter().filter(|m| !m.is_target()).count(),
            diagnostics = self.diagnostics.len() - reported,
            "resolved source methods"
        );
        Ok(methods)
    }

    /// Visit `visited`'s methods. Composed types are expanded only when
    /// `is_root` is set.
    fn visit(
        &mut self,
        ctx: &RootContext<'_>,
        visited: TypeId,
        is_root: bool,
        out: &mut Vec<SourceMethod>,
    ) {
        let db = self.db;
        for method in db.methods_of(visited) {
            trace!(method = %method.name, visited = visited.0, "visiting method");
            if let Some(source_method) = self.classify(ctx, visited, method) {
                out.push(source_method);
            }
        }

        if is_root {
            for &used in &ctx.configuration.composed_types {
                self.visit(ctx, used, false, out);
            }
        }
    }

    fn classify(
        &mut self,
        ctx: &RootContext<'_>,
        visited: TypeId,
        method: &MethodInfo,
    ) -> Option<SourceMethod> {
        if visited == ctx.root && method.is_abstract() {
            return build_mapping_target(self.db, method, &ctx.prototypes, &mut self.diagnostics)
                .map(SourceMethod::Target);
        }

        let counts = ParameterCounts::of(&method.params);
        if !counts.is_reference_shape() && !counts.is_factory_shape() {
            trace!(method = %method.name, "not mapping relevant");
            return None;
        }
        if !self.db.can_access(ctx.root, visited, method) {
            trace!(method = %method.name, "not accessible from root");
            return None;
        }

        debug!(method = %method.name, factory = counts.is_factory_shape(), "method reference");
        Some(SourceMethod::Reference(MethodReference {
            name: method.name.clone(),
            declaring_type: (visited != ctx.root).then_some(visited),
            params: method.params.clone(),
            return_type: method.return_type,
            thrown_types: method.thrown_types.clone(),
        }))
    }
}

/// Build a generation target, or report the first shape violation and return `None`.
pub(crate) fn build_mapping_target(
    db: &dyn TypeDatabase,
    method: &MethodInfo,
    prototypes: &Arc<[MappingTarget]>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<MappingTarget> {
    if let Err(violation) = check_mapping_shape(db, method) {
        warn!(method = %method.name, code = violation.code(), "rejected mapping method");
        diagnostics.push(violation.to_diagnostic(db, method));
        return None;
    }

    let element = TypeFormatter::new(db).format_method(method);
    let annotations = &method.annotations;
    debug!(method = %element, "generation target");
    Some(MappingTarget {
        name: method.name.clone(),
        declaring_type: method.declaring_type,
        params: method.params.clone(),
        return_type: method.return_type,
        thrown_types: method.thrown_types.clone(),
        mappings: collect_mappings(annotations, &element, diagnostics),
        iterable_mapping: IterableMapping::from_annotation(
            annotations.iterable_mapping.as_ref(),
            &element,
            diagnostics,
        ),
        map_mapping: MapMapping::from_annotation(
            annotations.map_mapping.as_ref(),
            &element,
            diagnostics,
        ),
        bean_mapping: BeanMapping::from_annotation(
            annotations.bean_mapping.as_ref(),
            &element,
            diagnostics,
        ),
        prototypes: Arc::clone(prototypes),
    })
}
