//! Mapping-specification configuration.
//!
//! Reads the specification annotation on a root type and, when present, the
//! archetype annotation on its `config` type. Each strategy setting resolves
//! root first, then archetype, then the generator option default.

use std::fmt;

use mapforge_common::diagnostics::diagnostic_messages;
use mapforge_common::well_known::{
    CLASS_NAME_PLACEHOLDER, DEFAULT_IMPLEMENTATION_NAME, DEFAULT_IMPLEMENTATION_NAMESPACE,
    PACKAGE_NAME_PLACEHOLDER,
};
use mapforge_common::{
    CollectionMappingStrategy, Diagnostic, DiagnosticMessage, GeneratorOptions,
    MappingInheritanceStrategy, ReportingPolicy, format_message,
};
use mapforge_types::type_queries::{is_declared_type, qualified_name};
use mapforge_types::{StrategySettings, TypeDatabase, TypeFormatter, TypeId};
use tracing::debug;

// =============================================================================
// ConfigError
// =============================================================================

/// A missing or malformed configuration on the root type.
///
/// Type names are captured at construction so the error outlives the database.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    MissingSpecification { root: String },
    InvalidComposedType { used: String, root: String },
    InvalidArchetype { archetype: String, root: String },
    ArchetypeNotAnnotated { archetype: String, root: String },
}

impl ConfigError {
    pub fn message(&self) -> &'static DiagnosticMessage {
        match self {
            ConfigError::MissingSpecification { .. } => &diagnostic_messages::MISSING_SPECIFICATION,
            ConfigError::InvalidComposedType { .. } => &diagnostic_messages::INVALID_COMPOSED_TYPE,
            ConfigError::InvalidArchetype { .. } => &diagnostic_messages::INVALID_ARCHETYPE,
            ConfigError::ArchetypeNotAnnotated { .. } => {
                &diagnostic_messages::ARCHETYPE_NOT_ANNOTATED
            }
        }
    }

    /// The root type the configuration belongs to.
    pub fn root(&self) -> &str {
        match self {
            ConfigError::MissingSpecification { root }
            | ConfigError::InvalidComposedType { root, .. }
            | ConfigError::InvalidArchetype { root, .. }
            | ConfigError::ArchetypeNotAnnotated { root, .. } => root,
        }
    }

    fn args(&self) -> Vec<&str> {
        match self {
            ConfigError::MissingSpecification { root } => vec![root.as_str()],
            ConfigError::InvalidComposedType { used, root } => vec![used.as_str(), root.as_str()],
            ConfigError::InvalidArchetype { archetype, root }
            | ConfigError::ArchetypeNotAnnotated { archetype, root } => {
                vec![archetype.as_str(), root.as_str()]
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.root(), self.message(), &self.args())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_message(self.message().message, &self.args()))
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// The annotated root type.
    pub specification: TypeId,
    /// Root `uses` in order, then archetype `uses` not already listed.
    pub composed_types: Vec<TypeId>,
    /// `None` when no archetype is configured or the "no type" marker is given.
    pub archetype: Option<TypeId>,
    pub unmapped_target_policy: ReportingPolicy,
    pub component_model: String,
    pub collection_mapping_strategy: CollectionMappingStrategy,
    pub mapping_inheritance_strategy: MappingInheritanceStrategy,
    pub implementation_name_pattern: String,
    pub implementation_namespace_pattern: String,
}

impl Configuration {
    /// Simple name of the generated unit, e.g. `CarMapperImpl`.
    pub fn implementation_name(&self, db: &dyn TypeDatabase) -> String {
        let simple = db
            .type_data(self.specification)
            .map(|data| data.name.as_str())
            .unwrap_or_default();
        self.implementation_name_pattern
            .replace(CLASS_NAME_PLACEHOLDER, simple)
    }

    /// Namespace of the generated unit.
    pub fn implementation_namespace(&self, db: &dyn TypeDatabase) -> String {
        let namespace = db
            .type_data(self.specification)
            .map(|data| data.namespace.as_str())
            .unwrap_or_default();
        self.implementation_namespace_pattern
            .replace(PACKAGE_NAME_PLACEHOLDER, namespace)
    }
}

fn display_name(db: &dyn TypeDatabase, id: TypeId) -> String {
    if is_declared_type(db, id) {
        qualified_name(db, id)
    } else {
        TypeFormatter::new(db).format(id)
    }
}

/// Read the configuration of `root`.
pub fn resolve_configuration(
    db: &dyn TypeDatabase,
    root: TypeId,
    options: &GeneratorOptions,
) -> Result<Configuration, ConfigError> {
    let root_name = || display_name(db, root);

    let Some(specification) = db
        .type_data(root)
        .and_then(|data| data.annotations.specification.as_ref())
    else {
        return Err(ConfigError::MissingSpecification { root: root_name() });
    };

    let mut composed_types = Vec::with_capacity(specification.uses.len());
    for &used in &specification.uses {
        if !is_declared_type(db, used) {
            return Err(ConfigError::InvalidComposedType {
                used: display_name(db, used),
                root: root_name(),
            });
        }
        if !composed_types.contains(&used) {
            composed_types.push(used);
        }
    }

    let archetype = match specification.config {
        None => None,
        Some(id) if id.is_void() => None,
        Some(id) if !is_declared_type(db, id) => {
            return Err(ConfigError::InvalidArchetype {
                archetype: display_name(db, id),
                root: root_name(),
            });
        }
        Some(id) => Some(id),
    };

    let empty = StrategySettings::default();
    let archetype_settings = match archetype {
        Some(id) => {
            let Some(annotation) = db
                .type_data(id)
                .and_then(|data| data.annotations.archetype.as_ref())
            else {
                return Err(ConfigError::ArchetypeNotAnnotated {
                    archetype: display_name(db, id),
                    root: root_name(),
                });
            };
            for &used in &annotation.uses {
                if !is_declared_type(db, used) {
                    return Err(ConfigError::InvalidComposedType {
                        used: display_name(db, used),
                        root: root_name(),
                    });
                }
                if !composed_types.contains(&used) {
                    composed_types.push(used);
                }
            }
            &annotation.settings
        }
        None => &empty,
    };

    let own = &specification.settings;
    let configuration = Configuration {
        specification: root,
        composed_types,
        archetype,
        unmapped_target_policy: own
            .unmapped_target_policy
            .or(archetype_settings.unmapped_target_policy)
            .unwrap_or(options.unmapped_target_policy),
        component_model: own
            .component_model
            .clone()
            .or_else(|| archetype_settings.component_model.clone())
            .unwrap_or_else(|| options.default_component_model.clone()),
        collection_mapping_strategy: own
            .collection_mapping_strategy
            .or(archetype_settings.collection_mapping_strategy)
            .unwrap_or_default(),
        mapping_inheritance_strategy: own
            .mapping_inheritance_strategy
            .or(archetype_settings.mapping_inheritance_strategy)
            .unwrap_or_default(),
        implementation_name_pattern: own
            .implementation_name
            .clone()
            .or_else(|| archetype_settings.implementation_name.clone())
            .unwrap_or_else(|| DEFAULT_IMPLEMENTATION_NAME.to_string()),
        implementation_namespace_pattern: own
            .implementation_namespace
            .clone()
            .or_else(|| archetype_settings.implementation_namespace.clone())
            .unwrap_or_else(|| DEFAULT_IMPLEMENTATION_NAMESPACE.to_string()),
    };

    debug!(
        root = %root_name(),
        composed = configuration.composed_types.len(),
        archetype = configuration.archetype.is_some(),
        "resolved configuration"
    );
    Ok(configuration)
}

#[cfg(test)]
#[path = "tests/configuration_tests.rs"]
mod tests;
