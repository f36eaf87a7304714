//! Prototype methods declared on an archetype.

use std::sync::Arc;

use mapforge_common::Diagnostic;
use mapforge_types::TypeDatabase;
use tracing::debug;

use crate::configuration::Configuration;
use crate::retrieval::build_mapping_target;
use crate::source_method::MappingTarget;

/// Every archetype method that passes the shape checks, in `methods_of` order.
///
/// Each is built as a generation target with no prototypes of its own. A
/// method failing the checks is reported and left out.
pub fn prototype_methods(
    db: &dyn TypeDatabase,
    configuration: &Configuration,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<MappingTarget> {
    let Some(archetype) = configuration.archetype else {
        return Vec::new();
    };

    let none: Arc<[MappingTarget]> = Arc::from(Vec::new());
    let methods = db.methods_of(archetype);
    let total = methods.len();
    let prototypes: Vec<MappingTarget> = methods
        .into_iter()
        .filter_map(|method| build_mapping_target(db, method, &none, diagnostics))
        .collect();

    debug!(
        archetype = archetype.0,
        accepted = prototypes.len(),
        dropped = total - prototypes.len(),
        "collected prototype methods"
    );
    prototypes
}
