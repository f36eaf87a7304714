//! Generator options and the strategy enums shared by configuration and annotations.
//!
//! `GeneratorOptions` is the resolved, run-wide form. The file/CLI layer that
//! produces it lives in the `mapforge` binary crate.

use serde::{Deserialize, Serialize};

/// How unmapped target properties are reported by later stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportingPolicy {
    Ignore,
    #[default]
    Warn,
    Error,
}

/// How collection-typed target properties are populated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionMappingStrategy {
    #[default]
    AccessorOnly,
    SetterPreferred,
    AdderPreferred,
}

/// Whether generation targets inherit configuration from matching prototype methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MappingInheritanceStrategy {
    #[default]
    Explicit,
    AutoInheritFromConfig,
}

/// Component model used when neither the specification nor its archetype names one.
pub const DEFAULT_COMPONENT_MODEL: &str = "default";

/// Run-wide generator options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Omit the generation timestamp from the generated-marker annotation.
    pub suppress_generator_timestamp: bool,
    /// Omit the generator version comment from the generated unit.
    pub suppress_generator_version_comment: bool,
    pub unmapped_target_policy: ReportingPolicy,
    pub default_component_model: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            suppress_generator_timestamp: false,
            suppress_generator_version_comment: false,
            unmapped_target_policy: ReportingPolicy::default(),
            default_component_model: DEFAULT_COMPONENT_MODEL.to_string(),
        }
    }
}
