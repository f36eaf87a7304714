use clap::{Parser, ValueEnum};
use mapforge_common::ReportingPolicy;
use std::path::PathBuf;

/// CLI arguments for the mapforge binary.
#[derive(Parser, Debug)]
#[command(
    name = "mapforge",
    version,
    about = "Resolve a mapping specification and plan its generated unit"
)]
pub struct CliArgs {
    /// JSON type-model snapshot to load.
    #[arg(short = 'm', long)]
    pub model: PathBuf,

    /// Qualified name of the mapping-specification type, e.g. `com.acme.CarMapper`.
    #[arg(short = 'r', long)]
    pub root: String,

    /// Generator options file. Defaults to `mapforge.json` next to the model, if present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Print the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Enable or disable colored output. Defaults to on when stdout is a terminal.
    #[arg(long)]
    pub pretty: Option<bool>,

    // ==================== Generator Options ====================
    /// Omit the generation timestamp from the generated-marker annotation.
    #[arg(long = "suppressGeneratorTimestamp", alias = "suppress-generator-timestamp")]
    pub suppress_generator_timestamp: bool,

    /// Omit the generator version comment from the generated unit.
    #[arg(
        long = "suppressGeneratorVersionComment",
        alias = "suppress-generator-version-comment"
    )]
    pub suppress_generator_version_comment: bool,

    /// How unmapped target properties are reported.
    #[arg(
        long = "unmappedTargetPolicy",
        alias = "unmapped-target-policy",
        value_enum,
        ignore_case = true
    )]
    pub unmapped_target_policy: Option<Policy>,

    /// Component model used when the specification and its archetype name none.
    #[arg(long = "defaultComponentModel", alias = "default-component-model")]
    pub default_component_model: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Policy {
    Ignore,
    Warn,
    Error,
}

impl Policy {
    pub fn to_reporting_policy(self) -> ReportingPolicy {
        match self {
            Policy::Ignore => ReportingPolicy::Ignore,
            Policy::Warn => ReportingPolicy::Warn,
            Policy::Error => ReportingPolicy::Error,
        }
    }
}
