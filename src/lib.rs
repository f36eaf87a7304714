//! mapforge: mapping-specification resolution for a mapping-code generator.
//!
//! The workspace crates do the work:
//! - `mapforge-types`: the type-introspection service
//! - `mapforge-retrieval`: configuration, method retrieval and shape checks
//! - `mapforge-emitter`: the generated-unit model and its import list
//!
//! This crate wires them into one [`pipeline::run`] per root type, loads
//! type-model [`snapshot`]s and hosts the `mapforge` command line.

pub use mapforge_common as common;
pub use mapforge_emitter as emitter;
pub use mapforge_retrieval as retrieval;
pub use mapforge_types as types;

pub mod pipeline;
pub use pipeline::{PipelineOutput, run};

pub mod snapshot;
pub use snapshot::{SnapshotError, load_snapshot, load_snapshot_file};

pub mod tracing_config;

#[cfg(feature = "cli")]
pub mod cli;
