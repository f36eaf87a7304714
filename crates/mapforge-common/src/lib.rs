//! Common types and utilities for the mapforge mapping generator.
//!
//! This crate provides foundational types used across all mapforge crates:
//! - Diagnostic records and the fixed diagnostic message table
//! - Generator options and the strategy enums shared by configuration and annotations
//! - Well-known names (built-in namespace, generated-marker type)

// Diagnostics - message table, codes and records
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticMessage, format_message};

// Generator options and strategy enums
pub mod options;
pub use options::{
    CollectionMappingStrategy, GeneratorOptions, MappingInheritanceStrategy, ReportingPolicy,
};

// Names with fixed meaning for the generated code
pub mod well_known;
