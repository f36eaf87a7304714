use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};

use mapforge_common::{Diagnostic, GeneratorOptions};
use mapforge_retrieval::{RetrievalError, SourceMethod};
use mapforge_types::type_queries::qualified_name;
use mapforge_types::{ParamInfo, TypeDatabase, TypeFormatter, TypeId, TypeRegistry};

use crate::cli::args::CliArgs;
use crate::cli::config::{
    apply_cli_overrides, find_config_path, load_config, resolve_generator_options,
};
use crate::cli::reporter::Reporter;
use crate::pipeline::{self, PipelineOutput};
use crate::snapshot::load_snapshot_file;

/// Exit status codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_DIAGNOSTICS_PRESENT: i32 = 1;
pub const EXIT_CONFIGURATION_ERROR: i32 = 2;

/// Everything one run produced. Owns the registry so results can be rendered.
pub struct GenerationResult {
    pub registry: TypeRegistry,
    pub root: TypeId,
    pub options: GeneratorOptions,
    pub outcome: Result<PipelineOutput, RetrievalError>,
}

impl GenerationResult {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match &self.outcome {
            Ok(output) => output.diagnostics.clone(),
            Err(err) => vec![err.cause.to_diagnostic()],
        }
    }

    pub fn exit_code(&self) -> i32 {
        match &self.outcome {
            Err(_) => EXIT_CONFIGURATION_ERROR,
            Ok(output) if output.has_errors() => EXIT_DIAGNOSTICS_PRESENT,
            Ok(_) => EXIT_SUCCESS,
        }
    }
}

fn resolve_path(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Load the options and the model, then run the pipeline for `--root`.
pub fn generate(args: &CliArgs, cwd: &Path) -> Result<GenerationResult> {
    let model_path = resolve_path(cwd, &args.model);
    let explicit_config = args.config.as_deref().map(|path| resolve_path(cwd, path));
    let file_config = match find_config_path(explicit_config.as_deref(), &model_path) {
        Some(path) => Some(load_config(&path)?),
        None => None,
    };
    let mut options = resolve_generator_options(file_config.as_ref())?;
    apply_cli_overrides(&mut options, args);

    let registry = load_snapshot_file(&model_path)
        .with_context(|| format!("failed to load model: {}", model_path.display()))?;
    let Some(root) = registry.lookup(args.root.trim()) else {
        bail!(
            "root type '{}' is not declared in {}",
            args.root,
            model_path.display()
        );
    };

    let outcome = pipeline::run(&registry, root, &options);
    Ok(GenerationResult {
        registry,
        root,
        options,
        outcome,
    })
}

// =============================================================================
// Text output
// =============================================================================

fn format_params(formatter: &TypeFormatter<'_>, params: &[ParamInfo]) -> String {
    params
        .iter()
        .map(|param| {
            let mut text = format!("{} {}", formatter.format(param.type_id), param.name);
            if param.is_mapping_target {
                text.insert_str(0, "@target ");
            } else if param.is_target_type {
                text.insert_str(0, "@targetType ");
            }
            text
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_source_method(db: &dyn TypeDatabase, root: TypeId, method: &SourceMethod) -> String {
    let formatter = TypeFormatter::new(db);
    let signature = format!(
        "{}({}): {}",
        method.name(),
        format_params(&formatter, method.params()),
        formatter.format(method.return_type())
    );
    match method {
        SourceMethod::Target(target) => {
            let mut line = format!("target    {signature}");
            let rules: usize = target.mappings.values().map(Vec::len).sum();
            if rules > 0 {
                line.push_str(&format!(" [{rules} rules]"));
            }
            line
        }
        SourceMethod::Reference(reference) => {
            let owner = qualified_name(db, reference.declaring_type.unwrap_or(root));
            let kind = if reference.is_factory() {
                "factory  "
            } else {
                "reference"
            };
            format!("{kind} {owner}#{signature}")
        }
    }
}

pub fn render_text(result: &GenerationResult, reporter: &Reporter) -> String {
    let mut out = String::new();
    if let Ok(output) = &result.outcome {
        let unit = &output.unit;
        out.push_str(&format!("unit {}.{}", unit.namespace(), unit.name()));
        if let Some(interface) = unit.interface_name() {
            out.push_str(&format!(" implements {interface}"));
        } else if let Some(supertype) = unit.supertype_name() {
            out.push_str(&format!(" extends {supertype}"));
        }
        out.push('\n');

        for method in &output.methods {
            out.push_str("  ");
            out.push_str(&format_source_method(&result.registry, result.root, method));
            out.push('\n');
        }
        for field in unit.fields() {
            out.push_str(&format!(
                "  field     {} {}\n",
                qualified_name(&result.registry, field.type_id),
                field.name
            ));
        }
        for import in &output.imports {
            out.push_str(&format!("import {import};\n"));
        }
    }

    let diagnostics = result.diagnostics();
    if !diagnostics.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&reporter.render(&diagnostics));
        out.push('\n');
        let summary = reporter.summary(&diagnostics);
        if !summary.is_empty() {
            out.push_str(&summary);
            out.push('\n');
        }
    }
    out
}

// =============================================================================
// JSON output
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<JsonUnit>,
    methods: Vec<JsonMethod>,
    imports: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonUnit {
    namespace: String,
    name: String,
    implements: Option<String>,
    extends: Option<String>,
    component_model: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMethod {
    kind: &'static str,
    name: String,
    /// `None` for methods declared on the root type.
    declaring_type: Option<String>,
    parameters: Vec<String>,
    return_type: String,
}

fn json_method(db: &dyn TypeDatabase, method: &SourceMethod) -> JsonMethod {
    let formatter = TypeFormatter::new(db);
    let (kind, declaring_type) = match method {
        SourceMethod::Target(target) => ("target", Some(target.declaring_type)),
        SourceMethod::Reference(reference) if reference.is_factory() => {
            ("factory", reference.declaring_type)
        }
        SourceMethod::Reference(reference) => ("reference", reference.declaring_type),
    };
    JsonMethod {
        kind,
        name: method.name().to_string(),
        declaring_type: declaring_type.map(|id| qualified_name(db, id)),
        parameters: method
            .params()
            .iter()
            .map(|param| formatter.format(param.type_id))
            .collect(),
        return_type: formatter.format(method.return_type()),
    }
}

pub fn render_json(result: &GenerationResult) -> Result<String> {
    let db: &dyn TypeDatabase = &result.registry;
    let report = match &result.outcome {
        Ok(output) => JsonReport {
            unit: Some(JsonUnit {
                namespace: output.unit.namespace().to_string(),
                name: output.unit.name().to_string(),
                implements: output.unit.interface_name().map(str::to_string),
                extends: output.unit.supertype_name().map(str::to_string),
                component_model: output.configuration.component_model.clone(),
            }),
            methods: output
                .methods
                .iter()
                .map(|method| json_method(db, method))
                .collect(),
            imports: output
                .imports
                .iter()
                .map(|import| import.qualified_name())
                .collect(),
            diagnostics: output.diagnostics.clone(),
        },
        Err(err) => JsonReport {
            unit: None,
            methods: Vec::new(),
            imports: Vec::new(),
            diagnostics: vec![err.cause.to_diagnostic()],
        },
    };
    serde_json::to_string_pretty(&report).context("failed to serialize report")
}
