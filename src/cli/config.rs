use anyhow::{Context, Result, anyhow, bail};
use mapforge_common::{GeneratorOptions, ReportingPolicy};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::cli::args::CliArgs;

/// Default options file name, looked up next to the model.
pub const CONFIG_FILE_NAME: &str = "mapforge.json";

/// Custom deserializer for boolean options that accepts both bool and string values,
/// e.g. `"suppressGeneratorTimestamp": "true"`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => {
            let normalized = s.trim().to_lowercase();
            match normalized.as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(Error::custom(format!(
                    "invalid boolean value: '{}'. Expected true, false, 'true', or 'false'",
                    s
                ))),
            }
        }
    }
}

/// Contents of a `mapforge.json` file. Every field is optional; unset fields
/// fall back to the extended file, then to `GeneratorOptions::default()`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MapforgeConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub suppress_generator_timestamp: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub suppress_generator_version_comment: Option<bool>,
    #[serde(default)]
    pub unmapped_target_policy: Option<String>,
    #[serde(default)]
    pub default_component_model: Option<String>,
}

pub fn parse_config(source: &str) -> Result<MapforgeConfig> {
    let config = serde_json::from_str(source).context("failed to parse mapforge config JSON")?;
    Ok(config)
}

/// Load `path`, following `extends` chains. Values in a file override the
/// file it extends.
pub fn load_config(path: &Path) -> Result<MapforgeConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<MapforgeConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("mapforge config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read mapforge config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse mapforge config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_path = resolve_extends_path(path, &extends)?;
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Result<PathBuf> {
    let base_dir = current_path
        .parent()
        .ok_or_else(|| anyhow!("mapforge config has no parent directory"))?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        Ok(candidate)
    } else {
        Ok(base_dir.join(candidate))
    }
}

fn merge_configs(base: MapforgeConfig, child: MapforgeConfig) -> MapforgeConfig {
    MapforgeConfig {
        extends: None,
        suppress_generator_timestamp: child
            .suppress_generator_timestamp
            .or(base.suppress_generator_timestamp),
        suppress_generator_version_comment: child
            .suppress_generator_version_comment
            .or(base.suppress_generator_version_comment),
        unmapped_target_policy: child.unmapped_target_policy.or(base.unmapped_target_policy),
        default_component_model: child
            .default_component_model
            .or(base.default_component_model),
    }
}

fn parse_reporting_policy(value: &str) -> Result<ReportingPolicy> {
    match value.trim().to_lowercase().as_str() {
        "ignore" => Ok(ReportingPolicy::Ignore),
        "warn" => Ok(ReportingPolicy::Warn),
        "error" => Ok(ReportingPolicy::Error),
        _ => bail!(
            "invalid unmappedTargetPolicy: '{}'. Expected ignore, warn, or error",
            value
        ),
    }
}

/// Turn a loaded file into options.
pub fn resolve_generator_options(config: Option<&MapforgeConfig>) -> Result<GeneratorOptions> {
    let mut options = GeneratorOptions::default();
    let Some(config) = config else {
        return Ok(options);
    };

    if let Some(value) = config.suppress_generator_timestamp {
        options.suppress_generator_timestamp = value;
    }
    if let Some(value) = config.suppress_generator_version_comment {
        options.suppress_generator_version_comment = value;
    }
    if let Some(policy) = config.unmapped_target_policy.as_deref() {
        options.unmapped_target_policy = parse_reporting_policy(policy)?;
    }
    if let Some(model) = config.default_component_model.as_deref() {
        let model = model.trim();
        if model.is_empty() {
            bail!("defaultComponentModel must not be empty");
        }
        options.default_component_model = model.to_string();
    }
    Ok(options)
}

/// Command-line flags win over file values.
pub fn apply_cli_overrides(options: &mut GeneratorOptions, args: &CliArgs) {
    if args.suppress_generator_timestamp {
        options.suppress_generator_timestamp = true;
    }
    if args.suppress_generator_version_comment {
        options.suppress_generator_version_comment = true;
    }
    if let Some(policy) = args.unmapped_target_policy {
        options.unmapped_target_policy = policy.to_reporting_policy();
    }
    if let Some(model) = args.default_component_model.as_deref() {
        options.default_component_model = model.to_string();
    }
}

/// The explicit `--config` file, else `mapforge.json` beside the model if it exists.
pub fn find_config_path(explicit: Option<&Path>, model_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = model_path.parent()?.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}
