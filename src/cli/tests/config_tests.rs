use super::args::CliArgs;
use super::config::{
    MapforgeConfig, apply_cli_overrides, find_config_path, load_config, parse_config,
    resolve_generator_options,
};
use clap::Parser;
use mapforge_common::{GeneratorOptions, ReportingPolicy};
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["mapforge", "--model", "model.json", "--root", "com.acme.Mapper"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("should parse")
}

#[test]
fn parses_booleans_written_as_strings() {
    let config = parse_config(
        r#"{
          "suppressGeneratorTimestamp": "true",
          "suppressGeneratorVersionComment": "off"
        }"#,
    )
    .expect("should parse");

    assert_eq!(config.suppress_generator_timestamp, Some(true));
    assert_eq!(config.suppress_generator_version_comment, Some(false));
}

#[test]
fn rejects_invalid_boolean_strings() {
    let err = parse_config(r#"{ "suppressGeneratorTimestamp": "maybe" }"#)
        .expect_err("should fail");
    assert!(format!("{err:#}").contains("invalid boolean value"));
}

#[test]
fn empty_config_resolves_to_defaults() {
    let config = parse_config("{}").expect("should parse");
    let options = resolve_generator_options(Some(&config)).expect("should resolve");
    assert_eq!(options, GeneratorOptions::default());
    assert_eq!(
        resolve_generator_options(None).expect("should resolve"),
        GeneratorOptions::default()
    );
}

#[test]
fn resolves_policy_and_component_model() {
    let config = parse_config(
        r#"{ "unmappedTargetPolicy": "Error", "defaultComponentModel": " spring " }"#,
    )
    .expect("should parse");
    let options = resolve_generator_options(Some(&config)).expect("should resolve");
    assert_eq!(options.unmapped_target_policy, ReportingPolicy::Error);
    assert_eq!(options.default_component_model, "spring");
}

#[test]
fn rejects_unknown_policy_and_empty_component_model() {
    let config = MapforgeConfig {
        unmapped_target_policy: Some("loud".to_string()),
        ..MapforgeConfig::default()
    };
    assert!(resolve_generator_options(Some(&config)).is_err());

    let config = MapforgeConfig {
        default_component_model: Some("  ".to_string()),
        ..MapforgeConfig::default()
    };
    assert!(resolve_generator_options(Some(&config)).is_err());
}

#[test]
fn load_config_merges_extends() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "base.json",
        r#"{ "suppressGeneratorTimestamp": true, "unmappedTargetPolicy": "ignore" }"#,
    );
    let child = write_file(
        temp.path(),
        "mapforge.json",
        r#"{ "extends": "./base", "unmappedTargetPolicy": "error" }"#,
    );

    let config = load_config(&child).expect("should load");
    assert_eq!(config.extends, None);
    assert_eq!(config.suppress_generator_timestamp, Some(true));
    assert_eq!(config.unmapped_target_policy.as_deref(), Some("error"));
}

#[test]
fn load_config_detects_extends_cycles() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(temp.path(), "a.json", r#"{ "extends": "./b.json" }"#);
    let b = write_file(temp.path(), "b.json", r#"{ "extends": "./a.json" }"#);

    let err = load_config(&b).expect_err("cycle should fail");
    assert!(format!("{err:#}").contains("cycle"));
}

#[test]
fn load_config_reports_missing_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let err = load_config(&temp.path().join("missing.json")).expect_err("should fail");
    assert!(format!("{err:#}").contains("failed to read mapforge config"));
}

#[test]
fn cli_flags_override_file_values() {
    let config = parse_config(
        r#"{ "unmappedTargetPolicy": "ignore", "defaultComponentModel": "cdi" }"#,
    )
    .expect("should parse");
    let mut options = resolve_generator_options(Some(&config)).expect("should resolve");
    apply_cli_overrides(
        &mut options,
        &args(&[
            "--unmappedTargetPolicy",
            "warn",
            "--defaultComponentModel",
            "spring",
            "--suppressGeneratorTimestamp",
        ]),
    );

    assert_eq!(options.unmapped_target_policy, ReportingPolicy::Warn);
    assert_eq!(options.default_component_model, "spring");
    assert!(options.suppress_generator_timestamp);
    assert!(!options.suppress_generator_version_comment);
}

#[test]
fn absent_flags_keep_file_values() {
    let config = parse_config(r#"{ "suppressGeneratorVersionComment": "yes" }"#)
        .expect("should parse");
    let mut options = resolve_generator_options(Some(&config)).expect("should resolve");
    apply_cli_overrides(&mut options, &args(&[]));
    assert!(options.suppress_generator_version_comment);
}

#[test]
fn finds_config_beside_the_model() {
    let temp = tempfile::tempdir().expect("temp dir");
    let model = write_file(temp.path(), "model.json", r#"{ "types": [] }"#);
    assert_eq!(find_config_path(None, &model), None);

    let config = write_file(temp.path(), "mapforge.json", "{}");
    assert_eq!(find_config_path(None, &model), Some(config));
}

#[test]
fn explicit_config_path_wins() {
    let temp = tempfile::tempdir().expect("temp dir");
    let model = write_file(temp.path(), "model.json", r#"{ "types": [] }"#);
    write_file(temp.path(), "mapforge.json", "{}");

    let explicit = Path::new("elsewhere.json");
    assert_eq!(
        find_config_path(Some(explicit), &model),
        Some(PathBuf::from("elsewhere.json"))
    );
}
