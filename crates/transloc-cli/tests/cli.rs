//! End-to-end tests for the `transloc` binary.

mod common;

use common::{json, TestContext};
use predicates::prelude::*;
use serde_json::json;

const REGISTRY: &str = r#"
fallbacks: true
registry:
  map:
    en-US: [de-DE]
"#;

const CUSTOM: &str = r#"
fallbacks:
  en-US: de-DE
  pt: de-DE
backend: json
"#;

#[test]
fn test_no_args_shows_help() {
    TestContext::new()
        .command()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_read_with_registry_traces_each_locale() {
    let ctx = TestContext::new()
        .with_config(REGISTRY)
        .with_data(json!({"en-US": null, "en": null, "de-DE": "de val"}));

    ctx.read("en-US")
        .arg("--trace")
        .assert()
        .success()
        .stdout("read en-US\nread en\nread de-DE\n\"de val\"\n");
}

#[test]
fn test_read_with_custom_mapping() {
    let ctx = TestContext::new()
        .with_config(CUSTOM)
        .with_data(json!({"en-US": "", "de-DE": "de val"}));

    let output = ctx.read("en-US").args(["--trace", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let parsed = json::parse_output(&output.stdout);
    assert_eq!(parsed["value"], json!("de val"));
    assert_eq!(parsed["resolved"], json!("de-DE"));
    assert_eq!(parsed["reads"], json!(["en-US", "de-DE"]));
}

#[test]
fn test_fallback_false_reads_requested_only() {
    let ctx = TestContext::new()
        .with_config(CUSTOM)
        .with_data(json!({"en-US": "", "de-DE": "de val"}));

    ctx.read("en-US")
        .args(["--fallback", "false", "--trace"])
        .assert()
        .success()
        .stdout("read en-US\n\"\"\n");
}

#[test]
fn test_override_wins_over_fallback_flag() {
    let ctx = TestContext::new()
        .with_config(CUSTOM)
        .with_data(json!({"en-US": "", "pl": "pl val", "ja": "ja val"}));

    ctx.read("en-US")
        .args(["--fallback", "pl", "--override", "ja"])
        .assert()
        .success()
        .stdout("\"ja val\"\n");
}

#[test]
fn test_exhausted_list_prints_last_read() {
    let ctx = TestContext::new().with_data(json!({"en-US": "  "}));

    ctx.read("en-US")
        .args(["--fallback", "pl,ja", "--trace"])
        .assert()
        .success()
        .stdout("read en-US\nread pl\nread ja\nnull\n");
}

#[test]
fn test_default_is_used_only_after_the_chain() {
    let ctx = TestContext::new()
        .with_config(CUSTOM)
        .with_data(json!({"de-DE": "de val"}));

    ctx.read("en-US")
        .args(["--default", "Untitled"])
        .assert()
        .success()
        .stdout("\"de val\"\n");

    ctx.read("ja")
        .args(["--default", "Untitled", "--trace"])
        .assert()
        .success()
        .stdout("read ja\n\"Untitled\"\n");
}

#[test]
fn test_chain_command() {
    let ctx = TestContext::new().with_config(REGISTRY);

    ctx.command()
        .args(["chain", "--locale", "en-US"])
        .assert()
        .success()
        .stdout("en-US -> en -> de-DE -> de\n");

    ctx.command()
        .args(["chain", "--locale", "en-US", "--fallback", "false"])
        .assert()
        .success()
        .stdout("en-US\n");
}

#[test]
fn test_check_reports_effective_mode() {
    let ctx = TestContext::new().with_config(CUSTOM);

    ctx.command()
        .args(["check", "--config"])
        .arg(ctx.config_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("fallbacks: custom"))
        .stdout(predicate::str::contains("backend: json"));
}

#[test]
fn test_check_with_defaults() {
    TestContext::new()
        .command()
        .args(["--format", "json", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"fallbacks\": \"none\""));
}

#[test]
fn test_config_from_environment_variable() {
    let ctx = TestContext::new();
    let elsewhere = ctx.path().join("elsewhere.yaml");
    std::fs::write(&elsewhere, "fallbacks: true\nbackend: hstore\n").unwrap();

    ctx.command()
        .env("TRANSLOC_CONFIG_PATH", &elsewhere)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("backend: hstore"));
}

#[test]
fn test_invalid_config_exits_with_config_code() {
    let ctx = TestContext::new().with_config("max_depth: 0\n");

    ctx.command()
        .arg("check")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("max_depth must be greater than 0"));
}

#[test]
fn test_missing_config_file_has_hint() {
    let ctx = TestContext::new();

    ctx.command()
        .args(["--config", "missing.yaml", "check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn test_missing_data_file_exits_with_io_code() {
    let ctx = TestContext::new();

    ctx.read("en").assert().code(3);
}

#[test]
fn test_hstore_rejects_non_string_data() {
    let ctx = TestContext::new()
        .with_config("backend: hstore\n")
        .with_data(json!({"en": 42}));

    ctx.read("en")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("expected string, got number"));
}

#[test]
fn test_invalid_locale_is_a_usage_error() {
    let ctx = TestContext::new().with_data(json!({}));

    ctx.read("en--US")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid locale"));
}
